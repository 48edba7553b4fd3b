use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path;

use anyhow::{anyhow, bail, Context};
use avlbst::{AVLTree, Rotation};
use clap::Parser;
use log::{debug, info};
use regex::Regex;

mod logger;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Insert(i64, String),
    Remove(i64),
    Find(i64),
    Print,
    Dot,
    Stats,
    Check,
    EqualPaths,
}

impl Command {
    fn is_mutation(&self) -> bool {
        matches!(self, Command::Insert(..) | Command::Remove(_))
    }
}

struct CommandParser {
    re_command: Regex,
}

impl CommandParser {
    fn new() -> Self {
        let re_command = Regex::new(r"(?x)
                                    ^\s*(?P<OP>[a-z][a-z-]*)
                                    (?:\s+(?P<KEY>[+-]?[0-9]+))?
                                    (?:\s+(?P<VALUE>\S.*?))?
                                    \s*$").unwrap();
        Self{re_command}
    }

    /// Parses one script line, `None` for blank lines and comments.
    fn parse(&self, line: &str) -> anyhow::Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let caps = self.re_command.captures(line)
            .ok_or_else(|| anyhow!("malformed command {line:?}"))?;
        let op = &caps["OP"];
        let key = caps.name("KEY")
            .map(|k| k.as_str().parse::<i64>().with_context(|| format!("invalid key {:?}", k.as_str())))
            .transpose()?;
        let value = caps.name("VALUE").map(|v| v.as_str().to_string());

        let command = match (op, key, value) {
            ("insert", Some(key), Some(value)) => Command::Insert(key, value),
            ("remove", Some(key), None) => Command::Remove(key),
            ("find", Some(key), None) => Command::Find(key),
            ("print", None, None) => Command::Print,
            ("dot", None, None) => Command::Dot,
            ("stats", None, None) => Command::Stats,
            ("check", None, None) => Command::Check,
            ("equal-paths", None, None) => Command::EqualPaths,
            ("insert" | "remove" | "find" | "print" | "dot" | "stats" | "check" | "equal-paths", _, _) => {
                bail!("wrong arguments for {op:?}");
            },
            _ => bail!("unknown command {op:?}"),
        };
        Ok(Some(command))
    }
}

fn execute<W: Write>(tree: &mut AVLTree<i64, String>, command: &Command, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Insert(key, value) => {
            if tree.insert(*key, value.clone()).is_some() {
                debug!("replaced value of {key}");
            }
        },
        Command::Remove(key) => {
            if tree.remove(key).is_none() {
                debug!("{key} not present, nothing removed");
            }
        },
        Command::Find(key) => {
            match tree.get(key) {
                Some(value) => writeln!(out, "{key}: {value}")?,
                None => writeln!(out, "{key}: not found")?,
            }
        },
        Command::Print => {
            for (key, value) in tree.iter() {
                writeln!(out, "{key}: {value}")?;
            }
        },
        Command::Dot => write!(out, "{}", tree.dot())?,
        Command::Stats => {
            let rotations = tree.rotations();
            writeln!(out, "entries: {}", tree.len())?;
            writeln!(out, "height: {}", tree.height())?;
            writeln!(out, "rotations: left={} right={} left-right={} right-left={} total={}",
                     rotations.count(Rotation::Left), rotations.count(Rotation::Right),
                     rotations.count(Rotation::LeftRight), rotations.count(Rotation::RightLeft),
                     rotations.total())?;
        },
        Command::Check => {
            tree.validate()?;
            writeln!(out, "ok")?;
        },
        Command::EqualPaths => writeln!(out, "{}", tree.has_equal_paths())?,
    }
    Ok(())
}

fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> anyhow::Result<AVLTree<i64, String>> {
    let parser = CommandParser::new();
    let mut tree = AVLTree::new();
    let mut executed = 0;

    for (i, line) in input.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        let Some(command) = parser.parse(&line).with_context(|| format!("line {lineno}"))? else {
            continue;
        };

        execute(&mut tree, &command, out).with_context(|| format!("line {lineno}"))?;
        if cli.check_each && command.is_mutation() {
            tree.validate().with_context(|| format!("tree invalid after line {lineno}"))?;
        }
        executed += 1;
    }

    info!("executed {executed} commands, {} entries, height {}", tree.len(), tree.height());
    Ok(tree)
}

#[derive(Parser, Debug)]
#[command(about = "Replays insert/remove/find scripts against an AVL tree")]
struct Cli {
    /// Command script, read from stdin when omitted.
    #[arg(name = "script", index(1))]
    script: Option<path::PathBuf>,
    /// Validate all tree invariants after every insert and remove.
    #[arg(long)]
    check_each: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.script {
        Some(script) => {
            let file = File::open(script)
                .with_context(|| format!("failed to open {}", script.display()))?;
            run(&cli, BufReader::new(file), &mut out)?;
        },
        None => {
            run(&cli, io::stdin().lock(), &mut out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
fn test_cli() -> Cli {
    Cli{script: None, check_each: true, verbose: 0}
}

#[cfg(test)]
fn test_run(script: &str) -> anyhow::Result<(AVLTree<i64, String>, String)> {
    let mut out = Vec::new();
    let tree = run(&test_cli(), script.as_bytes(), &mut out)?;
    Ok((tree, String::from_utf8(out)?))
}

#[test]
fn test_parse_commands() {
    let p = CommandParser::new();
    assert_eq!(p.parse("insert 10 ten").unwrap(), Some(Command::Insert(10, "ten".to_string())));
    assert_eq!(p.parse("  insert -3   two words  ").unwrap(), Some(Command::Insert(-3, "two words".to_string())));
    assert_eq!(p.parse("remove +7").unwrap(), Some(Command::Remove(7)));
    assert_eq!(p.parse("find 0").unwrap(), Some(Command::Find(0)));
    assert_eq!(p.parse("equal-paths").unwrap(), Some(Command::EqualPaths));
    assert_eq!(p.parse("stats").unwrap(), Some(Command::Stats));
    assert_eq!(p.parse("").unwrap(), None);
    assert_eq!(p.parse("   # comment").unwrap(), None);

    assert!(p.parse("insert 10").is_err());
    assert!(p.parse("remove").is_err());
    assert!(p.parse("print 3").is_err());
    assert!(p.parse("rotate 3").is_err());
    assert!(p.parse("find 99999999999999999999").is_err());
    assert!(p.parse("Insert 1 x").is_err());
}

#[test]
fn test_run_script() {
    let (tree, out) = test_run("
        # left rotation at the root
        insert 10 ten
        insert 20 twenty
        insert 30 thirty
        insert 20 TWENTY
        find 20
        find 25
        remove 25
        remove 10
        print
        check
        equal-paths
        stats
    ").unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(out, "\
20: TWENTY
25: not found
20: TWENTY
30: thirty
ok
true
entries: 2
height: 2
rotations: left=1 right=0 left-right=0 right-left=0 total=1
");
}

#[test]
fn test_run_dot() {
    let (tree, out) = test_run("insert 1 a\ndot\n").unwrap();
    let root = tree.root().unwrap();
    assert_eq!(out, format!("digraph {{\n    \"{root}\" [label=\"1 (+0)\"];\n}}\n"));
}

#[test]
fn test_run_reports_line() {
    let err = test_run("insert 1 a\n\nbogus\n").unwrap_err();
    assert_eq!(err.to_string(), "line 3");
    assert_eq!(err.root_cause().to_string(), "unknown command \"bogus\"");
}
