use log::{log_enabled, Level};
use std::io::Write;

pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();

    builder
        .filter(None, verbosity_level(verbosity).to_level_filter())
        .format(|f, record| {
            write!(f, "{:>5} ", prettyprint_level(record.level()))?;

            if log_enabled!(Level::Debug) {
                write!(f, "[{}] ", record.target())?;
            }

            writeln!(f, "{}", record.args())
        })
        .init();
}

/// Maps the number of `--verbose` flags to a log level.
fn verbosity_level(num: u8) -> Level {
    match num {
        0 => Level::Info,
        1 => Level::Debug,
        2.. => Level::Trace,
    }
}

fn prettyprint_level(lvl: Level) -> &'static str {
    match lvl {
        Level::Error => "Error",
        Level::Warn => "Warn",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}
