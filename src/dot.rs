use core::fmt;

use crate::avl_tree::AVLTree;
use crate::bst::{NodeId, Side};

/// Graphviz rendering of an [`AVLTree`], created by [`AVLTree::dot`].
///
/// Every node is labelled with its key and balance factor, child edges are
/// labelled with the side they hang off.
pub struct Dot<'a, K, V> {
    pub(crate) tree: &'a AVLTree<K, V>,
}

impl<K: fmt::Debug, V> Dot<'_, K, V> {
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let tree = self.tree.tree();
        let key = format!("{:?}", tree.key(id)).replace('"', "\\\"");
        writeln!(f, r#"    "{id}" [label="{key} ({balance:+})"];"#, balance = self.tree.balance(id))?;

        for side in [Side::Left, Side::Right] {
            if let Some(child) = tree.child(id, side) {
                writeln!(f, r#"    "{id}" -> "{child}" [label="{side}"];"#)?;
                self.node_fmt(f, child)?;
            }
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V> fmt::Display for Dot<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        if let Some(root) = self.tree.root() {
            self.node_fmt(f, root)?;
        }
        writeln!(f, "}}")
    }
}

#[test]
fn test_dot() {
    let t: AVLTree<&str, ()> = [("b", ()), ("a", ()), ("c", ())].into_iter().collect();
    let root = t.root().unwrap();
    let a = t.find("a").unwrap();
    let c = t.find("c").unwrap();

    let expected = [
        "digraph {".to_string(),
        format!(r#"    "{root}" [label="\"b\" (+0)"];"#),
        format!(r#"    "{root}" -> "{a}" [label="left"];"#),
        format!(r#"    "{a}" [label="\"a\" (+0)"];"#),
        format!(r#"    "{root}" -> "{c}" [label="right"];"#),
        format!(r#"    "{c}" [label="\"c\" (+0)"];"#),
        "}".to_string(),
    ];
    assert_eq!(t.dot().to_string().lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_dot_empty() {
    let t: AVLTree<u32, u32> = AVLTree::new();
    assert_eq!(t.dot().to_string(), "digraph {\n}\n");
}
