use std::collections::BTreeMap;

use avlbst::AVLTree;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
}

fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (0..512u16, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0..512u16).prop_map(Op::Remove),
        ],
        0..max_len,
    )
}

/// Upper bound on the height of an AVL tree holding `len` entries.
fn max_height(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (1.4405 * ((len + 2) as f64).log2() - 0.3277).floor() as usize
}

proptest! {
    #[test]
    fn matches_btreemap(ops in ops(400)) {
        let mut tree = AVLTree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => prop_assert_eq!(tree.insert(k, v), model.insert(k, v)),
                Op::Remove(k) => prop_assert_eq!(tree.remove(&k), model.remove(&k)),
            }
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert!(tree.height() <= max_height(tree.len()));
    }

    #[test]
    fn insert_then_remove_all_empties(keys in proptest::collection::btree_set(any::<i32>(), 0..300)) {
        let mut tree: AVLTree<i32, ()> = keys.iter().map(|k| (*k, ())).collect();
        prop_assert_eq!(tree.len(), keys.len());
        prop_assert_eq!(tree.validate(), Ok(()));

        for k in &keys {
            prop_assert_eq!(tree.remove(k), Some(()));
            prop_assert_eq!(tree.validate(), Ok(()));
        }
        prop_assert!(tree.root().is_none());
        prop_assert!(tree.is_empty());
    }

    #[test]
    fn insert_rotates_at_most_once(keys in proptest::collection::vec(any::<u8>(), 1..200)) {
        let mut tree = AVLTree::new();
        for k in keys {
            let before = tree.rotations().total();
            tree.insert(k, ());
            prop_assert!(tree.rotations().total() - before <= 1);
        }
    }

    #[test]
    fn removing_absent_key_is_a_noop(keys in proptest::collection::vec(0..100u32, 0..100), absent in 100..200u32) {
        let mut tree: AVLTree<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
        let before: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let root = tree.root();
        let rotations = tree.rotations();

        prop_assert_eq!(tree.remove(&absent), None);
        prop_assert_eq!(tree.remove(&absent), None);

        prop_assert_eq!(tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), before);
        prop_assert_eq!(tree.root(), root);
        prop_assert_eq!(tree.rotations(), rotations);
    }
}
