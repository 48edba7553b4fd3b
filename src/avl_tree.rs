use core::borrow::Borrow;
use core::cmp;
use core::fmt;
use core::ops::Index;

use log::{debug, trace};

use crate::bst::{BinarySearchTree, Inserted, Iter, NodeId, Side};
use crate::dot::Dot;
use crate::error::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rotation {
    Left,
    Right,
    LeftRight,
    RightLeft,
}

/// Number of rotations performed, per kind.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RotationStats {
    pub left: usize,
    pub right: usize,
    pub left_right: usize,
    pub right_left: usize,
}

impl RotationStats {
    pub fn total(&self) -> usize {
        self.left + self.right + self.left_right + self.right_left
    }

    pub fn count(&self, rotation: Rotation) -> usize {
        match rotation {
            Rotation::Left => self.left,
            Rotation::Right => self.right,
            Rotation::LeftRight => self.left_right,
            Rotation::RightLeft => self.right_left,
        }
    }

    fn record(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::Left => self.left += 1,
            Rotation::Right => self.right += 1,
            Rotation::LeftRight => self.left_right += 1,
            Rotation::RightLeft => self.right_left += 1,
        }
    }
}

/// An ordered map kept height balanced by AVL rotations.
///
/// Every node stores its balance factor, `height(right) - height(left)`,
/// which is one of -1, 0 or 1 whenever no operation is in progress.
pub struct AVLTree<K, V> {
    tree: BinarySearchTree<K, V, i8>,
    rotations: RotationStats,
}

fn weight(side: Side) -> i8 {
    match side {
        Side::Left => -1,
        Side::Right => 1,
    }
}

impl<K, V> AVLTree<K, V> {
    pub fn new() -> Self {
        Self{tree: BinarySearchTree::new(), rotations: RotationStats::default()}
    }

    /// The underlying search tree, for walking the node structure.
    pub fn tree(&self) -> &BinarySearchTree<K, V, i8> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn has_equal_paths(&self) -> bool {
        self.tree.has_equal_paths()
    }

    pub fn iter(&self) -> Iter<'_, K, V, i8> {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.tree.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.tree.values()
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first_key_value()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_key_value()
    }

    pub fn rotations(&self) -> RotationStats {
        self.rotations
    }

    pub fn reset_rotations(&mut self) {
        self.rotations = RotationStats::default();
    }

    /// Renders the tree in graphviz format.
    pub fn dot(&self) -> Dot<'_, K, V> {
        Dot{tree: self}
    }

    pub fn balance(&self, id: NodeId) -> i8 {
        *self.tree.aux(id)
    }

    fn set_balance(&mut self, id: NodeId, balance: i8) {
        *self.tree.aux_mut(id) = balance;
    }

    fn update_balance(&mut self, id: NodeId, diff: i8) -> i8 {
        let balance = self.tree.aux_mut(id);
        *balance += diff;
        *balance
    }

    fn required_child(&self, id: NodeId, side: Side) -> Result<NodeId, Error> {
        self.tree.child(id, side).ok_or(Error::MissingChild{node: id, side})
    }

    fn record(&mut self, rotation: Rotation, pivot: NodeId) {
        trace!("rotation {rotation:?} at node {pivot}");
        self.rotations.record(rotation);
    }

    /// Exchanges the tree positions of two nodes. Balance factors describe
    /// positions, not entries, so they are swapped back.
    fn node_swap(&mut self, n1: NodeId, n2: NodeId) {
        self.tree.node_swap(n1, n2);
        let b1 = self.balance(n1);
        let b2 = self.balance(n2);
        self.set_balance(n1, b2);
        self.set_balance(n2, b1);
    }

    /// Lifts the right child of `n` into its place. Returns the new subtree
    /// root.
    fn rotate_left(&mut self, n: NodeId) -> Result<NodeId, Error> {
        let r = self.required_child(n, Side::Right)?;
        let parent = self.tree.parent(n);
        let rl = self.tree.left(r);

        self.tree.replace_child(parent, n, Some(r));
        self.tree.set_child(n, Side::Right, rl);
        self.tree.set_child(r, Side::Left, Some(n));

        self.set_balance(n, 0);
        self.set_balance(r, 0);
        self.record(Rotation::Left, n);
        Ok(r)
    }

    /// Lifts the left child of `n` into its place. Returns the new subtree
    /// root.
    fn rotate_right(&mut self, n: NodeId) -> Result<NodeId, Error> {
        let l = self.required_child(n, Side::Left)?;
        let parent = self.tree.parent(n);
        let lr = self.tree.right(l);

        self.tree.replace_child(parent, n, Some(l));
        self.tree.set_child(n, Side::Left, lr);
        self.tree.set_child(l, Side::Right, Some(n));

        self.set_balance(n, 0);
        self.set_balance(l, 0);
        self.record(Rotation::Right, n);
        Ok(l)
    }

    /// Right-heavy zig-zag: `n` leans right, its right child leans left.
    /// The grandchild `n.right.left` becomes the subtree root with `n` on
    /// its left and the old right child on its right.
    fn rotate_left_right(&mut self, n: NodeId) -> Result<NodeId, Error> {
        let r = self.required_child(n, Side::Right)?;
        let g = self.required_child(r, Side::Left)?;
        let parent = self.tree.parent(n);
        let (gl, gr) = (self.tree.left(g), self.tree.right(g));
        let gb = self.balance(g);

        self.tree.replace_child(parent, n, Some(g));
        self.tree.set_child(n, Side::Right, gl);
        self.tree.set_child(r, Side::Left, gr);
        self.tree.set_child(g, Side::Left, Some(n));
        self.tree.set_child(g, Side::Right, Some(r));

        self.set_balance(n, if gb == 1 { -1 } else { 0 });
        self.set_balance(r, if gb == -1 { 1 } else { 0 });
        self.set_balance(g, 0);
        self.record(Rotation::LeftRight, n);
        Ok(g)
    }

    /// Left-heavy zig-zag, mirror of [`Self::rotate_left_right`].
    fn rotate_right_left(&mut self, n: NodeId) -> Result<NodeId, Error> {
        let l = self.required_child(n, Side::Left)?;
        let g = self.required_child(l, Side::Right)?;
        let parent = self.tree.parent(n);
        let (gl, gr) = (self.tree.left(g), self.tree.right(g));
        let gb = self.balance(g);

        self.tree.replace_child(parent, n, Some(g));
        self.tree.set_child(n, Side::Left, gr);
        self.tree.set_child(l, Side::Right, gl);
        self.tree.set_child(g, Side::Left, Some(l));
        self.tree.set_child(g, Side::Right, Some(n));

        self.set_balance(l, if gb == 1 { -1 } else { 0 });
        self.set_balance(n, if gb == -1 { 1 } else { 0 });
        self.set_balance(g, 0);
        self.record(Rotation::RightLeft, n);
        Ok(g)
    }

    /// Restores balance after `n` was linked in as a new leaf.
    fn insert_fix(&mut self, n: NodeId) -> Result<(), Error> {
        let mut child = n;
        while let Some(parent) = self.tree.parent(child) {
            let side = self.tree.side_of(child).ok_or(Error::LinkMismatch{node: child})?;
            let balance = self.update_balance(parent, weight(side));
            trace!("insert fix-up at node {parent}, balance {balance}");
            match balance {
                0 => return Ok(()),
                -1 | 1 => child = parent,
                2 => {
                    let r = self.required_child(parent, Side::Right)?;
                    if self.balance(r) == 1 {
                        self.rotate_left(parent)?;
                    } else {
                        self.rotate_left_right(parent)?;
                    }
                    return Ok(());
                },
                -2 => {
                    let l = self.required_child(parent, Side::Left)?;
                    if self.balance(l) == -1 {
                        self.rotate_right(parent)?;
                    } else {
                        self.rotate_right_left(parent)?;
                    }
                    return Ok(());
                },
                _ => return Err(Error::Unbalanced{node: parent, balance}),
            }
        }
        Ok(())
    }

    /// Restores balance after the `shrunk` subtree of `n` lost one level of
    /// height.
    fn remove_fix(&mut self, mut n: NodeId, mut shrunk: Side) -> Result<(), Error> {
        loop {
            let above = self.tree.parent(n).zip(self.tree.side_of(n));
            let balance = self.update_balance(n, -weight(shrunk));
            trace!("remove fix-up at node {n}, balance {balance}");
            match balance {
                -1 | 1 => return Ok(()),
                0 => (),
                2 | -2 => {
                    let sign = balance / 2;
                    let heavy = shrunk.opposite();
                    let c = self.required_child(n, heavy)?;
                    let cb = self.balance(c);

                    if cb == -sign {
                        if sign > 0 {
                            self.rotate_left_right(n)?;
                        } else {
                            self.rotate_right_left(n)?;
                        }
                    } else {
                        let top = if sign > 0 {
                            self.rotate_left(n)?
                        } else {
                            self.rotate_right(n)?
                        };
                        if cb == 0 {
                            // Height of the rotated subtree is unchanged.
                            self.set_balance(n, sign);
                            self.set_balance(top, -sign);
                            return Ok(());
                        }
                    }
                },
                _ => return Err(Error::Unbalanced{node: n, balance}),
            }

            match above {
                Some((parent, side)) => {
                    n = parent;
                    shrunk = side;
                },
                None => return Ok(()),
            }
        }
    }

    fn check_balance(&self, id: NodeId) -> Result<usize, Error> {
        let node = self.tree.node(id);
        let lheight = match node.left() {
            Some(l) => self.check_balance(l)?,
            None => 0,
        };
        let rheight = match node.right() {
            Some(r) => self.check_balance(r)?,
            None => 0,
        };

        let stored = *node.aux();
        let actual = rheight as i64 - lheight as i64;
        if i64::from(stored) != actual {
            return Err(Error::BalanceMismatch{node: id, stored, actual});
        }
        if !(-1..=1).contains(&stored) {
            return Err(Error::Unbalanced{node: id, balance: stored});
        }
        Ok(cmp::max(lheight, rheight) + 1)
    }
}

impl<K: Ord, V> AVLTree<K, V> {
    /// Inserts `value` under `key`. An existing entry gets its value
    /// replaced in place and the old value is returned; the shape of the
    /// tree does not change in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.raw_insert(key, value) {
            Inserted::Updated(old) => {
                debug!("updated existing entry, {} entries", self.len());
                Some(old)
            },
            Inserted::New(id) => {
                debug!("inserted node {id}, {} entries", self.len());
                if let Err(err) = self.insert_fix(id) {
                    panic!("AVL tree corrupted during insert: {err}");
                }
                None
            }
        }
    }

    /// Removes the entry for `key` and returns its value. Removing an
    /// absent key does nothing.
    ///
    /// A node with two children first trades places with its in-order
    /// predecessor. Handles follow their entries, so the predecessor's
    /// `NodeId` afterwards refers to the vacated position of the removed
    /// node, which keeps that position's balance factor.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        let id = self.tree.find(key)?;

        let node = self.tree.node(id);
        if node.left().is_some() && node.right().is_some() {
            if let Some(pred) = self.tree.predecessor(id) {
                self.node_swap(id, pred);
            }
        }

        let above = self.tree.parent(id).zip(self.tree.side_of(id));
        self.tree.unlink(id);
        if let Some((parent, side)) = above {
            if let Err(err) = self.remove_fix(parent, side) {
                panic!("AVL tree corrupted during remove: {err}");
            }
        }

        let (_, value) = self.tree.release(id);
        debug!("removed node {id}, {} entries", self.len());
        Some(value)
    }

    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.find(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.contains_key(key)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&V, Error>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.lookup(key)
    }

    pub fn balance_of<Q>(&self, key: &Q) -> Result<i8, Error>
    where K: Borrow<Q>, Q: Ord + ?Sized
    {
        self.tree.node_of(key).map(|id| self.balance(id))
    }

    /// Checks every structural invariant: back links, search order, and
    /// that each stored balance factor matches the real height difference
    /// and lies within -1..=1.
    pub fn validate(&self) -> Result<(), Error> {
        self.tree.check_links()?;
        if let Some(root) = self.tree.root() {
            self.check_balance(root)?;
        }
        Ok(())
    }
}

impl<K, V> Default for AVLTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AVLTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AVLTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}

impl<K: Ord, V> Extend<(K, V)> for AVLTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AVLTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, i8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for AVLTree<K, V>
where K: Borrow<Q> + Ord, Q: Ord + ?Sized
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}


#[cfg(test)]
fn test_check_node<K: Ord, V>(t: &AVLTree<K, V>, n: Option<NodeId>) -> usize {
    match n {
        None => 0,
        Some(id) => {
            let node = t.tree.node(id);
            let lheight = test_check_node(t, node.left());
            let rheight = test_check_node(t, node.right());
            if lheight < rheight {
                assert_eq!(lheight + 1, rheight);
                assert_eq!(t.balance(id), 1);
            } else if lheight > rheight {
                assert_eq!(lheight, rheight + 1);
                assert_eq!(t.balance(id), -1);
            } else {
                assert_eq!(t.balance(id), 0);
            }

            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(t.tree.parent(child), Some(id));
            }
            if let Some(l) = node.left() {
                assert!(t.tree.key(l) < node.key());
            }
            if let Some(r) = node.right() {
                assert!(node.key() < t.tree.key(r));
            }

            cmp::max(lheight, rheight) + 1
        }
    }
}

#[cfg(test)]
fn test_check(t: &AVLTree<u32, u32>) {
    if let Some(root) = t.root() {
        assert_eq!(t.tree.parent(root), None);
    }
    assert_eq!(test_check_node(t, t.root()), t.height());
    t.validate().unwrap();
    assert!(t.keys().zip(t.keys().skip(1)).all(|(a, b)| a < b));
    assert_eq!(t.iter().count(), t.len());
}

#[cfg(test)]
fn test_tree(keys: &[u32]) -> AVLTree<u32, u32> {
    let mut t = AVLTree::new();
    for &k in keys {
        t.insert(k, k);
        test_check(&t);
    }
    t
}

#[cfg(test)]
fn test_shape(t: &AVLTree<u32, u32>, id: Option<NodeId>) -> String {
    match id {
        None => ".".to_string(),
        Some(id) => {
            let node = t.tree.node(id);
            if node.is_leaf() {
                node.key().to_string()
            } else {
                format!("{}({} {})", node.key(), test_shape(t, node.left()), test_shape(t, node.right()))
            }
        }
    }
}

#[cfg(test)]
mod scenarios {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::left(&[10, 20, 30], RotationStats{left: 1, ..Default::default()})]
    #[case::right(&[30, 20, 10], RotationStats{right: 1, ..Default::default()})]
    #[case::left_right(&[10, 30, 20], RotationStats{left_right: 1, ..Default::default()})]
    #[case::right_left(&[30, 10, 20], RotationStats{right_left: 1, ..Default::default()})]
    fn test_three_keys_rotate_to_middle(#[case] keys: &[u32], #[case] expected: RotationStats) {
        let t = test_tree(keys);
        assert_eq!(t.rotations(), expected);
        assert_eq!(test_shape(&t, t.root()), "20(10 30)");
        for k in [10, 20, 30] {
            assert_eq!(t.balance_of(&k), Ok(0));
        }
    }

    #[rstest]
    #[case(&[], ".")]
    #[case(&[1], "1")]
    #[case(&[1, 2, 3, 4, 5, 6, 7], "4(2(1 3) 6(5 7))")]
    #[case(&[7, 6, 5, 4, 3, 2, 1], "4(2(1 3) 6(5 7))")]
    #[case(&[50, 25, 75, 10, 30, 27], "30(25(10 27) 50(. 75))")]
    #[case(&[50, 25, 75, 60, 80, 70], "60(50(25 .) 75(70 80))")]
    fn test_insert_shapes(#[case] keys: &[u32], #[case] shape: &str) {
        let t = test_tree(keys);
        assert_eq!(test_shape(&t, t.root()), shape);
    }

    #[rstest]
    #[case::leaf_no_rotation(&[1, 2, 3, 4, 5, 6, 7], 1, "4(2(. 3) 6(5 7))", 0)]
    #[case::single_rotation_keeps_height(&[2, 1, 4, 3, 5], 1, "4(2(. 3) 5)", 1)]
    #[case::double_rotation(&[5, 2, 8, 3], 8, "3(2 5)", 1)]
    #[case::two_children_uses_predecessor(&[4, 2, 6, 1, 3, 5, 7], 4, "3(2(1 .) 6(5 7))", 0)]
    #[case::root_leaf(&[1], 1, ".", 0)]
    fn test_remove_shapes(#[case] keys: &[u32], #[case] remove: u32, #[case] shape: &str,
                          #[case] rotations: usize) {
        let mut t = test_tree(keys);
        t.reset_rotations();
        assert_eq!(t.remove(&remove), Some(remove));
        test_check(&t);
        assert_eq!(test_shape(&t, t.root()), shape);
        assert_eq!(t.rotations().total(), rotations);
    }
}

#[test]
fn test_remove_single_rotation_balances() {
    let mut t = test_tree(&[2, 1, 4, 3, 5]);
    t.remove(&1);
    assert_eq!(t.balance_of(&4), Ok(-1));
    assert_eq!(t.balance_of(&2), Ok(1));
    assert_eq!(t.rotations().left, 1);
}

#[test]
fn test_remove_propagates_past_rotation() {
    // Fibonacci shaped: every inner node leans right.
    let mut t = test_tree(&[5, 2, 8, 1, 3, 6, 10, 4, 7, 9, 11, 12]);
    assert_eq!(t.rotations().total(), 0);
    assert_eq!(t.balance_of(&5), Ok(1));

    // The rotation at 2 shrinks the left subtree of 5, which rotates too.
    t.remove(&1);
    test_check(&t);
    assert_eq!(t.rotations(), RotationStats{left: 2, ..Default::default()});
    assert_eq!(test_shape(&t, t.root()), "8(5(3(2 4) 6(. 7)) 10(9 11(. 12)))");
}

#[test]
fn test_balanced_remove_min() {
    let mut t = test_tree(&[1, 2, 3, 4, 5, 6, 7]);
    let before = t.rotations().total();
    t.remove(&1);
    test_check(&t);
    assert_eq!(t.len(), 6);
    assert!(t.rotations().total() - before <= 1);
}

#[test]
fn test_duplicate_insert() {
    let mut t = test_tree(&[10, 20, 30, 40]);
    let rotations = t.rotations();
    let root = t.root();
    assert_eq!(t.insert(30, 300), Some(30));
    assert_eq!(t.len(), 4);
    assert_eq!(t.get(&30), Some(&300));
    assert_eq!(t.rotations(), rotations);
    assert_eq!(t.root(), root);
    test_check(&t);
}

#[test]
fn test_remove_absent() {
    let mut t = test_tree(&[10, 20, 30]);
    assert_eq!(t.remove(&15), None);
    assert_eq!(t.remove(&15), None);
    assert_eq!(t.len(), 3);
    assert_eq!(t.rotations().total(), 1);
    test_check(&t);

    let mut e: AVLTree<u32, u32> = AVLTree::new();
    assert_eq!(e.remove(&1), None);
    assert!(e.is_empty());
}

#[test]
fn test_lookup() {
    let t = test_tree(&[10, 20, 30]);
    assert_eq!(t.lookup(&20), Ok(&20));
    assert_eq!(t.lookup(&25), Err(Error::KeyNotFound));
    assert_eq!(t.balance_of(&25), Err(Error::KeyNotFound));
    assert_eq!(t[&30], 30);
}

#[test]
fn test_handles_survive_rebalancing() {
    let mut t = AVLTree::new();
    t.insert(1, 1);
    let id = t.find(&1).unwrap();
    for k in 2..64 {
        t.insert(k, k);
    }
    assert_eq!(t.tree().key(id), &1);
    t.remove(&2);
    t.remove(&4);
    assert_eq!(t.tree().key(id), &1);
    test_check(&t);
}

#[test]
fn test_remove_moves_predecessor_handle() {
    let mut t = test_tree(&[20, 10, 30]);
    let n10 = t.find(&10).unwrap();
    let n30 = t.find(&30).unwrap();
    assert_eq!(t.tree().parent(n10), t.root());

    assert_eq!(t.remove(&20), Some(20));
    assert_eq!(t.root(), Some(n10));
    assert_eq!(t.tree().key(n10), &10);
    assert_eq!(t.tree().right(n10), Some(n30));
    assert_eq!(t.tree().left(n10), None);
    assert_eq!(t.balance(n10), 1);
    assert_eq!(t.rotations().total(), 0);
    test_check(&t);
}

#[test]
fn test_validate_detects_corruption() {
    let mut t = test_tree(&[10, 20, 30]);
    let root = t.root().unwrap();
    t.set_balance(root, 1);
    assert_eq!(t.validate(), Err(Error::BalanceMismatch{node: root, stored: 1, actual: 0}));
}

#[test]
fn test_insert_delete_sequential() {
    let mut t = AVLTree::new();

    for i in 0..128 {
        assert_eq!(t.insert(i, i), None);
        test_check(&t);
    }
    assert_eq!(t.len(), 128);
    assert!(t.height() <= 8);

    for i in 0..128 {
        assert_eq!(t.remove(&i), Some(i));
        test_check(&t);
        assert_eq!(t.len(), (127 - i) as usize);
    }
    assert!(t.root().is_none());
}

#[test]
fn test_insert_delete_sequential_rev() {
    let mut t = AVLTree::new();

    for i in 0..128 {
        t.insert(i, i);
    }
    for i in (0..128).rev() {
        assert_eq!(t.remove(&i), Some(i));
        test_check(&t);
    }
    assert!(t.is_empty());
}

#[test]
fn test_insert_delete_strided() {
    let mut t = AVLTree::new();

    for i in (0..256).step_by(4) {
        for j in [0, 2, 3, 1] {
            t.insert(i + j, i + j);
            test_check(&t);
            t.insert(i + 256 + j, i + 256 + j);
            test_check(&t);
        }
    }
    assert_eq!(t.len(), 512);
    assert_eq!(t.iter().count(), 512);
    assert_eq!(t.first_key_value(), Some((&0, &0)));
    assert_eq!(t.last_key_value(), Some((&511, &511)));

    for i in (0..256).step_by(4) {
        for j in [0, 2, 3, 1] {
            assert_eq!(t.remove(&(i + j)), Some(i + j));
            test_check(&t);
            assert!(!t.contains_key(&(i + j)));
        }
    }
    assert_eq!(t.len(), 256);

    for i in (0..256).step_by(4).rev() {
        for j in [0, 2, 3, 1].iter().rev() {
            assert_eq!(t.remove(&(i + 256 + j)), Some(i + 256 + j));
            test_check(&t);
        }
    }
    assert!(t.root().is_none());
}

#[test]
fn test_collect_extend_debug() {
    let mut t: AVLTree<u32, u32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();
    t.extend([(5, 50), (4, 40)]);
    test_check(&t);
    assert_eq!(format!("{t:?}"), "{1: 10, 2: 20, 3: 30, 4: 40, 5: 50}");
    assert_eq!((&t).into_iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    *t.get_mut(&4).unwrap() = 44;
    assert_eq!(t.values().copied().collect::<Vec<_>>(), vec![10, 20, 30, 44, 50]);
    t.clear();
    assert!(t.is_empty());
}
