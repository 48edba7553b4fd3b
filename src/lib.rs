//! Ordered maps on binary search trees with parent links, kept height
//! balanced by AVL rotations.
//!
//! [`BinarySearchTree`] provides the unbalanced tree, [`AVLTree`] layers the
//! balance factor bookkeeping and the rotations on top of it.

pub mod avl_tree;
pub mod bst;
pub mod dot;
mod error;

pub use avl_tree::{AVLTree, Rotation, RotationStats};
pub use bst::{BinarySearchTree, Inserted, NodeId, Side};
pub use dot::Dot;
pub use error::Error;
