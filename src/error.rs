use crate::bst::{NodeId, Side};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lookup that was required to resolve to a node came back empty.
    #[error("key not found")]
    KeyNotFound,
    #[error("node {node} has no {side} child")]
    MissingChild { node: NodeId, side: Side },
    #[error("parent/child links of node {node} are inconsistent")]
    LinkMismatch { node: NodeId },
    #[error("node {node} violates the search tree ordering")]
    OrderViolation { node: NodeId },
    #[error("node {node} stores balance {stored}, but its subtrees differ by {actual}")]
    BalanceMismatch { node: NodeId, stored: i8, actual: i64 },
    #[error("node {node} is out of balance ({balance})")]
    Unbalanced { node: NodeId, balance: i8 },
}
