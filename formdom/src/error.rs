//! Document error types.

use thiserror::Error;

use crate::element::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("no node with id {0} in this document")]
    UnknownNode(NodeId),
    #[error("node {0} has no parent")]
    Detached(NodeId),
    #[error("cannot insert node {node} into its own subtree")]
    Cycle { node: NodeId },
}
