//! Node arena: slotmap-backed tree with class/id/selector queries.

pub mod factory;
pub mod node;
pub mod query;
pub mod tree;

pub use factory::{ComponentFactory, DefaultFactory};
pub use node::{ClassList, Component, Dirty, Node, NodeId};
pub use tree::Tree;

use crate::css::parser::ParseError;
use crate::css::properties::PropertyError;

/// Errors from structural node operations.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("unknown property name specified, '{0}'")]
    InvalidProperty(String),
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),
    #[error("node {0:?} cannot have children")]
    NotAContainer(NodeId),
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("pseudo-element node {0:?} is owned by its parent and cannot be moved")]
    PseudoNode(NodeId),
    #[error("node {child:?} cannot be attached below itself")]
    Cycle { parent: NodeId, child: NodeId },
    #[error(transparent)]
    Style(#[from] PropertyError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
