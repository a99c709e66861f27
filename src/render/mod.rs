//! Paint backend seam.
//!
//! The document never draws. Once per tick it hands each node whose style was
//! re-resolved to [`Renderer::apply_style`], and after a layout pass each node
//! whose box moved to [`Renderer::apply_layout`].

use crate::dom::node::{ClassList, Node, NodeId};
use crate::geometry::Region;

pub trait Renderer {
    /// Push a node's active style (and text) to the backend.
    fn apply_style(&mut self, id: NodeId, node: &Node);

    /// Push a node's computed box, relative to its parent.
    fn apply_layout(&mut self, id: NodeId, region: Region);

    /// A node's class list changed.
    fn class_changed(&mut self, _id: NodeId, _classes: &ClassList) {}

    /// A node was destroyed.
    fn destroyed(&mut self, _id: NodeId) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn apply_style(&mut self, _id: NodeId, _node: &Node) {}

    fn apply_layout(&mut self, _id: NodeId, _region: Region) {}
}
