//! `::before` / `::after` node management.

use tracing::warn;

use crate::css::model::PseudoElement;
use crate::dom::node::{Node, NodeId};

use super::Document;

impl Document {
    /// Ensure `owner` has a `::before` node. Idempotent; `None` for leaves.
    pub fn add_before(&mut self, owner: NodeId) -> Option<NodeId> {
        self.add_pseudo(owner, PseudoElement::Before)
    }

    /// Ensure `owner` has an `::after` node. Idempotent; `None` for leaves.
    pub fn add_after(&mut self, owner: NodeId) -> Option<NodeId> {
        self.add_pseudo(owner, PseudoElement::After)
    }

    /// Destroy `owner`'s `::before` node, if any.
    pub fn remove_before(&mut self, owner: NodeId) {
        self.remove_pseudo(owner, PseudoElement::Before);
    }

    /// Destroy `owner`'s `::after` node, if any.
    pub fn remove_after(&mut self, owner: NodeId) {
        self.remove_pseudo(owner, PseudoElement::After);
    }

    pub fn pseudo(&self, owner: NodeId, kind: PseudoElement) -> Option<NodeId> {
        let node = self.tree.get(owner)?;
        match kind {
            PseudoElement::Before => node.before(),
            PseudoElement::After => node.after(),
        }
    }

    /// The `::before` node goes first among the owner's child nodes, the
    /// `::after` node last.
    pub(crate) fn add_pseudo(&mut self, owner: NodeId, kind: PseudoElement) -> Option<NodeId> {
        let node = self.tree.get(owner)?;
        if !node.is_container() {
            return None;
        }
        if let Some(existing) = self.pseudo(owner, kind) {
            return Some(existing);
        }

        let pseudo_node = self.factory.create_pseudo(kind);
        let pseudo = self.adopt(pseudo_node);
        let index = match kind {
            PseudoElement::Before => 0,
            PseudoElement::After => self.tree.child_nodes(owner).len(),
        };
        if let Err(err) = self.attach_structural(owner, pseudo, index) {
            warn!(?owner, %err, "failed to attach pseudo-element");
            self.destroy_node(pseudo);
            return None;
        }
        if let Some(node) = self.tree.get_mut(owner) {
            *node.pseudo_slot(kind) = Some(pseudo);
        }
        self.mark_dirty(pseudo, true);
        Some(pseudo)
    }

    pub(crate) fn remove_pseudo(&mut self, owner: NodeId, kind: PseudoElement) {
        let pseudo = self
            .tree
            .get_mut(owner)
            .and_then(|node| node.pseudo_slot(kind).take());
        if let Some(pseudo) = pseudo {
            if self.tree.get(pseudo).is_some_and(Node::is_pseudo) {
                self.destroy_node(pseudo);
            }
        }
    }
}
