//! Tree operations: insert, attach, detach, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Node, NodeId};
use super::NodeError;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The node arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps; only containers get a child list. Pseudo-nodes are
/// ordinary members of their parent's child list, first (`::before`) and last
/// (`::after`).
#[derive(Debug)]
pub struct Tree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached node.
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let container = node.is_container();
        let id = self.nodes.insert(node);
        if container {
            self.children.insert(id, Vec::new());
        }
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Make `child` the child of `parent` at `index` (clamped to the end).
    ///
    /// A child that already has a parent is detached first.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), NodeError> {
        if !self.nodes.contains_key(child) {
            return Err(NodeError::MissingNode(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(NodeError::MissingNode(parent));
        }
        if !self.children.contains_key(parent) {
            return Err(NodeError::NotAContainer(parent));
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(NodeError::Cycle { parent, child });
        }
        self.detach(child);

        let siblings = self
            .children
            .get_mut(parent)
            .ok_or(NodeError::NotAContainer(parent))?;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.parent.insert(child, parent);
        Ok(())
    }

    /// Detach `child` from its parent. Returns the old parent and index.
    pub fn detach(&mut self, child: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent.remove(child)?;
        let siblings = self.children.get_mut(parent)?;
        let index = siblings.iter().position(|&c| c == child)?;
        siblings.remove(index);
        Some((parent, index))
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `Node` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let node = self.nodes.remove(current);
            if current == id {
                removed = node;
            }
        }

        removed
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Every child including pseudo-nodes, in document order.
    pub fn child_nodes(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Author-facing children: pseudo-nodes excluded.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.child_nodes(id)
            .iter()
            .copied()
            .filter(|&child| self.nodes.get(child).is_some_and(|n| !n.is_pseudo()))
            .collect()
    }

    /// Position of `child` in `parent`'s full child list.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.child_nodes(parent).iter().position(|&c| c == child)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, NodeError> {
        self.nodes.get(id).ok_or(NodeError::MissingNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, NodeError> {
        self.nodes.get_mut(id).ok_or(NodeError::MissingNode(id))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`, pseudo-nodes
    /// included: self, `::before`, children, `::after`.
    pub fn walk(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.child_nodes(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
