//! TaffyTree wrapper: the shadow layout tree.
//!
//! Every tree node owns one taffy node, created with the node's per-kind
//! default style. Structure is mirrored edit by edit: a child inserted at
//! index `i` in the node tree is inserted at index `i` here. Layout passes are
//! coalesced: any number of requests within a tick produce one
//! [`compute`](LayoutEngine::compute).

use taffy::prelude::*;
use taffy::TaffyResult;
use tracing::debug;

use crate::dom::node::NodeId as TreeNodeId;
use crate::geometry::Region;

/// Shadow layout tree, parameterized with the owning tree node as context.
pub struct LayoutEngine {
    tree: TaffyTree<TreeNodeId>,
    root: Option<NodeId>,
    requested: bool,
    passes: usize,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            root: None,
            requested: false,
            passes: 0,
        }
    }

    /// Create a detached layout node for `owner`.
    pub fn new_node(&mut self, owner: TreeNodeId, style: Style) -> TaffyResult<NodeId> {
        self.tree.new_leaf_with_context(style, owner)
    }

    /// The node [`compute`](Self::compute) lays out from.
    pub fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Insert `child` under `parent` at `index`.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> TaffyResult<()> {
        let index = index.min(self.tree.child_count(parent));
        self.tree.insert_child_at_index(parent, index, child)
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> TaffyResult<()> {
        self.tree.add_child(parent, child)
    }

    /// Detach `child` from `parent`; the child node stays alive.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> TaffyResult<()> {
        self.tree.remove_child(parent, child).map(|_| ())
    }

    /// Drop a layout node for good.
    pub fn delete(&mut self, node: NodeId) -> TaffyResult<()> {
        if self.root == Some(node) {
            self.root = None;
        }
        self.tree.remove(node).map(|_| ())
    }

    pub fn children(&self, parent: NodeId) -> TaffyResult<Vec<NodeId>> {
        self.tree.children(parent)
    }

    pub fn owner(&self, node: NodeId) -> Option<TreeNodeId> {
        self.tree.get_node_context(node).copied()
    }

    pub fn style(&self, node: NodeId) -> TaffyResult<&Style> {
        self.tree.style(node)
    }

    /// Edit a node's style in place.
    pub fn update_style(&mut self, node: NodeId, edit: impl FnOnce(&mut Style)) -> TaffyResult<()> {
        let mut style = self.tree.style(node)?.clone();
        edit(&mut style);
        self.tree.set_style(node, style)
    }

    /// Ask for a layout pass at the end of the tick. Returns `true` if this
    /// call made the request (none was pending yet).
    pub fn request_layout(&mut self) -> bool {
        !std::mem::replace(&mut self.requested, true)
    }

    pub fn is_layout_requested(&self) -> bool {
        self.requested
    }

    /// Run the pending layout pass, if any, against `viewport`.
    ///
    /// Returns whether a pass ran.
    pub fn compute(&mut self, viewport: Size<f32>) -> TaffyResult<bool> {
        let Some(root) = self.root else {
            return Ok(false);
        };
        if !self.requested {
            return Ok(false);
        }
        self.requested = false;
        self.tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(viewport.width),
                height: AvailableSpace::Definite(viewport.height),
            },
        )?;
        self.passes += 1;
        debug!(pass = self.passes, nodes = self.tree.total_node_count(), "layout pass");
        Ok(true)
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The computed box of `node`, relative to its parent.
    pub fn layout(&self, node: NodeId) -> Option<Region> {
        let layout = self.tree.layout(node).ok()?;
        Some(Region::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        ))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owners(n: usize) -> Vec<TreeNodeId> {
        let mut arena: SlotMap<TreeNodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn column() -> Style {
        Style {
            flex_direction: FlexDirection::Column,
            ..Default::default()
        }
    }

    fn fixed(height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::from_percent(1.0),
                height: Dimension::from_length(height),
            },
            ..Default::default()
        }
    }

    #[test]
    fn insert_at_index_mirrors_order() {
        let ids = owners(4);
        let mut engine = LayoutEngine::new();
        let root = engine.new_node(ids[0], column()).unwrap();
        let a = engine.new_node(ids[1], Style::default()).unwrap();
        let b = engine.new_node(ids[2], Style::default()).unwrap();
        let c = engine.new_node(ids[3], Style::default()).unwrap();

        engine.append(root, a).unwrap();
        engine.append(root, c).unwrap();
        engine.insert(root, 1, b).unwrap();
        assert_eq!(engine.children(root).unwrap(), vec![a, b, c]);

        engine.remove(root, b).unwrap();
        assert_eq!(engine.children(root).unwrap(), vec![a, c]);
        assert_eq!(engine.owner(b), Some(ids[2]));
    }

    #[test]
    fn requests_coalesce() {
        let mut engine = LayoutEngine::new();
        assert!(engine.request_layout());
        assert!(!engine.request_layout());
        assert!(engine.is_layout_requested());
    }

    #[test]
    fn compute_runs_once_per_request() {
        let ids = owners(3);
        let mut engine = LayoutEngine::new();
        let root = engine
            .new_node(
                ids[0],
                Style {
                    size: Size {
                        width: Dimension::from_length(100.0),
                        height: Dimension::from_length(200.0),
                    },
                    ..column()
                },
            )
            .unwrap();
        let a = engine.new_node(ids[1], fixed(30.0)).unwrap();
        let b = engine.new_node(ids[2], fixed(20.0)).unwrap();
        engine.append(root, a).unwrap();
        engine.append(root, b).unwrap();
        engine.set_root(root);

        let viewport = Size {
            width: 100.0,
            height: 200.0,
        };
        assert!(!engine.compute(viewport).unwrap());

        engine.request_layout();
        engine.request_layout();
        assert!(engine.compute(viewport).unwrap());
        assert!(!engine.compute(viewport).unwrap());
        assert_eq!(engine.passes(), 1);

        assert_eq!(engine.layout(b), Some(Region::new(0.0, 30.0, 100.0, 20.0)));
    }

    #[test]
    fn update_style_edits_in_place() {
        let ids = owners(1);
        let mut engine = LayoutEngine::new();
        let node = engine.new_node(ids[0], Style::default()).unwrap();
        engine
            .update_style(node, |style| style.flex_grow = 2.0)
            .unwrap();
        assert_eq!(engine.style(node).unwrap().flex_grow, 2.0);
    }
}
