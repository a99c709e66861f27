//! A renderer that records every call it receives.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::node::{ClassList, Node, NodeId};
use crate::geometry::Region;
use crate::render::Renderer;

/// Everything a [`RecordingRenderer`] has seen, in call order.
#[derive(Debug, Default, Clone)]
pub struct Recording {
    pub styles: Vec<NodeId>,
    pub layouts: Vec<(NodeId, Region)>,
    pub class_changes: Vec<NodeId>,
    pub destroyed: Vec<NodeId>,
}

impl Recording {
    /// Number of style applications delivered for `id`.
    pub fn style_count(&self, id: NodeId) -> usize {
        self.styles.iter().filter(|&&seen| seen == id).count()
    }

    /// The last box delivered for `id`.
    pub fn last_layout(&self, id: NodeId) -> Option<Region> {
        self.layouts
            .iter()
            .rev()
            .find(|(seen, _)| *seen == id)
            .map(|(_, region)| *region)
    }
}

/// Cloneable handle: clones share one [`Recording`].
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    recording: Rc<RefCell<Recording>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn recording(&self) -> Recording {
        self.recording.borrow().clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        *self.recording.borrow_mut() = Recording::default();
    }
}

impl Renderer for RecordingRenderer {
    fn apply_style(&mut self, id: NodeId, _node: &Node) {
        self.recording.borrow_mut().styles.push(id);
    }

    fn apply_layout(&mut self, id: NodeId, region: Region) {
        self.recording.borrow_mut().layouts.push((id, region));
    }

    fn class_changed(&mut self, id: NodeId, _classes: &ClassList) {
        self.recording.borrow_mut().class_changes.push(id);
    }

    fn destroyed(&mut self, id: NodeId) {
        self.recording.borrow_mut().destroyed.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Component;
    use slotmap::SlotMap;

    #[test]
    fn clones_share_one_recording() {
        let mut ids: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let handle = RecordingRenderer::new();
        let mut renderer = handle.clone();

        let node = Node::new("view", Component::View);
        renderer.apply_style(a, &node);
        renderer.apply_style(a, &node);
        renderer.apply_layout(a, Region::new(0.0, 0.0, 10.0, 5.0));

        let recording = handle.recording();
        assert_eq!(recording.style_count(a), 2);
        assert_eq!(recording.last_layout(a), Some(Region::new(0.0, 0.0, 10.0, 5.0)));

        handle.clear();
        assert!(renderer.recording().styles.is_empty());
    }
}
