//! Per-tick callback registry.
//!
//! Every live node registers exactly one callback. A tick visits callbacks in
//! registration order; cancelling removes the callback immediately, so a node
//! destroyed mid-tick is skipped.

use slotmap::{new_key_type, SlotMap};

use crate::dom::node::NodeId;

new_key_type! {
    /// Handle to a registered per-tick callback.
    pub struct CallbackId;
}

#[derive(Debug, Default)]
pub struct Scheduler {
    callbacks: SlotMap<CallbackId, NodeId>,
    order: Vec<CallbackId>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `node`.
    pub fn register(&mut self, node: NodeId) -> CallbackId {
        let id = self.callbacks.insert(node);
        self.order.push(id);
        id
    }

    /// Cancel a callback. Returns `false` if it was already cancelled.
    pub fn cancel(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.callbacks.contains_key(id)
    }

    /// The node a live callback belongs to.
    pub fn owner(&self, id: CallbackId) -> Option<NodeId> {
        self.callbacks.get(id).copied()
    }

    /// Live callbacks in registration order. Drops cancelled entries.
    pub fn pending(&mut self) -> Vec<(CallbackId, NodeId)> {
        let callbacks = &self.callbacks;
        self.order.retain(|id| callbacks.contains_key(*id));
        self.order
            .iter()
            .filter_map(|&id| callbacks.get(id).map(|&node| (id, node)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn node_ids(n: usize) -> Vec<NodeId> {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn runs_in_registration_order() {
        let nodes = node_ids(3);
        let mut scheduler = Scheduler::new();
        for &node in nodes.iter().rev() {
            scheduler.register(node);
        }
        let order: Vec<NodeId> = scheduler.pending().into_iter().map(|(_, n)| n).collect();
        assert_eq!(order, vec![nodes[2], nodes[1], nodes[0]]);
    }

    #[test]
    fn cancel_removes_immediately() {
        let nodes = node_ids(2);
        let mut scheduler = Scheduler::new();
        let a = scheduler.register(nodes[0]);
        let _b = scheduler.register(nodes[1]);

        assert!(scheduler.cancel(a));
        assert!(!scheduler.cancel(a));
        assert!(!scheduler.is_registered(a));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.owner(a), None);
    }
}
