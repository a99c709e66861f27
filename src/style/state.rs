//! Per-node style state: a default snapshot and the active one.

use std::sync::Arc;

use super::node_style::NodeStyle;

/// Which snapshot is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePhase {
    /// Still showing the per-kind default.
    Default,
    /// A resolved snapshot has been installed. Never reverts.
    Active,
}

/// What changed when a new snapshot was installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleUpdate {
    pub layout_changed: bool,
    pub inherited_changed: bool,
}

/// Holds a node's default and active style snapshots.
#[derive(Debug, Clone)]
pub struct StyleState {
    default: Arc<NodeStyle>,
    active: Arc<NodeStyle>,
    phase: StylePhase,
}

impl StyleState {
    pub fn new(default: Arc<NodeStyle>) -> Self {
        Self {
            active: Arc::clone(&default),
            default,
            phase: StylePhase::Default,
        }
    }

    pub fn default_style(&self) -> &Arc<NodeStyle> {
        &self.default
    }

    pub fn active(&self) -> &Arc<NodeStyle> {
        &self.active
    }

    pub fn phase(&self) -> StylePhase {
        self.phase
    }

    /// Install a freshly resolved snapshot and report what it changed.
    pub fn set_current(&mut self, style: NodeStyle) -> StyleUpdate {
        let update = StyleUpdate {
            layout_changed: style.has_layout_changes(),
            inherited_changed: style.has_inherited_changes(),
        };
        self.active = Arc::new(style);
        self.phase = StylePhase::Active;
        update
    }

    /// Clear the diff flags on the active snapshot.
    pub fn mark_changes_seen(&mut self) {
        if self.active.has_inherited_changes() || self.active.has_layout_changes() {
            Arc::make_mut(&mut self.active).mark_changes_seen();
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::node_style::{PropertyMap, DEFAULT_ROOT_FONT_SIZE};
    use crate::style::value::{Color, StyleValue};

    #[test]
    fn starts_with_default() {
        let default = Arc::new(NodeStyle::from_values([("opacity", StyleValue::Float(1.0))]));
        let state = StyleState::new(Arc::clone(&default));
        assert_eq!(state.phase(), StylePhase::Default);
        assert!(Arc::ptr_eq(state.active(), &default));
    }

    #[test]
    fn set_current_activates_and_reports() {
        let mut state = StyleState::new(Arc::new(NodeStyle::new()));
        let mut cascaded = PropertyMap::new();
        cascaded.insert("color", StyleValue::Color(Color::WHITE));
        let style = NodeStyle::build(
            state.default_style(),
            &cascaded,
            None,
            DEFAULT_ROOT_FONT_SIZE,
            state.active(),
        );

        let update = state.set_current(style);
        assert_eq!(state.phase(), StylePhase::Active);
        assert!(update.inherited_changed);
        assert!(update.layout_changed);

        state.mark_changes_seen();
        assert!(!state.active().has_inherited_changes());
        assert_eq!(state.active().color(), Some(Color::WHITE));
    }

    #[test]
    fn never_reverts_to_default() {
        let mut state = StyleState::new(Arc::new(NodeStyle::new()));
        state.set_current(NodeStyle::new());
        state.set_current(NodeStyle::new());
        assert_eq!(state.phase(), StylePhase::Active);
    }
}
