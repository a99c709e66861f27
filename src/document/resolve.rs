//! Style resolution: cascade, layout application, snapshot, recursion.

use tracing::{trace, warn};

use crate::css::model::PseudoElement;
use crate::dom::node::{Node, NodeId};
use crate::layout::property::LayoutValue;
use crate::style::cascade;
use crate::style::node_style::NodeStyle;
use crate::style::rule::layout_subset;

use super::Document;

impl Document {
    /// Resolve `id` now. With `recursive`, or when inherited values changed,
    /// descends into `::before`, the author children and `::after`, in that
    /// order.
    pub(crate) fn resolve(&mut self, id: NodeId, recursive: bool) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.dirty.resolve = false;
        node.dirty.recursive = false;
        self.current.resolves += 1;
        trace!(?id, tag = node.tag(), recursive, "resolve");

        let inline = node.inline.clone();
        let inline_layouts = layout_subset(&inline);
        let component = node.component();
        let parent = self.tree.parent(id);

        let rules = match (component.pseudo(), parent) {
            (Some(kind), Some(parent)) => self
                .tree
                .get(parent)
                .map(|owner| owner.pseudo_rules(kind).to_vec())
                .unwrap_or_default(),
            (Some(_), None) => Vec::new(),
            (None, _) => self.matcher.matched_rules(&self.tree, id),
        };

        let threshold = self.config.important_threshold;
        let merged = cascade::merge(&rules, &inline, threshold);
        let layouts = cascade::layout_values(&rules, &inline_layouts, threshold);
        let layout_updated = self.apply_layout_values(id, layouts);

        let parent_style = parent
            .and_then(|parent| self.tree.get(parent))
            .map(|parent| Node::style(parent).clone());
        let root_font_size = self.config.root_font_size;

        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let style = NodeStyle::build(
            node.style.default_style(),
            &merged,
            parent_style.as_deref(),
            root_font_size,
            node.style.active(),
        );
        if component.pseudo().is_some() {
            node.text = style
                .get("content")
                .and_then(|content| content.as_text())
                .map(str::to_owned);
        }
        let update = node.style.set_current(style);
        node.style.mark_changes_seen();
        node.dirty.style = true;

        if update.layout_changed || layout_updated {
            self.request_layout(id);
        }

        if component.is_container() && (update.inherited_changed || recursive) {
            self.resolve_pseudo(id, PseudoElement::Before);
            for child in self.tree.children(id) {
                self.resolve(child, true);
            }
            self.resolve_pseudo(id, PseudoElement::After);
        }
    }

    /// Re-match `kind` for `owner`, create or remove the pseudo-node to
    /// match, and resolve it.
    fn resolve_pseudo(&mut self, owner: NodeId, kind: PseudoElement) {
        let rules = match kind {
            PseudoElement::Before => self.matcher.matched_before(&self.tree, owner),
            PseudoElement::After => self.matcher.matched_after(&self.tree, owner),
        };
        let wanted = !rules.is_empty();
        if let Some(node) = self.tree.get_mut(owner) {
            match kind {
                PseudoElement::Before => node.before_rules = rules,
                PseudoElement::After => node.after_rules = rules,
            }
        }

        if !wanted {
            self.remove_pseudo(owner, kind);
            return;
        }
        if let Some(pseudo) = self.add_pseudo(owner, kind) {
            self.resolve(pseudo, false);
        }
    }

    /// Swap the node's applied layout values for `layouts`. Previously
    /// applied properties are reset to the per-kind default first, then the
    /// new values are written in cascade order. Returns whether any layout
    /// value was involved.
    fn apply_layout_values(&mut self, id: NodeId, layouts: Vec<LayoutValue>) -> bool {
        let Some(engine) = self.layout.as_mut() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        let previous = std::mem::take(&mut node.applied_layouts);
        let updated = !previous.is_empty() || !layouts.is_empty();

        if updated {
            if let Some(handle) = node.layout {
                let default = node.component().default_layout();
                let edit = engine.update_style(handle, |style| {
                    for value in &previous {
                        value.set_default(style, &default);
                    }
                    for value in &layouts {
                        value.set(style);
                    }
                });
                if let Err(err) = edit {
                    warn!(?id, %err, "failed to apply layout values");
                }
            }
        }
        node.applied_layouts = layouts;
        updated
    }
}
