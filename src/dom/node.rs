//! Node types: NodeId, Node, ClassList, Component.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, LazyLock};

use slotmap::new_key_type;
use taffy::prelude::*;

use crate::css::model::PseudoElement;
use crate::geometry::Region;
use crate::layout::property::LayoutValue;
use crate::scheduler::CallbackId;
use crate::style::node_style::{NodeStyle, PropertyMap};
use crate::style::rule::RuleMatch;
use crate::style::state::StyleState;
use crate::style::value::{Color, StyleValue};

new_key_type! {
    /// Unique identifier for a node. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// ClassList
// ---------------------------------------------------------------------------

static EMPTY_CLASSES: LazyLock<Arc<BTreeSet<String>>> = LazyLock::new(Default::default);

/// A node's class set.
///
/// Every empty list shares one allocation; clearing a list points it back at
/// that shared value.
#[derive(Debug, Clone)]
pub struct ClassList(Arc<BTreeSet<String>>);

impl ClassList {
    pub fn new() -> Self {
        Self(Arc::clone(&EMPTY_CLASSES))
    }

    /// Split a `className` string on whitespace.
    pub fn parse(value: &str) -> Self {
        let classes: BTreeSet<String> = value.split_whitespace().map(str::to_owned).collect();
        if classes.is_empty() {
            Self::new()
        } else {
            Self(Arc::new(classes))
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn insert(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        Arc::make_mut(&mut self.0).insert(class.to_owned())
    }

    /// Remove a class. Returns `false` if it was absent.
    pub fn remove(&mut self, class: &str) -> bool {
        if !self.contains(class) {
            return false;
        }
        Arc::make_mut(&mut self.0).remove(class);
        if self.0.is_empty() {
            self.clear();
        }
        true
    }

    pub fn clear(&mut self) {
        self.0 = Arc::clone(&EMPTY_CLASSES);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this list is the shared empty singleton.
    pub fn is_shared_empty(&self) -> bool {
        Arc::ptr_eq(&self.0, &EMPTY_CLASSES)
    }

    pub fn ptr_eq(&self, other: &ClassList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for ClassList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ClassList {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// The kind of a node, with its per-kind defaults and child hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Generic container.
    View,
    /// Container that refuses nested buttons.
    Button,
    /// Text leaf.
    Text,
    /// Synthetic `::before` / `::after` node.
    Pseudo(PseudoElement),
}

static BASE_STYLE: LazyLock<Arc<NodeStyle>> = LazyLock::new(|| {
    Arc::new(NodeStyle::from_values([
        ("color", StyleValue::Color(Color::BLACK)),
        ("opacity", StyleValue::Float(1.0)),
        ("visibility", StyleValue::keyword("visible")),
    ]))
});

static BUTTON_STYLE: LazyLock<Arc<NodeStyle>> = LazyLock::new(|| {
    let mut style = NodeStyle::clone(&BASE_STYLE);
    style.set("background-color", StyleValue::Color(Color::rgb8(0xe0, 0xe0, 0xe0)));
    style.set("cursor", StyleValue::keyword("pointer"));
    Arc::new(style)
});

impl Component {
    /// Whether nodes of this kind own children (and pseudo-nodes).
    pub fn is_container(self) -> bool {
        matches!(self, Self::View | Self::Button)
    }

    pub fn pseudo(self) -> Option<PseudoElement> {
        match self {
            Self::Pseudo(kind) => Some(kind),
            _ => None,
        }
    }

    /// Insert hook. Returning `false` rejects the child.
    pub fn accepts_child(self, child: Component, _index: usize) -> bool {
        match self {
            Self::View => true,
            Self::Button => child != Self::Button,
            Self::Text | Self::Pseudo(_) => false,
        }
    }

    /// Delete hook. Returning `false` keeps the child in place.
    pub fn releases_child(self, _child: Component) -> bool {
        self.is_container()
    }

    /// The style a fresh node of this kind starts with.
    pub fn default_style(self) -> Arc<NodeStyle> {
        match self {
            Self::Button => Arc::clone(&BUTTON_STYLE),
            _ => Arc::clone(&BASE_STYLE),
        }
    }

    /// The layout style that removed layout properties reset to. Built per
    /// call: taffy styles are not `Sync`, so they cannot live in a static.
    pub fn default_layout(self) -> Style {
        match self {
            Self::View => Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                ..Default::default()
            },
            Self::Button => Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                align_items: Some(AlignItems::Center),
                ..Default::default()
            },
            Self::Text | Self::Pseudo(_) => Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Pending work for the next tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dirty {
    /// Style must be re-resolved.
    pub resolve: bool,
    /// Resolution must recurse into children and pseudo-nodes.
    pub recursive: bool,
    /// The active style must be pushed to the renderer.
    pub style: bool,
    /// The computed layout must be pushed to the renderer.
    pub layout: bool,
}

/// A single node in the tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) component: Component,
    pub(crate) id: Option<String>,
    pub(crate) classes: ClassList,
    pub(crate) data: BTreeMap<String, String>,
    pub(crate) inline: PropertyMap,
    pub(crate) text: Option<String>,
    pub(crate) style: StyleState,
    pub(crate) before: Option<NodeId>,
    pub(crate) after: Option<NodeId>,
    pub(crate) before_rules: Vec<RuleMatch>,
    pub(crate) after_rules: Vec<RuleMatch>,
    pub(crate) dirty: Dirty,
    pub(crate) applied_layouts: Vec<LayoutValue>,
    pub(crate) layout: Option<taffy::NodeId>,
    pub(crate) region: Option<Region>,
    pub(crate) callback: Option<CallbackId>,
}

impl Node {
    pub fn new(tag: impl Into<String>, component: Component) -> Self {
        Self {
            tag: tag.into(),
            style: StyleState::new(component.default_style()),
            component,
            id: None,
            classes: ClassList::new(),
            data: BTreeMap::new(),
            inline: PropertyMap::new(),
            text: None,
            before: None,
            after: None,
            before_rules: Vec::new(),
            after_rules: Vec::new(),
            dirty: Dirty::default(),
            applied_layouts: Vec::new(),
            layout: None,
            region: None,
            callback: None,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class);
        self
    }

    /// Set the text (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn inline_style(&self) -> &PropertyMap {
        &self.inline
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The active resolved style.
    pub fn style(&self) -> &Arc<NodeStyle> {
        self.style.active()
    }

    pub fn style_state(&self) -> &StyleState {
        &self.style
    }

    pub fn is_container(&self) -> bool {
        self.component.is_container()
    }

    pub fn is_pseudo(&self) -> bool {
        self.component.pseudo().is_some()
    }

    pub fn before(&self) -> Option<NodeId> {
        self.before
    }

    pub fn after(&self) -> Option<NodeId> {
        self.after
    }

    /// The pending work flags.
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Layout values applied by the last resolve.
    pub fn applied_layouts(&self) -> &[LayoutValue] {
        &self.applied_layouts
    }

    pub fn layout_node(&self) -> Option<taffy::NodeId> {
        self.layout
    }

    /// The box delivered by the last layout pass.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub(crate) fn pseudo_slot(&mut self, kind: PseudoElement) -> &mut Option<NodeId> {
        match kind {
            PseudoElement::Before => &mut self.before,
            PseudoElement::After => &mut self.after,
        }
    }

    pub(crate) fn pseudo_rules(&self, kind: PseudoElement) -> &[RuleMatch] {
        match kind {
            PseudoElement::Before => &self.before_rules,
            PseudoElement::After => &self.after_rules,
        }
    }
}
