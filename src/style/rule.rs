//! Matched rules and the matcher seam.

use std::sync::Arc;

use crate::css::properties;
use crate::css::specificity::Specificity;
use crate::dom::node::NodeId;
use crate::dom::tree::Tree;
use crate::layout::property::LayoutValue;
use crate::style::node_style::PropertyMap;
use crate::style::value::StyleValue;

/// One rule that matched a node.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub specificity: Specificity,
    pub properties: Arc<PropertyMap>,
    /// The layout-affecting subset of `properties`, if any.
    pub layouts: Option<Arc<[LayoutValue]>>,
}

impl RuleMatch {
    /// Wrap a property map, extracting its layout subset.
    pub fn new(specificity: Specificity, properties: PropertyMap) -> Self {
        let layouts = layout_subset(&properties);
        Self {
            specificity,
            properties: Arc::new(properties),
            layouts: (!layouts.is_empty()).then(|| layouts.into()),
        }
    }

    pub fn from_values(
        specificity: Specificity,
        values: impl IntoIterator<Item = (&'static str, StyleValue)>,
    ) -> Self {
        Self::new(specificity, values.into_iter().collect())
    }

    pub fn layouts(&self) -> &[LayoutValue] {
        self.layouts.as_deref().unwrap_or(&[])
    }
}

/// The layout values carried by a property map, in property-name order.
pub fn layout_subset(properties: &PropertyMap) -> Vec<LayoutValue> {
    properties
        .iter()
        .filter_map(|(name, value)| {
            let def = properties::lookup(name)?;
            properties::to_layout_value(def, value)
        })
        .collect()
}

/// Selector matching against the tree.
///
/// Every returned list is sorted ascending by specificity.
pub trait Matcher {
    /// Rules matching the node itself.
    fn matched_rules(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch>;

    /// Rules targeting the node's `::before` pseudo-element.
    fn matched_before(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch>;

    /// Rules targeting the node's `::after` pseudo-element.
    fn matched_after(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch>;
}

/// A matcher that matches nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRules;

impl Matcher for NoRules {
    fn matched_rules(&self, _tree: &Tree, _node: NodeId) -> Vec<RuleMatch> {
        Vec::new()
    }

    fn matched_before(&self, _tree: &Tree, _node: NodeId) -> Vec<RuleMatch> {
        Vec::new()
    }

    fn matched_after(&self, _tree: &Tree, _node: NodeId) -> Vec<RuleMatch> {
        Vec::new()
    }
}
