//! Cascade ordering.
//!
//! Matched rules arrive sorted ascending by specificity. Inline declarations
//! slot in between the ordinary rules and the important ones: every rule whose
//! specificity reaches the threshold outranks inline style, every other rule
//! is outranked by it. Later entries in the order win.

use crate::css::specificity::Specificity;
use crate::layout::property::LayoutValue;

use super::node_style::PropertyMap;
use super::rule::RuleMatch;

/// One entry in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeSource {
    /// Index into the matched rule list.
    Rule(usize),
    Inline,
}

/// Index of the first rule at or above `threshold`, or `rules.len()`.
pub fn important_index(rules: &[RuleMatch], threshold: Specificity) -> usize {
    rules
        .iter()
        .position(|rule| rule.specificity.is_at_least(threshold))
        .unwrap_or(rules.len())
}

/// Lowest to highest priority.
pub fn cascade_order(rules: &[RuleMatch], threshold: Specificity) -> Vec<CascadeSource> {
    let split = important_index(rules, threshold);
    let mut order = Vec::with_capacity(rules.len() + 1);
    order.extend((0..split).map(CascadeSource::Rule));
    order.push(CascadeSource::Inline);
    order.extend((split..rules.len()).map(CascadeSource::Rule));
    order
}

/// Merge rules and inline values into one map.
pub fn merge(rules: &[RuleMatch], inline: &PropertyMap, threshold: Specificity) -> PropertyMap {
    let mut merged = PropertyMap::new();
    for source in cascade_order(rules, threshold) {
        let layer = match source {
            CascadeSource::Rule(i) => &*rules[i].properties,
            CascadeSource::Inline => inline,
        };
        for (name, value) in layer {
            merged.insert(*name, value.clone());
        }
    }
    merged
}

/// Layout values in application order: the highest-priority value for a
/// property comes last, so applying them in sequence leaves it in place.
pub fn layout_values(
    rules: &[RuleMatch],
    inline: &[LayoutValue],
    threshold: Specificity,
) -> Vec<LayoutValue> {
    let mut out = Vec::new();
    for source in cascade_order(rules, threshold) {
        match source {
            CascadeSource::Rule(i) => out.extend_from_slice(rules[i].layouts()),
            CascadeSource::Inline => out.extend_from_slice(inline),
        }
    }
    out
}

// ===========================================================================
// Tests
// ===========================================================================
