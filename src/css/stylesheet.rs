//! Compiled stylesheets: selector matching against the tree.
//!
//! Compiles parsed [`StyleSheet`]s into one rule per selector with its
//! specificity and pre-parsed property values, ready to hand out as
//! [`RuleMatch`]es. `!important` declarations compile into a separate rule
//! lifted into the important band, so the cascade sees them above inline
//! style.

use tracing::{debug, warn};

use crate::css::model::{
    Combinator, CompoundSelector, PseudoElement, Selector, SelectorComponent, SelectorPart,
    StyleSheet,
};
use crate::css::parser::{parse_css, ParseError};
use crate::css::properties::parse_declaration;
use crate::css::specificity::Specificity;
use crate::dom::node::NodeId;
use crate::dom::tree::Tree;
use crate::style::node_style::PropertyMap;
use crate::style::rule::{Matcher, RuleMatch};

/// Rules every document starts with, ahead of author rules.
pub const USER_AGENT_CSS: &str = r#"
text {
    flex-shrink: 0;
}

button {
    padding: 4px 8px;
    border-width: 1px;
    border-color: #a0a0a0;
}
"#;

/// A compiled stylesheet ready for matching against tree nodes.
#[derive(Debug, Default)]
pub struct CompiledStylesheet {
    /// One entry per selector, in source order.
    rules: Vec<CompiledRule>,
}

#[derive(Debug)]
struct CompiledRule {
    selector: Selector,
    /// Source order index for stable sorting.
    source_order: usize,
    matched: RuleMatch,
}

impl CompiledStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stylesheet holding only [`USER_AGENT_CSS`].
    pub fn user_agent() -> Self {
        let mut sheet = Self::new();
        if let Err(err) = sheet.add_css(USER_AGENT_CSS) {
            warn!(%err, "user agent stylesheet failed to parse");
        }
        sheet
    }

    /// Parse and compile `css`.
    pub fn parse(css: &str) -> Result<Self, ParseError> {
        let mut sheet = Self::new();
        sheet.add_css(css)?;
        Ok(sheet)
    }

    /// Parse `css` and append its rules after the existing ones.
    pub fn add_css(&mut self, css: &str) -> Result<(), ParseError> {
        let sheet = parse_css(css)?;
        self.add_sheet(&sheet);
        Ok(())
    }

    /// Append a parsed sheet. Later rules win ties on specificity.
    ///
    /// Declarations that fail to parse are dropped with a warning.
    pub fn add_sheet(&mut self, sheet: &StyleSheet) {
        let before = self.rules.len();
        for rule in &sheet.rules {
            let mut normal = PropertyMap::new();
            let mut important = PropertyMap::new();
            for decl in &rule.declarations {
                match parse_declaration(decl) {
                    Ok(parsed) => {
                        let target = if decl.important {
                            &mut important
                        } else {
                            &mut normal
                        };
                        for (def, value) in parsed {
                            target.insert(def.name, value);
                        }
                    }
                    Err(err) => warn!(declaration = %decl, %err, "ignoring declaration"),
                }
            }

            for selector in &rule.selectors {
                let specificity = Specificity::from_selector(selector);
                for (props, band) in [
                    (&normal, specificity),
                    (&important, specificity.important()),
                ] {
                    if props.is_empty() {
                        continue;
                    }
                    let source_order = self.rules.len();
                    self.rules.push(CompiledRule {
                        selector: selector.clone(),
                        source_order,
                        matched: RuleMatch::new(band, props.clone()),
                    });
                }
            }
        }
        debug!(
            rules = self.rules.len() - before,
            total = self.rules.len(),
            "compiled stylesheet"
        );
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules matching `node` (or its pseudo-element), ascending by
    /// specificity, then source order.
    pub fn matching(
        &self,
        tree: &Tree,
        node: NodeId,
        pseudo: Option<PseudoElement>,
    ) -> Vec<RuleMatch> {
        let mut matches: Vec<&CompiledRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.pseudo_element == pseudo)
            .filter(|rule| matches_parts(&rule.selector, tree, node))
            .collect();

        matches.sort_by(|a, b| {
            a.matched
                .specificity
                .cmp(&b.matched.specificity)
                .then(a.source_order.cmp(&b.source_order))
        });
        matches.into_iter().map(|rule| rule.matched.clone()).collect()
    }
}

impl Matcher for CompiledStylesheet {
    fn matched_rules(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch> {
        self.matching(tree, node, None)
    }

    fn matched_before(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch> {
        self.matching(tree, node, Some(PseudoElement::Before))
    }

    fn matched_after(&self, tree: &Tree, node: NodeId) -> Vec<RuleMatch> {
        self.matching(tree, node, Some(PseudoElement::After))
    }
}

/// Whether `selector` matches `node`.
///
/// A selector ending in `::before` / `::after` matches the pseudo-node of
/// that kind whose owner matches the rest of the selector.
pub fn matches_selector(selector: &Selector, tree: &Tree, node: NodeId) -> bool {
    let Some(data) = tree.get(node) else {
        return false;
    };
    match (selector.pseudo_element, data.component().pseudo()) {
        (None, None) => matches_parts(selector, tree, node),
        (Some(wanted), Some(kind)) if wanted == kind => tree
            .parent(node)
            .is_some_and(|owner| matches_parts(selector, tree, owner)),
        _ => false,
    }
}

/// Walks the selector parts from right to left, matching compound selectors
/// and navigating the tree via combinators.
fn matches_parts(selector: &Selector, tree: &Tree, node_id: NodeId) -> bool {
    let parts = &selector.parts;
    let Some(SelectorPart::Compound(last)) = parts.last() else {
        return false;
    };
    if !matches_compound(last, tree, node_id) {
        return false;
    }

    let mut part_idx = parts.len() - 1;
    let mut current_node = node_id;

    while part_idx > 0 {
        let combinator = match &parts[part_idx - 1] {
            SelectorPart::Combinator(c) => *c,
            SelectorPart::Compound(_) => return false,
        };
        if part_idx < 2 {
            // Combinator without a preceding compound.
            return false;
        }
        let compound = match &parts[part_idx - 2] {
            SelectorPart::Compound(c) => c,
            SelectorPart::Combinator(_) => return false,
        };
        part_idx -= 2;

        match combinator {
            Combinator::Child => {
                let Some(parent_id) = tree.parent(current_node) else {
                    return false;
                };
                if !matches_compound(compound, tree, parent_id) {
                    return false;
                }
                current_node = parent_id;
            }
            Combinator::Descendant => {
                let found = tree
                    .ancestors(current_node)
                    .into_iter()
                    .find(|&ancestor| matches_compound(compound, tree, ancestor));
                match found {
                    Some(ancestor_id) => current_node = ancestor_id,
                    None => return false,
                }
            }
        }
    }
    true
}

/// Check whether a compound selector matches a single node.
fn matches_compound(compound: &CompoundSelector, tree: &Tree, id: NodeId) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag().eq_ignore_ascii_case(name),
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::PseudoClass(name) => matches_pseudo_class(name, tree, id),
    })
}

/// Structural pseudo-classes. Pseudo-nodes do not count as siblings.
fn matches_pseudo_class(name: &str, tree: &Tree, id: NodeId) -> bool {
    let siblings = || tree.parent(id).map(|p| tree.children(p)).unwrap_or_default();
    match name {
        "first-child" => siblings().first() == Some(&id),
        "last-child" => siblings().last() == Some(&id),
        "only-child" => siblings() == [id],
        "empty" => tree.children(id).is_empty(),
        _ => false,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
