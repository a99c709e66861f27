//! Scalar CSS specificity with an "important" band.
//!
//! Specificity is packed into one ordered integer:
//!
//! ```text
//! bit 24      : important band (Specificity::IMPORTANT)
//! bits 16..24 : id count
//! bits  8..16 : class + pseudo-class count
//! bits  0..8  : type count
//! ```
//!
//! Each count saturates at 255 so a field can never carry into the next one.
//! `!important` declarations are compiled into a separate rule whose
//! specificity is the selector's base plus [`Specificity::IMPORTANT`], so every
//! important rule sorts above every normal rule. The cascade splits a sorted
//! rule list at the first entry at or above the configured threshold.

use std::fmt;
use std::ops::Add;

use crate::css::model::{Selector, SelectorComponent, SelectorPart};

/// An ordered specificity value. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32);

impl Specificity {
    /// Zero specificity (universal selector, or a rule with no selector parts).
    pub const ZERO: Specificity = Specificity(0);

    /// The default important threshold; `!important` rules are offset by this.
    pub const IMPORTANT: Specificity = Specificity(1 << 24);

    /// Build from raw counts, saturating each field.
    pub fn from_counts(ids: u32, classes: u32, types: u32) -> Self {
        Self((ids.min(255) << 16) | (classes.min(255) << 8) | types.min(255))
    }

    /// Compute specificity from a parsed selector.
    ///
    /// A trailing pseudo-element counts as one type selector.
    pub fn from_selector(selector: &Selector) -> Self {
        let mut ids = 0;
        let mut classes = 0;
        let mut types = 0;

        for part in &selector.parts {
            if let SelectorPart::Compound(compound) = part {
                for component in &compound.components {
                    match component {
                        SelectorComponent::Id(_) => ids += 1,
                        SelectorComponent::Class(_) | SelectorComponent::PseudoClass(_) => {
                            classes += 1
                        }
                        SelectorComponent::Type(_) => types += 1,
                        SelectorComponent::Universal => {}
                    }
                }
            }
        }
        if selector.pseudo_element.is_some() {
            types += 1;
        }

        Self::from_counts(ids, classes, types)
    }

    /// The same selector weight lifted into the important band.
    pub fn important(self) -> Self {
        self + Self::IMPORTANT
    }

    /// Whether this specificity sits at or above `threshold`.
    pub fn is_at_least(self, threshold: Specificity) -> bool {
        self >= threshold
    }

    /// Number of id selectors.
    pub fn ids(self) -> u32 {
        (self.0 >> 16) & 0xff
    }

    /// Number of class and pseudo-class selectors.
    pub fn classes(self) -> u32 {
        (self.0 >> 8) & 0xff
    }

    /// Number of type selectors.
    pub fn types(self) -> u32 {
        self.0 & 0xff
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(self.0.saturating_add(rhs.0))
    }
}

impl From<u32> for Specificity {
    fn from(value: u32) -> Self {
        Specificity(value)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.0 >= Self::IMPORTANT.0 { "!" } else { "" };
        write!(f, "{bang}({},{},{})", self.ids(), self.classes(), self.types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::{CompoundSelector, Combinator, PseudoElement};

    /// Build a selector from a list of components (single compound, no combinators).
    fn simple_selector(components: Vec<SelectorComponent>) -> Selector {
        Selector {
            parts: vec![SelectorPart::Compound(CompoundSelector { components })],
            pseudo_element: None,
        }
    }

    #[test]
    fn test_type_only() {
        let sel = simple_selector(vec![SelectorComponent::Type("view".into())]);
        let specificity = Specificity::from_selector(&sel);
        assert_eq!(specificity.types(), 1);
        assert_eq!(specificity.classes(), 0);
        assert_eq!(specificity.ids(), 0);
    }

    #[test]
    fn test_compound() {
        // view.primary:hover
        let sel = simple_selector(vec![
            SelectorComponent::Type("view".into()),
            SelectorComponent::Class("primary".into()),
            SelectorComponent::PseudoClass("hover".into()),
        ]);
        let specificity = Specificity::from_selector(&sel);
        assert_eq!(specificity.types(), 1);
        assert_eq!(specificity.classes(), 2);
        assert_eq!(specificity, Specificity::from_counts(0, 2, 1));
    }

    #[test]
    fn test_universal_is_zero() {
        let sel = simple_selector(vec![SelectorComponent::Universal]);
        assert_eq!(Specificity::from_selector(&sel), Specificity::ZERO);
    }

    #[test]
    fn test_descendant_chain_sums_parts() {
        // #main view .item
        let sel = Selector {
            parts: vec![
                SelectorPart::Compound(CompoundSelector {
                    components: vec![SelectorComponent::Id("main".into())],
                }),
                SelectorPart::Combinator(Combinator::Descendant),
                SelectorPart::Compound(CompoundSelector {
                    components: vec![SelectorComponent::Type("view".into())],
                }),
                SelectorPart::Combinator(Combinator::Descendant),
                SelectorPart::Compound(CompoundSelector {
                    components: vec![SelectorComponent::Class("item".into())],
                }),
            ],
            pseudo_element: None,
        };
        assert_eq!(Specificity::from_selector(&sel), Specificity::from_counts(1, 1, 1));
    }

    #[test]
    fn test_pseudo_element_counts_as_type() {
        let mut sel = simple_selector(vec![SelectorComponent::Class("card".into())]);
        sel.pseudo_element = Some(PseudoElement::Before);
        assert_eq!(Specificity::from_selector(&sel), Specificity::from_counts(0, 1, 1));
    }

    #[test]
    fn test_id_beats_any_number_of_classes() {
        let id = Specificity::from_counts(1, 0, 0);
        let classes = Specificity::from_counts(0, 255, 255);
        assert!(id > classes);
    }

    #[test]
    fn test_fields_saturate() {
        let specificity = Specificity::from_counts(0, 300, 0);
        assert_eq!(specificity.classes(), 255);
        assert_eq!(specificity.ids(), 0);
    }

    #[test]
    fn test_important_band() {
        let strongest_normal = Specificity::from_counts(255, 255, 255);
        let weakest_important = Specificity::ZERO.important();
        assert!(weakest_important > strongest_normal);
        assert!(weakest_important.is_at_least(Specificity::IMPORTANT));
        assert!(!strongest_normal.is_at_least(Specificity::IMPORTANT));
    }

    #[test]
    fn test_display() {
        assert_eq!(Specificity::from_counts(1, 2, 3).to_string(), "(1,2,3)");
        assert_eq!(Specificity::from_counts(0, 1, 0).important().to_string(), "!(0,1,0)");
    }
}
