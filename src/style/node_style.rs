//! Resolved per-node style snapshots.

use std::collections::BTreeMap;
use std::fmt;

use crate::animation::computed::EvalContext;
use crate::css::properties::{self, PropertyDef};
use crate::css::scalar::{Scalar, Unit};
use crate::style::value::{Color, StyleValue};

/// Property name → value, keyed by the registry's static names.
pub type PropertyMap = BTreeMap<&'static str, StyleValue>;

/// Font size used when nothing in the chain sets one.
pub const DEFAULT_ROOT_FONT_SIZE: f32 = 24.0;

/// An immutable resolved style.
///
/// Besides the values, a snapshot carries two diff flags computed against the
/// snapshot it replaced: whether any inherited property changed (children must
/// re-resolve) and whether anything affecting layout changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    values: PropertyMap,
    has_inherited_changes: bool,
    has_layout_changes: bool,
}

impl NodeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot straight from values, with no diff flags set.
    pub fn from_values(values: impl IntoIterator<Item = (&'static str, StyleValue)>) -> Self {
        Self {
            values: values.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Resolve a snapshot.
    ///
    /// Starts from `defaults`, takes inherited properties from `parent` where
    /// the cascade has nothing, then overlays `cascaded`. Deferred values are
    /// evaluated: `font-size` against the parent's font size, everything else
    /// against the node's own. Diff flags are computed against `previous`.
    pub fn build(
        defaults: &NodeStyle,
        cascaded: &PropertyMap,
        parent: Option<&NodeStyle>,
        root_font_size: f32,
        previous: &NodeStyle,
    ) -> Self {
        let mut values = defaults.values.clone();

        if let Some(parent) = parent {
            for def in properties::all().iter().filter(|def| def.inherited) {
                if cascaded.contains_key(def.name) {
                    continue;
                }
                if let Some(value) = parent.get(def.name) {
                    values.insert(def.name, value.clone());
                }
            }
        }

        for (name, value) in cascaded {
            values.insert(*name, value.clone());
        }

        let parent_font = parent
            .and_then(NodeStyle::font_size)
            .unwrap_or(root_font_size);
        if let Some(StyleValue::Computed(expr)) = values.get("font-size") {
            let resolved = expr.evaluate(&EvalContext::new(parent_font, root_font_size));
            values.insert("font-size", resolved);
        }
        values
            .entry("font-size")
            .or_insert_with(|| StyleValue::Length(Scalar::point(parent_font)));

        let own_font = font_size_of(&values).unwrap_or(parent_font);
        let ctx = EvalContext::new(own_font, root_font_size);
        for value in values.values_mut() {
            if let StyleValue::Computed(expr) = value {
                *value = expr.evaluate(&ctx);
            }
        }

        let mut style = Self {
            values,
            ..Self::default()
        };
        style.has_inherited_changes = style.differs(previous, |def| def.inherited);
        style.has_layout_changes = style.differs(previous, affects_layout);
        style
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &'static str, value: StyleValue) {
        self.values.insert(name, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &PropertyMap {
        &self.values
    }

    pub fn color(&self) -> Option<Color> {
        self.get("color").and_then(StyleValue::as_color)
    }

    /// The resolved font size in points.
    pub fn font_size(&self) -> Option<f32> {
        font_size_of(&self.values)
    }

    pub fn has_inherited_changes(&self) -> bool {
        self.has_inherited_changes
    }

    pub fn has_layout_changes(&self) -> bool {
        self.has_layout_changes
    }

    /// Clear both diff flags.
    pub fn mark_changes_seen(&mut self) {
        self.has_inherited_changes = false;
        self.has_layout_changes = false;
    }

    fn differs(&self, other: &NodeStyle, filter: impl Fn(&PropertyDef) -> bool) -> bool {
        properties::all()
            .iter()
            .filter(|def| filter(def))
            .any(|def| self.values.get(def.name) != other.values.get(def.name))
    }
}

fn affects_layout(def: &PropertyDef) -> bool {
    def.layout.is_some() || matches!(def.name, "font-size" | "line-height")
}

fn font_size_of(values: &PropertyMap) -> Option<f32> {
    match values.get("font-size")? {
        StyleValue::Length(Scalar {
            value,
            unit: Unit::Point,
        }) => Some(*value),
        StyleValue::Float(value) => Some(*value),
        _ => None,
    }
}

impl fmt::Display for NodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, " {name}: {value}")?;
        }
        f.write_str(" }")
    }
}

// ===========================================================================
// Tests
// ===========================================================================
