//! Layout-affecting properties and their mapping onto [`taffy::Style`].
//!
//! Each [`LayoutValue`] knows how to write itself into one field of a taffy
//! style (`set`) and how to restore that field from a per-kind default style
//! (`set_default`). The resolver resets every property that was applied last
//! time before applying the new set, so a property dropped from the cascade
//! never leaves a stale value behind.

use std::fmt;

use taffy::prelude::*;
use taffy::style::Overflow;

use crate::css::scalar::{Scalar, Unit};
use crate::style::value::StyleValue;

/// A layout-affecting property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutProp {
    Display,
    Position,
    Overflow,
    FlexDirection,
    FlexWrap,
    JustifyContent,
    AlignItems,
    AlignSelf,
    AlignContent,
    FlexGrow,
    FlexShrink,
    FlexBasis,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Top,
    Right,
    Bottom,
    Left,
    RowGap,
    ColumnGap,
    BorderWidth,
    AspectRatio,
}

/// A layout property paired with its resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutValue {
    pub prop: LayoutProp,
    pub value: StyleValue,
}

impl LayoutValue {
    pub fn new(prop: LayoutProp, value: StyleValue) -> Self {
        Self { prop, value }
    }

    /// Write this value into `style`. Values of an unexpected kind are ignored.
    pub fn set(&self, style: &mut Style) {
        let value = &self.value;
        match self.prop {
            LayoutProp::Display => {
                if let Some(display) = value.as_keyword().and_then(display_from) {
                    style.display = display;
                }
            }
            LayoutProp::Position => match value.as_keyword() {
                Some("absolute") => style.position = Position::Absolute,
                Some("relative") => style.position = Position::Relative,
                _ => {}
            },
            LayoutProp::Overflow => {
                if let Some(overflow) = value.as_keyword().and_then(overflow_from) {
                    style.overflow = taffy::geometry::Point {
                        x: overflow,
                        y: overflow,
                    };
                }
            }
            LayoutProp::FlexDirection => {
                let direction = match value.as_keyword() {
                    Some("row") => FlexDirection::Row,
                    Some("column") => FlexDirection::Column,
                    Some("row-reverse") => FlexDirection::RowReverse,
                    Some("column-reverse") => FlexDirection::ColumnReverse,
                    _ => return,
                };
                style.flex_direction = direction;
            }
            LayoutProp::FlexWrap => {
                let wrap = match value.as_keyword() {
                    Some("nowrap") => FlexWrap::NoWrap,
                    Some("wrap") => FlexWrap::Wrap,
                    Some("wrap-reverse") => FlexWrap::WrapReverse,
                    _ => return,
                };
                style.flex_wrap = wrap;
            }
            LayoutProp::JustifyContent => {
                if let Some(kw) = value.as_keyword() {
                    style.justify_content = content_from(kw);
                }
            }
            LayoutProp::AlignContent => {
                if let Some(kw) = value.as_keyword() {
                    style.align_content = content_from(kw);
                }
            }
            LayoutProp::AlignItems => {
                if let Some(kw) = value.as_keyword() {
                    style.align_items = items_from(kw);
                }
            }
            LayoutProp::AlignSelf => {
                if let Some(kw) = value.as_keyword() {
                    style.align_self = items_from(kw);
                }
            }
            LayoutProp::FlexGrow => {
                if let Some(v) = value.as_float() {
                    style.flex_grow = v;
                }
            }
            LayoutProp::FlexShrink => {
                if let Some(v) = value.as_float() {
                    style.flex_shrink = v;
                }
            }
            LayoutProp::AspectRatio => {
                style.aspect_ratio = value.as_float().filter(|r| *r > 0.0);
            }
            LayoutProp::FlexBasis => with_length(value, |s| style.flex_basis = to_dimension(s)),
            LayoutProp::Width => with_length(value, |s| style.size.width = to_dimension(s)),
            LayoutProp::Height => with_length(value, |s| style.size.height = to_dimension(s)),
            LayoutProp::MinWidth => with_length(value, |s| style.min_size.width = to_dimension(s)),
            LayoutProp::MinHeight => {
                with_length(value, |s| style.min_size.height = to_dimension(s))
            }
            LayoutProp::MaxWidth => with_length(value, |s| style.max_size.width = to_dimension(s)),
            LayoutProp::MaxHeight => {
                with_length(value, |s| style.max_size.height = to_dimension(s))
            }
            LayoutProp::MarginTop => with_length(value, |s| style.margin.top = to_auto(s)),
            LayoutProp::MarginRight => with_length(value, |s| style.margin.right = to_auto(s)),
            LayoutProp::MarginBottom => with_length(value, |s| style.margin.bottom = to_auto(s)),
            LayoutProp::MarginLeft => with_length(value, |s| style.margin.left = to_auto(s)),
            LayoutProp::PaddingTop => with_length(value, |s| style.padding.top = to_definite(s)),
            LayoutProp::PaddingRight => {
                with_length(value, |s| style.padding.right = to_definite(s))
            }
            LayoutProp::PaddingBottom => {
                with_length(value, |s| style.padding.bottom = to_definite(s))
            }
            LayoutProp::PaddingLeft => with_length(value, |s| style.padding.left = to_definite(s)),
            LayoutProp::Top => with_length(value, |s| style.inset.top = to_auto(s)),
            LayoutProp::Right => with_length(value, |s| style.inset.right = to_auto(s)),
            LayoutProp::Bottom => with_length(value, |s| style.inset.bottom = to_auto(s)),
            LayoutProp::Left => with_length(value, |s| style.inset.left = to_auto(s)),
            LayoutProp::RowGap => with_length(value, |s| style.gap.height = to_definite(s)),
            LayoutProp::ColumnGap => with_length(value, |s| style.gap.width = to_definite(s)),
            LayoutProp::BorderWidth => with_length(value, |s| {
                let w = to_definite(s);
                style.border = taffy::geometry::Rect {
                    top: w,
                    right: w,
                    bottom: w,
                    left: w,
                };
            }),
        }
    }

    /// Restore this value's field in `style` from `default`.
    pub fn set_default(&self, style: &mut Style, default: &Style) {
        self.prop.reset(style, default);
    }
}

impl fmt::Display for LayoutValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}={}", self.prop, self.value)
    }
}

impl LayoutProp {
    /// Copy this property's field from `default` into `style`.
    pub fn reset(self, style: &mut Style, default: &Style) {
        match self {
            Self::Display => style.display = default.display,
            Self::Position => style.position = default.position,
            Self::Overflow => style.overflow = default.overflow,
            Self::FlexDirection => style.flex_direction = default.flex_direction,
            Self::FlexWrap => style.flex_wrap = default.flex_wrap,
            Self::JustifyContent => style.justify_content = default.justify_content,
            Self::AlignItems => style.align_items = default.align_items,
            Self::AlignSelf => style.align_self = default.align_self,
            Self::AlignContent => style.align_content = default.align_content,
            Self::FlexGrow => style.flex_grow = default.flex_grow,
            Self::FlexShrink => style.flex_shrink = default.flex_shrink,
            Self::FlexBasis => style.flex_basis = default.flex_basis,
            Self::Width => style.size.width = default.size.width,
            Self::Height => style.size.height = default.size.height,
            Self::MinWidth => style.min_size.width = default.min_size.width,
            Self::MinHeight => style.min_size.height = default.min_size.height,
            Self::MaxWidth => style.max_size.width = default.max_size.width,
            Self::MaxHeight => style.max_size.height = default.max_size.height,
            Self::MarginTop => style.margin.top = default.margin.top,
            Self::MarginRight => style.margin.right = default.margin.right,
            Self::MarginBottom => style.margin.bottom = default.margin.bottom,
            Self::MarginLeft => style.margin.left = default.margin.left,
            Self::PaddingTop => style.padding.top = default.padding.top,
            Self::PaddingRight => style.padding.right = default.padding.right,
            Self::PaddingBottom => style.padding.bottom = default.padding.bottom,
            Self::PaddingLeft => style.padding.left = default.padding.left,
            Self::Top => style.inset.top = default.inset.top,
            Self::Right => style.inset.right = default.inset.right,
            Self::Bottom => style.inset.bottom = default.inset.bottom,
            Self::Left => style.inset.left = default.inset.left,
            Self::RowGap => style.gap.height = default.gap.height,
            Self::ColumnGap => style.gap.width = default.gap.width,
            Self::BorderWidth => style.border = default.border,
            Self::AspectRatio => style.aspect_ratio = default.aspect_ratio,
        }
    }
}

// ---------------------------------------------------------------------------
// Value conversion
// ---------------------------------------------------------------------------

fn with_length(value: &StyleValue, apply: impl FnOnce(Scalar)) {
    match value {
        StyleValue::Length(s) => apply(*s),
        StyleValue::Float(v) => apply(Scalar::point(*v)),
        StyleValue::Int(v) => apply(Scalar::point(*v as f32)),
        _ => {}
    }
}

/// Scalar to a sizing [`Dimension`].
pub fn to_dimension(scalar: Scalar) -> Dimension {
    match scalar.unit {
        Unit::Point => Dimension::from_length(scalar.value),
        Unit::Percent => Dimension::from_percent(scalar.value / 100.0),
        Unit::Auto => Dimension::AUTO,
    }
}

/// Scalar to a [`LengthPercentageAuto`] (margins, insets).
pub fn to_auto(scalar: Scalar) -> LengthPercentageAuto {
    match scalar.unit {
        Unit::Point => LengthPercentageAuto::from_length(scalar.value),
        Unit::Percent => LengthPercentageAuto::from_percent(scalar.value / 100.0),
        Unit::Auto => LengthPercentageAuto::AUTO,
    }
}

/// Scalar to a [`LengthPercentage`]; `auto` has no meaning here and maps to zero.
pub fn to_definite(scalar: Scalar) -> LengthPercentage {
    match scalar.unit {
        Unit::Point => LengthPercentage::from_length(scalar.value),
        Unit::Percent => LengthPercentage::from_percent(scalar.value / 100.0),
        Unit::Auto => LengthPercentage::ZERO,
    }
}

fn display_from(keyword: &str) -> Option<Display> {
    match keyword {
        "flex" => Some(Display::Flex),
        "block" => Some(Display::Block),
        "grid" => Some(Display::Grid),
        "none" => Some(Display::None),
        _ => None,
    }
}

fn overflow_from(keyword: &str) -> Option<Overflow> {
    match keyword {
        "visible" => Some(Overflow::Visible),
        "clip" => Some(Overflow::Clip),
        "hidden" => Some(Overflow::Hidden),
        "scroll" => Some(Overflow::Scroll),
        _ => None,
    }
}

fn content_from(keyword: &str) -> Option<JustifyContent> {
    match keyword {
        "start" => Some(JustifyContent::Start),
        "end" => Some(JustifyContent::End),
        "flex-start" => Some(JustifyContent::FlexStart),
        "flex-end" => Some(JustifyContent::FlexEnd),
        "center" => Some(JustifyContent::Center),
        "stretch" => Some(JustifyContent::Stretch),
        "space-between" => Some(JustifyContent::SpaceBetween),
        "space-around" => Some(JustifyContent::SpaceAround),
        "space-evenly" => Some(JustifyContent::SpaceEvenly),
        _ => None,
    }
}

fn items_from(keyword: &str) -> Option<AlignItems> {
    match keyword {
        "start" => Some(AlignItems::Start),
        "end" => Some(AlignItems::End),
        "flex-start" => Some(AlignItems::FlexStart),
        "flex-end" => Some(AlignItems::FlexEnd),
        "center" => Some(AlignItems::Center),
        "baseline" => Some(AlignItems::Baseline),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
