//! Deferred style expressions.
//!
//! Relative units such as `em` and `rem` cannot be turned into points until
//! the node's font context is known. They are kept as a [`Computed`]
//! expression and evaluated against an [`EvalContext`] when the node's style
//! snapshot is built. Blending against a deferred value produces another
//! deferred value, so a transition from `1em` to `20px` stays correct when the
//! font size changes mid-animation.

use std::fmt;

use crate::css::scalar::Scalar;
use crate::style::value::StyleValue;

use super::interpolate::blend;

/// Font metrics that relative units resolve against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalContext {
    /// Font size in points that `em` multiplies.
    pub font_size: f32,
    /// Root font size in points that `rem` multiplies.
    pub root_font_size: f32,
}

impl EvalContext {
    pub fn new(font_size: f32, root_font_size: f32) -> Self {
        Self {
            font_size,
            root_font_size,
        }
    }
}

/// An unevaluated style expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Computed {
    /// Multiple of the inherited font size.
    Em(f32),
    /// Multiple of the root font size.
    Rem(f32),
    /// A concrete value wrapped so it can take part in a deferred blend.
    Constant(Box<StyleValue>),
    /// Blend of two expressions, evaluated lazily.
    Interpolation {
        from: Box<Computed>,
        to: Box<Computed>,
        t: f32,
    },
}

impl Computed {
    /// Wrap a value as an expression. Values that are already deferred are unwrapped.
    pub fn constant(value: StyleValue) -> Self {
        match value {
            StyleValue::Computed(expr) => (*expr).clone(),
            other => Self::Constant(Box::new(other)),
        }
    }

    /// Deferred blend of two expressions.
    pub fn interpolate(from: Computed, to: Computed, t: f32) -> Self {
        Self::Interpolation {
            from: Box::new(from),
            to: Box::new(to),
            t,
        }
    }

    /// Evaluate to a concrete value.
    pub fn evaluate(&self, ctx: &EvalContext) -> StyleValue {
        match self {
            Self::Em(v) => StyleValue::Length(Scalar::point(v * ctx.font_size)),
            Self::Rem(v) => StyleValue::Length(Scalar::point(v * ctx.root_font_size)),
            Self::Constant(value) => match value.as_ref() {
                StyleValue::Computed(inner) => inner.evaluate(ctx),
                other => other.clone(),
            },
            Self::Interpolation { from, to, t } => {
                blend(&from.evaluate(ctx), &to.evaluate(ctx), *t)
            }
        }
    }
}

impl fmt::Display for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Em(v) => write!(f, "{v}em"),
            Self::Rem(v) => write!(f, "{v}rem"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Interpolation { from, to, t } => write!(f, "mix({from}, {to}, {t})"),
        }
    }
}
