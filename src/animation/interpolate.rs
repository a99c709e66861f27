//! Type-dispatching value blending.
//!
//! [`blend`] picks the strategy from the variants of both endpoints. Values
//! of different kinds never fail to blend; they fall back to a discrete step
//! at the midpoint.

use std::sync::Arc;

use crate::css::scalar::{Scalar, Scalar2, Unit};
use crate::geometry::{lerp, Quat, Vec2, Vec3, Vec4};
use crate::style::value::{BoxShadow, Color, StyleValue, ValueKind};

use super::computed::Computed;
use super::list::ValueList;
use super::timing::TimingFunction;

/// Blend `self` toward `other` by an unclamped factor.
pub trait Blend: Sized {
    fn blend(&self, other: &Self, t: f32) -> Self;
}

impl Blend for f32 {
    fn blend(&self, other: &f32, t: f32) -> f32 {
        lerp(*self, *other, t)
    }
}

impl Blend for i32 {
    fn blend(&self, other: &i32, t: f32) -> i32 {
        // Halves round to even.
        lerp(*self as f32, *other as f32, t).round_ties_even() as i32
    }
}

impl Blend for Color {
    fn blend(&self, other: &Color, t: f32) -> Color {
        if self.is_transparent() || other.is_transparent() {
            // Fade alpha only, keeping the visible endpoint's hue.
            if self.a == 0.0 {
                return Color::rgba(other.r, other.g, other.b, lerp(0.0, other.a, t));
            }
            return Color::rgba(self.r, self.g, self.b, lerp(self.a, 0.0, t));
        }
        Color::rgba(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }
}

impl Blend for Vec2 {
    fn blend(&self, other: &Vec2, t: f32) -> Vec2 {
        self.lerp_unclamped(*other, t)
    }
}

impl Blend for Vec3 {
    fn blend(&self, other: &Vec3, t: f32) -> Vec3 {
        self.lerp_unclamped(*other, t)
    }
}

impl Blend for Vec4 {
    fn blend(&self, other: &Vec4, t: f32) -> Vec4 {
        self.lerp_unclamped(*other, t)
    }
}

impl Blend for Quat {
    fn blend(&self, other: &Quat, t: f32) -> Quat {
        self.slerp_unclamped(*other, t)
    }
}

impl Blend for Scalar {
    /// Only point and percent lengths animate, and only when the units agree
    /// or one side is zero. Anything else, `auto` on either side included,
    /// snaps to the destination.
    fn blend(&self, other: &Scalar, t: f32) -> Scalar {
        let magnitude = |s: &Scalar| matches!(s.unit, Unit::Point | Unit::Percent);
        let animatable = magnitude(self)
            && magnitude(other)
            && (self.unit == other.unit || self.is_zero() || other.is_zero());
        if !animatable {
            return *other;
        }
        if self.value == 0.0 && other.value == 0.0 {
            return Scalar::ZERO;
        }

        let unit = if self.value != 0.0 { self.unit } else { other.unit };
        let value = lerp(self.value, other.value, t);
        match unit {
            Unit::Percent => Scalar::percent(value),
            _ => Scalar::point(value),
        }
    }
}

impl Blend for Scalar2 {
    fn blend(&self, other: &Scalar2, t: f32) -> Scalar2 {
        Scalar2::new(self.x.blend(&other.x, t), self.y.blend(&other.y, t))
    }
}

impl Blend for BoxShadow {
    fn blend(&self, other: &BoxShadow, t: f32) -> BoxShadow {
        // Switching between inset and outer passes through the invisible shadow.
        if self.inset != other.inset && *self != BoxShadow::DEFAULT && *other != BoxShadow::DEFAULT
        {
            if t < 0.5 {
                return self.blend(&BoxShadow::neutral(self.inset), t * 2.0);
            }
            return BoxShadow::neutral(other.inset).blend(other, (t - 0.5) * 2.0);
        }

        BoxShadow {
            offset: self.offset.blend(&other.offset, t),
            blur: self.blur.blend(&other.blur, t),
            spread: self.spread.blend(&other.spread, t),
            color: self.color.blend(&other.color, t),
            inset: if *self != BoxShadow::DEFAULT {
                self.inset
            } else {
                other.inset
            },
        }
    }
}

impl<T: Clone> Blend for ValueList<T> {
    fn blend(&self, other: &ValueList<T>, t: f32) -> ValueList<T> {
        ValueList::interpolated(self.clone(), other.clone(), t)
    }
}

/// Blend two values, dispatching on their runtime kinds.
pub fn blend(from: &StyleValue, to: &StyleValue, t: f32) -> StyleValue {
    if let Some(value) = blend_same_kind(from, to, t) {
        return value;
    }

    match (from, to) {
        (StyleValue::Computed(a), StyleValue::Computed(b)) => {
            deferred((**a).clone(), (**b).clone(), t)
        }
        (StyleValue::Computed(a), other) => {
            deferred((**a).clone(), Computed::constant(other.clone()), t)
        }
        (other, StyleValue::Computed(b)) => {
            deferred(Computed::constant(other.clone()), (**b).clone(), t)
        }
        _ => step(from, to, t),
    }
}

/// The typed strategies. `None` when the kinds differ or have no strategy.
fn blend_same_kind(from: &StyleValue, to: &StyleValue, t: f32) -> Option<StyleValue> {
    use StyleValue as V;

    let value = match (from, to) {
        (V::Float(a), V::Float(b)) => V::Float(a.blend(b, t)),
        (V::Int(a), V::Int(b)) => V::Int(a.blend(b, t)),
        (V::Color(a), V::Color(b)) => V::Color(a.blend(b, t)),
        (V::Vec2(a), V::Vec2(b)) => V::Vec2(a.blend(b, t)),
        (V::Vec3(a), V::Vec3(b)) => V::Vec3(a.blend(b, t)),
        (V::Vec4(a), V::Vec4(b)) => V::Vec4(a.blend(b, t)),
        (V::Rotation(a), V::Rotation(b)) => V::Rotation(a.blend(b, t)),
        (V::Length(a), V::Length(b)) => V::Length(a.blend(b, t)),
        (V::Length2(a), V::Length2(b)) => V::Length2(a.blend(b, t)),
        (V::Shadow(a), V::Shadow(b)) => V::Shadow(a.blend(b, t)),
        (V::ShadowList(a), V::ShadowList(b)) => V::ShadowList(a.blend(b, t)),
        (V::Length2List(a), V::Length2List(b)) => V::Length2List(a.blend(b, t)),
        _ => return None,
    };
    Some(value)
}

fn deferred(from: Computed, to: Computed, t: f32) -> StyleValue {
    StyleValue::Computed(Arc::new(Computed::interpolate(from, to, t)))
}

/// Blend where either side may be absent; an absent side yields the other.
pub fn blend_opt(
    from: Option<&StyleValue>,
    to: Option<&StyleValue>,
    t: f32,
) -> Option<StyleValue> {
    match (from, to) {
        (Some(a), Some(b)) => Some(blend(a, b, t)),
        (None, Some(b)) => Some(b.clone()),
        (Some(a), None) => Some(a.clone()),
        (None, None) => None,
    }
}

/// Blend with a declared value kind.
///
/// When both sides have the declared kind the typed strategy is used
/// directly; otherwise this falls back to untyped dispatch.
pub fn blend_as(kind: Option<ValueKind>, from: &StyleValue, to: &StyleValue, t: f32) -> StyleValue {
    if let Some(kind) = kind {
        if from.kind() == kind && to.kind() == kind {
            if let Some(value) = blend_same_kind(from, to, t) {
                return value;
            }
        }
    }
    blend(from, to, t)
}

fn step(from: &StyleValue, to: &StyleValue, t: f32) -> StyleValue {
    if t > 0.5 {
        to.clone()
    } else {
        from.clone()
    }
}

/// The full state of one animated blend.
#[derive(Debug, Clone)]
pub struct Interpolation {
    pub origin: Option<StyleValue>,
    pub destination: Option<StyleValue>,
    /// Raw progress; may leave `0..=1`.
    pub t: f32,
    pub timing: Option<TimingFunction>,
    /// Reflect negative progress through its absolute value (ping-pong playback).
    pub mirror: bool,
    pub kind: Option<ValueKind>,
}

impl Interpolation {
    pub fn new(origin: StyleValue, destination: StyleValue, t: f32) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
            t,
            timing: None,
            mirror: false,
            kind: None,
        }
    }

    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn typed(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Progress after mirroring and the timing function. Applied exactly once.
    pub fn progress(&self) -> f32 {
        let t = if self.mirror && self.t < 0.0 {
            self.t.abs()
        } else {
            self.t
        };
        match &self.timing {
            Some(timing) => timing.apply(t),
            None => t,
        }
    }

    /// The blended value at the current progress.
    pub fn value(&self) -> Option<StyleValue> {
        let t = self.progress();
        match (&self.origin, &self.destination) {
            (Some(a), Some(b)) => Some(blend_as(self.kind, a, b, t)),
            (a, b) => blend_opt(a.as_ref(), b.as_ref(), t),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
