//! Resolved style values: a closed tagged union over everything a property can hold.
//!
//! The blend strategy for a value is chosen by its variant, which is fixed
//! when the declaration is parsed (see [`crate::css::properties`]).

use std::fmt;
use std::sync::Arc;

use crate::animation::computed::Computed;
use crate::animation::list::ValueList;
use crate::css::scalar::{Scalar, Scalar2};
use crate::geometry::{Quat, Vec2, Vec3, Vec4};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from float channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Whether this is the fully transparent sentinel (alpha is zero).
    ///
    /// Blending against the sentinel fades alpha only and keeps the other
    /// endpoint's hue.
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// Parse a 3, 4, 6 or 8 digit hex string without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let (r, g, b, a) = match hex.len() {
            3 | 4 => {
                let r = digit(0)? * 17;
                let g = digit(1)? * 17;
                let b = digit(2)? * 17;
                let a = if hex.len() == 4 { digit(3)? * 17 } else { 255 };
                (r, g, b, a)
            }
            6 | 8 => {
                let a = if hex.len() == 8 { pair(6)? } else { 255 };
                (pair(0)?, pair(2)?, pair(4)?, a)
            }
            _ => return None,
        };
        let mut color = Self::rgb8(r, g, b);
        color.a = a as f32 / 255.0;
        Some(color)
    }

    /// Look up a CSS color keyword.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "transparent" | "clear" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb8(255, 0, 0),
            "green" => Self::rgb8(0, 128, 0),
            "lime" => Self::rgb8(0, 255, 0),
            "blue" => Self::rgb8(0, 0, 255),
            "yellow" => Self::rgb8(255, 255, 0),
            "cyan" | "aqua" => Self::rgb8(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb8(255, 0, 255),
            "gray" | "grey" => Self::rgb8(128, 128, 128),
            "orange" => Self::rgb8(255, 165, 0),
            "purple" => Self::rgb8(128, 0, 128),
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        write!(
            f,
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            (self.a * 100.0).round() / 100.0
        )
    }
}

// ---------------------------------------------------------------------------
// BoxShadow
// ---------------------------------------------------------------------------

/// A single `box-shadow` layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub offset: Vec2,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
    pub inset: bool,
}

impl BoxShadow {
    /// The invisible outer shadow: zero offset, blur and spread, transparent.
    pub const DEFAULT: BoxShadow = BoxShadow {
        offset: Vec2::ZERO,
        blur: 0.0,
        spread: 0.0,
        color: Color::TRANSPARENT,
        inset: false,
    };

    /// The invisible inset shadow.
    pub const DEFAULT_INSET: BoxShadow = BoxShadow {
        inset: true,
        ..Self::DEFAULT
    };

    /// The invisible shadow with the given inset flag.
    pub fn neutral(inset: bool) -> Self {
        if inset {
            Self::DEFAULT_INSET
        } else {
            Self::DEFAULT
        }
    }
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BoxShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inset {
            f.write_str("inset ")?;
        }
        write!(
            f,
            "{}px {}px {}px {}px {}",
            self.offset.x, self.offset.y, self.blur, self.spread, self.color
        )
    }
}

// ---------------------------------------------------------------------------
// StyleValue
// ---------------------------------------------------------------------------

/// The kind of a [`StyleValue`], used for typed blend dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Int,
    Color,
    Vec2,
    Vec3,
    Vec4,
    Rotation,
    Length,
    Length2,
    Shadow,
    ShadowList,
    Length2List,
    Computed,
    Keyword,
    Text,
}

/// A resolved property value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Float(f32),
    Int(i32),
    Color(Color),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Rotation(Quat),
    Length(Scalar),
    Length2(Scalar2),
    Shadow(BoxShadow),
    ShadowList(ValueList<BoxShadow>),
    Length2List(ValueList<Scalar2>),
    /// An unevaluated expression (`1.5em`, or a blend involving one).
    Computed(Arc<Computed>),
    /// An identifier such as `center` or `hidden`.
    Keyword(Arc<str>),
    /// A string, e.g. pseudo-element `content`.
    Text(Arc<str>),
}

impl StyleValue {
    pub fn keyword(name: &str) -> Self {
        Self::Keyword(Arc::from(name))
    }

    pub fn text(text: &str) -> Self {
        Self::Text(Arc::from(text))
    }

    pub fn computed(expr: Computed) -> Self {
        Self::Computed(Arc::new(expr))
    }

    /// The variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::Color(_) => ValueKind::Color,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Vec4(_) => ValueKind::Vec4,
            Self::Rotation(_) => ValueKind::Rotation,
            Self::Length(_) => ValueKind::Length,
            Self::Length2(_) => ValueKind::Length2,
            Self::Shadow(_) => ValueKind::Shadow,
            Self::ShadowList(_) => ValueKind::ShadowList,
            Self::Length2List(_) => ValueKind::Length2List,
            Self::Computed(_) => ValueKind::Computed,
            Self::Keyword(_) => ValueKind::Keyword,
            Self::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_length(&self) -> Option<Scalar> {
        match self {
            Self::Length(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Vec2(v) => write!(f, "{} {}", v.x, v.y),
            Self::Vec3(v) => write!(f, "{} {} {}", v.x, v.y, v.z),
            Self::Vec4(v) => write!(f, "{} {} {} {}", v.x, v.y, v.z, v.w),
            Self::Rotation(q) => write!(f, "{}deg", q.rotation_z_degrees()),
            Self::Length(s) => write!(f, "{s}"),
            Self::Length2(s) => write!(f, "{s}"),
            Self::Shadow(s) => write!(f, "{s}"),
            Self::ShadowList(list) => write_list(f, list.to_vec()),
            Self::Length2List(list) => write_list(f, list.to_vec()),
            Self::Computed(expr) => write!(f, "{expr}"),
            Self::Keyword(k) => f.write_str(k),
            Self::Text(t) => write!(f, "{t:?}"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: Vec<T>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<Color> for StyleValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<Scalar> for StyleValue {
    fn from(s: Scalar) -> Self {
        Self::Length(s)
    }
}

impl From<Scalar2> for StyleValue {
    fn from(s: Scalar2) -> Self {
        Self::Length2(s)
    }
}

impl From<Vec2> for StyleValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Quat> for StyleValue {
    fn from(q: Quat) -> Self {
        Self::Rotation(q)
    }
}

impl From<BoxShadow> for StyleValue {
    fn from(s: BoxShadow) -> Self {
        Self::Shadow(s)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
