//! CSS scalar values: Scalar, Unit (px, %, auto), Scalar2, ScalarBox.

use std::fmt;

/// A CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Absolute points (`px`, or a bare number).
    Point,
    /// Percentage of the parent dimension.
    Percent,
    /// Auto-size (content-based).
    Auto,
}

/// A length with a unit, e.g. `10px`, `50%`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Zero points.
    pub const ZERO: Scalar = Scalar {
        value: 0.0,
        unit: Unit::Point,
    };

    /// Create a scalar in points.
    pub fn point(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Point,
        }
    }

    /// Create a scalar as a percentage.
    pub fn percent(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// Create an auto scalar.
    pub fn auto() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Auto,
        }
    }

    /// Returns `true` if this scalar is auto-sized.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Returns `true` if the magnitude is exactly zero (any unit but auto).
    pub fn is_zero(&self) -> bool {
        self.unit != Unit::Auto && self.value == 0.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Auto => return write!(f, "auto"),
            Unit::Point => "px",
            Unit::Percent => "%",
        };
        if self.value.fract() == 0.0 {
            write!(f, "{}{suffix}", self.value as i64)
        } else {
            write!(f, "{}{suffix}", self.value)
        }
    }
}

/// A pair of scalars, e.g. `transform-origin: 50% 0px` or a shadow offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar2 {
    pub x: Scalar,
    pub y: Scalar,
}

impl Scalar2 {
    /// Create a new pair.
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    /// Both components set to zero points.
    pub fn zero() -> Self {
        Self::new(Scalar::ZERO, Scalar::ZERO)
    }
}

impl Default for Scalar2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Scalar2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Four-sided scalar values (top, right, bottom, left) like CSS margin/padding.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBox {
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub left: Scalar,
}

impl ScalarBox {
    /// Create a box with the same scalar on all four sides.
    pub fn all(v: Scalar) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Create a box with symmetric vertical and horizontal values.
    pub fn symmetric(vertical: Scalar, horizontal: Scalar) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create a box with explicit values for all four sides.
    pub fn new(top: Scalar, right: Scalar, bottom: Scalar, left: Scalar) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}
