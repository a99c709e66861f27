//! Core geometry types: Vec2, Vec3, Vec4, Quat, Region.
//!
//! These are the value types animated by the interpolation engine and the box
//! type the layout pass reports to the renderer. All blends here are
//! unclamped: a factor outside `0..=1` extrapolates past the endpoints so that
//! overshooting timing functions (back, elastic) work.

use std::ops::{Add, Mul, Neg, Sub};

/// Scalar linear interpolation without clamping.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A 2D vector (translation, scale, offsets).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unclamped linear interpolation toward `other`.
    #[inline]
    pub fn lerp_unclamped(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A 3D vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Unclamped linear interpolation toward `other`.
    #[inline]
    pub fn lerp_unclamped(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Vec4
// ---------------------------------------------------------------------------

/// A 4D vector (corner radii, per-edge values).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Unclamped linear interpolation toward `other`.
    #[inline]
    pub fn lerp_unclamped(self, other: Vec4, t: f32) -> Vec4 {
        Vec4::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
            lerp(self.w, other.w, t),
        )
    }
}

// ---------------------------------------------------------------------------
// Quat
// ---------------------------------------------------------------------------

/// A rotation quaternion `(x, y, z, w)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `degrees` around the Z axis (the 2D rotation of a UI node).
    pub fn from_rotation_z(degrees: f32) -> Self {
        let half = degrees.to_radians() * 0.5;
        Self::new(0.0, 0.0, half.sin(), half.cos())
    }

    /// Rotation around Z in degrees, assuming a pure Z rotation.
    pub fn rotation_z_degrees(self) -> f32 {
        (2.0 * self.z.atan2(self.w)).to_degrees()
    }

    #[inline]
    fn dot(self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    fn normalized(self) -> Quat {
        let len = self.dot(self).sqrt();
        if len <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Spherical interpolation toward `other` without clamping `t`.
    ///
    /// Takes the short path around the sphere. Falls back to a normalized
    /// linear blend when the endpoints are nearly parallel.
    pub fn slerp_unclamped(self, other: Quat, t: f32) -> Quat {
        let mut to = other;
        let mut cos = self.dot(other);
        if cos < 0.0 {
            to = -other;
            cos = -cos;
        }

        if cos > 0.9995 {
            return Quat::new(
                lerp(self.x, to.x, t),
                lerp(self.y, to.y, t),
                lerp(self.z, to.z, t),
                lerp(self.w, to.w, t),
            )
            .normalized();
        }

        let angle = cos.acos();
        let sin = angle.sin();
        let a = ((1.0 - t) * angle).sin() / sin;
        let b = (t * angle).sin() / sin;
        Quat::new(
            self.x * a + to.x * b,
            self.y * a + to.y * b,
            self.z * a + to.z * b,
            self.w * a + to.w * b,
        )
    }
}

impl Neg for Quat {
    type Output = Quat;
    #[inline]
    fn neg(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, -self.w)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A laid-out box: position relative to the parent plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether this region has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<&taffy::Layout> for Region {
    fn from(layout: &taffy::Layout) -> Self {
        Region {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
