use approx::AbsDiffEq;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Vectors.html

/// A three-dimensional `f32` vector, doubling as a linear RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// The x component of the vector
    pub x: f32,
    /// The y component of the vector
    pub y: f32,
    /// The z component of the vector
    pub z: f32,
}

impl Vec3 {
    /// Creates a new `Vec3`.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let ret = Self { x, y, z };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns a `Vec3` with all components zero.
    #[inline]
    pub fn zeros() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Returns a `Vec3` with all components one.
    #[inline]
    pub fn ones() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }

    /// Checks if any of the components is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the dot product with `other`.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product with `other`.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the squared length.
    #[inline]
    pub fn length_sqr(&self) -> f32 {
        self.dot(*self)
    }

    /// Returns the length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }

    /// Returns a unit-length copy.
    #[inline]
    pub fn normalized(&self) -> Self {
        debug_assert!(self.length() > 0.0);
        *self / self.length()
    }

    /// Returns the componentwise maximum with `other`.
    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Returns a copy with every component clamped to `[min, max]`.
    #[inline]
    pub fn clamped(&self, min: f32, max: f32) -> Self {
        debug_assert!(min <= max);
        Self {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
            z: self.z.clamp(min, max),
        }
    }

    /// Returns the average of the components.
    #[inline]
    pub fn avg(&self) -> f32 {
        (self.x + self.y + self.z) / 3.0
    }

    /// Checks if every component is within 1e-4 of zero.
    #[inline]
    pub fn is_near_zero(&self) -> bool {
        self.x.abs() < 1e-4 && self.y.abs() < 1e-4 && self.z.abs() < 1e-4
    }

    /// Returns this direction mirrored about `normal`.
    #[inline]
    pub fn reflected(&self, normal: Self) -> Self {
        *self + normal * (-2.0 * normal.dot(*self))
    }

    /// Linearly interpolates toward `other` by `t`.
    #[inline]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }
}

impl From<f32> for Vec3 {
    #[inline]
    fn from(s: f32) -> Self {
        Self::new(s, s, s)
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Componentwise product, the radiance filtering operation.
impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, s: f32) -> Self {
        debug_assert!(s != 0.0);
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}
