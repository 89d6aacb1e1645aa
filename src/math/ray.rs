use super::Vec3;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Rays.html

/// A ray with origin `o` and direction `d`.
///
/// `d` is expected to be unit-length by the time the ray is traced; the
/// scene trace normalizes on entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub o: Vec3,
    pub d: Vec3,
}

impl Ray {
    /// Creates a new `Ray`.
    #[inline]
    pub fn new(o: Vec3, d: Vec3) -> Self {
        let ret = Self { o, d };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Checks if any of the members in this `Ray` contain NaNs.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans()
    }

    /// Finds the point on this `Ray` at distance `t`.
    #[inline]
    pub fn point(&self, t: f32) -> Vec3 {
        self.o + self.d * t
    }
}
