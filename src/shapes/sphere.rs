use crate::math::Ray;
use crate::math::Vec3;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Spheres.html

/// A sphere.
#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Creates a new `Sphere`.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self { center, radius }
    }

    /// Checks for [Ray] intersection with this `Sphere`, returning the
    /// closest non-negative distance along the ray.
    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        // Quadratic coefficients of |O + tD - C|^2 = R^2
        let oc = self.center - ray.o;
        let a = ray.d.dot(ray.d);
        let b = -2.0 * oc.dot(ray.d);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let rd = discriminant.sqrt();

        // a > 0 so this is the smaller root
        let mut t = (-b - rd) / (2.0 * a);
        if t < 0.0 {
            t = (-b + rd) / (2.0 * a);
            if t < 0.0 {
                return None;
            }
        }

        Some(t)
    }
}
