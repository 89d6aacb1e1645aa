mod aabb;
mod sphere;

pub use aabb::{Aabb, AabbHit};
pub use sphere::Sphere;

use crate::{
    materials::Material,
    math::{Ray, Vec3},
};

/// The closed set of primitive shapes.
#[derive(Copy, Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Aabb(Aabb),
}

/// A shape with its surface material.
#[derive(Copy, Clone, Debug)]
pub struct Object {
    pub shape: Shape,
    pub material: Material,
}

impl Object {
    /// Creates a sphere object.
    pub fn sphere(material: Material, center: Vec3, radius: f32) -> Self {
        Self {
            shape: Shape::Sphere(Sphere::new(center, radius)),
            material,
        }
    }

    /// Creates a box object from its minimum corner and size.
    pub fn aabb(material: Material, origin: Vec3, size: Vec3) -> Self {
        Self {
            shape: Shape::Aabb(Aabb::new(origin, size)),
            material,
        }
    }

    /// Returns the representative origin, a sphere's center or a box's
    /// geometric center.
    pub fn origin(&self) -> Vec3 {
        match self.shape {
            Shape::Sphere(s) => s.center,
            Shape::Aabb(b) => b.center(),
        }
    }

    /// Checks for [Ray] intersection, returning the hit distance and the
    /// outward surface normal.
    pub fn intersect(&self, ray: Ray) -> Option<(f32, Vec3)> {
        match self.shape {
            Shape::Sphere(s) => s.intersect(ray).map(|t| {
                let normal = (ray.point(t) - s.center).normalized();
                (t, normal)
            }),
            Shape::Aabb(b) => b
                .intersect(ray)
                .map(|AabbHit { t, normal }| (t, normal)),
        }
    }
}
