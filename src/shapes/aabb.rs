use crate::math::{Ray, Vec3};

/// An axis-aligned box spanning `origin` to `origin + size`.
#[derive(Copy, Clone, Debug)]
pub struct Aabb {
    pub origin: Vec3,
    pub size: Vec3,
}

/// Near-hit distance and outward normal of a box intersection.
#[derive(Copy, Clone, Debug)]
pub struct AabbHit {
    pub t: f32,
    pub normal: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from its minimum corner and size.
    pub fn new(origin: Vec3, size: Vec3) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0 && size.z > 0.0);
        Self { origin, size }
    }

    /// Returns the geometric center.
    pub fn center(&self) -> Vec3 {
        self.origin + self.size * 0.5
    }

    /// Checks for [Ray] intersection with the slab method, returning the near
    /// hit and the outward normal of the slab it lies on.
    ///
    /// The near distance is negative when the box is behind the ray origin,
    /// or straddles it; callers filter on `t >= 0`. Axis-aligned directions
    /// divide to the IEEE infinities, which fall through the interval tests.
    pub fn intersect(&self, ray: Ray) -> Option<AabbHit> {
        let a = self.origin;
        let b = self.origin + self.size;

        let (mut t_min, mut t_max) = if ray.d.x >= 0.0 {
            ((a.x - ray.o.x) / ray.d.x, (b.x - ray.o.x) / ray.d.x)
        } else {
            ((b.x - ray.o.x) / ray.d.x, (a.x - ray.o.x) / ray.d.x)
        };
        let mut hit_axis = 0;

        let (ty_min, ty_max) = if ray.d.y >= 0.0 {
            ((a.y - ray.o.y) / ray.d.y, (b.y - ray.o.y) / ray.d.y)
        } else {
            ((b.y - ray.o.y) / ray.d.y, (a.y - ray.o.y) / ray.d.y)
        };

        if t_min > ty_max || ty_min > t_max {
            return None;
        }
        if ty_min > t_min {
            t_min = ty_min;
            hit_axis = 1;
        }
        t_max = t_max.min(ty_max);

        let (tz_min, tz_max) = if ray.d.z >= 0.0 {
            ((a.z - ray.o.z) / ray.d.z, (b.z - ray.o.z) / ray.d.z)
        } else {
            ((b.z - ray.o.z) / ray.d.z, (a.z - ray.o.z) / ray.d.z)
        };

        if t_min > tz_max || tz_min > t_max {
            return None;
        }
        if tz_min > t_min {
            t_min = tz_min;
            hit_axis = 2;
        }

        // The normal points against the ray on the axis that bounded t_min
        let normal = match hit_axis {
            0 => {
                if ray.d.x > 0.0 {
                    Vec3::new(-1.0, 0.0, 0.0)
                } else {
                    Vec3::new(1.0, 0.0, 0.0)
                }
            }
            1 => {
                if ray.d.y > 0.0 {
                    Vec3::new(0.0, -1.0, 0.0)
                } else {
                    Vec3::new(0.0, 1.0, 0.0)
                }
            }
            _ => {
                if ray.d.z > 0.0 {
                    Vec3::new(0.0, 0.0, -1.0)
                } else {
                    Vec3::new(0.0, 0.0, 1.0)
                }
            }
        };

        Some(AabbHit { t: t_min, normal })
    }
}
