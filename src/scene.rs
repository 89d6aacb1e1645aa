use crate::{
    materials::Material,
    math::{Ray, Vec3},
    shapes::Object,
};

/// Hard cap on scene size; the object table is allocated once.
pub const MAX_OBJECTS: usize = 1024;

/// The closest intersection found along a traced ray.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Distance along the normalized ray direction.
    pub t: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Outward unit surface normal, facing the incoming ray.
    pub normal: Vec3,
    /// Index of the hit object in the scene table.
    pub object: usize,
}

/// Ordered table of renderable objects, immutable once rendering starts.
pub struct Scene {
    objects: Vec<Object>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty `Scene`.
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(MAX_OBJECTS),
        }
    }

    /// Appends `object`, returning the index assigned to it.
    pub fn add(&mut self, object: Object) -> usize {
        assert!(
            self.objects.len() < MAX_OBJECTS,
            "Scene is full ({} objects)",
            MAX_OBJECTS
        );
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Returns all objects in insertion order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Returns the object at `index`.
    pub fn object(&self, index: usize) -> &Object {
        &self.objects[index]
    }

    /// Finds the closest intersection along `ray`.
    ///
    /// The direction is normalized on entry so hit distances are in world
    /// units.
    pub fn trace(&self, ray: Ray) -> Option<Hit> {
        let ray = Ray::new(ray.o, ray.d.normalized());

        let mut nearest: Option<Hit> = None;
        for (i, object) in self.objects.iter().enumerate() {
            if let Some((t, normal)) = object.intersect(ray) {
                if t >= 0.0 && nearest.map_or(true, |n| t < n.t) {
                    nearest = Some(Hit {
                        t,
                        point: ray.point(t),
                        normal,
                        object: i,
                    });
                }
            }
        }
        nearest
    }

    /// Constructs the built-in demo set: metal panels of decreasing
    /// roughness, a matte floor, a handful of test solids and an emissive
    /// sphere above them.
    pub fn demo() -> Self {
        let mut scene = Self::new();

        for (i, roughness) in [1.0, 0.5, 0.0].into_iter().enumerate() {
            scene.add(Object::aabb(
                Material {
                    albedo: Vec3::new(1.0, 0.3, 0.3),
                    metallic: 1.0,
                    roughness,
                    ..Material::default()
                },
                Vec3::new(3.0 * i as f32, 0.0, 0.0),
                Vec3::new(3.0, 5.0, 0.1),
            ));
        }

        scene.add(Object::aabb(
            Material {
                albedo: Vec3::new(0.4, 0.3, 0.9),
                ..Material::default()
            },
            Vec3::new(0.0, -0.1, 0.0),
            Vec3::new(9.0, 0.1, 9.0),
        ));

        scene.add(Object::aabb(
            Material {
                albedo: Vec3::new(1.0, 0.0, 0.0),
                ..Material::default()
            },
            Vec3::new(5.0, 0.0, 6.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        scene.add(Object::aabb(
            Material {
                albedo: Vec3::new(1.0, 0.0, 1.0),
                reflectance: 1.0,
                roughness: 0.0,
                ..Material::default()
            },
            Vec3::new(4.0, 0.0, 5.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));

        scene.add(Object::sphere(
            Material {
                albedo: Vec3::new(1.0, 0.4, 0.0),
                ..Material::default()
            },
            Vec3::new(3.0, 1.0, 3.0),
            1.0,
        ));
        scene.add(Object::sphere(
            Material {
                albedo: Vec3::new(0.0, 1.0, 0.0),
                reflectance: 1.0,
                roughness: 0.0,
                ..Material::default()
            },
            Vec3::new(5.0, 1.0, 3.0),
            1.0,
        ));
        scene.add(Object::sphere(
            Material {
                albedo: Vec3::new(1.0, 0.4, 0.0),
                emission_color: Vec3::new(1.0, 0.5, 0.5),
                emission_power: 5.0,
                ..Material::default()
            },
            Vec3::new(3.0, 5.0, 3.0),
            1.0,
        ));

        scene
    }
}
