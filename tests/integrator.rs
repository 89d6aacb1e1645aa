use approx::assert_abs_diff_eq;

use routa::{
    camera::FlyCamera,
    cubemap::Cubemap,
    integrator::{Params, PathIntegrator},
    materials::Material,
    math::Vec3,
    sampling::PathSampler,
    scene::Scene,
    shapes::Object,
};

fn solid_cubemap(color: [u8; 3]) -> Cubemap {
    let (width, height) = (8, 8);
    let faces: [Vec<u8>; 6] = std::array::from_fn(|_| {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..(width * height) {
            data.extend_from_slice(&color);
        }
        data
    });
    Cubemap::from_raw(faces, width, height, 3)
}

// [right, left, top, bottom, front, back]
fn tinted_cubemap(colors: [[u8; 3]; 6]) -> Cubemap {
    let (width, height) = (8, 8);
    let faces = colors.map(|c| {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..(width * height) {
            data.extend_from_slice(&c);
        }
        data
    });
    Cubemap::from_raw(faces, width, height, 3)
}

#[test]
fn skybox_only_returns_the_environment() {
    let scene = Scene::new();
    let skybox = tinted_cubemap([
        [255, 0, 0],
        [0, 255, 0],
        [10, 20, 30],
        [30, 20, 10],
        [10, 200, 30],
        [0, 0, 255],
    ]);
    let integrator = PathIntegrator::new(&scene, &skybox, Params::default());
    let camera = FlyCamera::default();
    let mut sampler = PathSampler::new(0xC0FFEE, 0);

    // The centered pixel looks straight down +Z, the front face
    let color = integrator.sample_pixel(&camera, &mut sampler, 0.5, 0.5, 1.0);
    assert_abs_diff_eq!(
        color,
        Vec3::new(10.0 / 255.0, 200.0 / 255.0, 30.0 / 255.0),
        epsilon = 1.0 / 255.0
    );
}

#[test]
fn estimates_are_clamped() {
    let mut scene = Scene::new();
    scene.add(Object::sphere(
        Material {
            albedo: Vec3::new(1.0, 0.4, 0.0),
            emission_color: Vec3::ones(),
            emission_power: 5.0,
            ..Material::default()
        },
        Vec3::new(0.0, 2.0, 3.0),
        1.0,
    ));
    scene.add(Object::sphere(
        Material {
            albedo: Vec3::new(0.9, 0.9, 0.9),
            ..Material::default()
        },
        Vec3::new(0.0, 0.0, 3.0),
        1.0,
    ));
    scene.add(Object::aabb(
        Material {
            albedo: Vec3::new(0.8, 0.8, 0.9),
            ..Material::default()
        },
        Vec3::new(-4.0, -1.2, 0.0),
        Vec3::new(8.0, 0.2, 8.0),
    ));

    let skybox = solid_cubemap([255, 255, 255]);
    let integrator = PathIntegrator::new(&scene, &skybox, Params::default());
    let camera = FlyCamera::default();
    let mut sampler = PathSampler::new(0xDECAF, 0);

    for i in 0..200 {
        let u = (i % 20) as f32 / 19.0;
        let v = (i / 20) as f32 / 9.0;
        let color = integrator.sample_pixel(&camera, &mut sampler, u, v, 1.0);
        for c in [color.x, color.y, color.z] {
            assert!((0.0..=1.0).contains(&c), "{} out of range at {} {}", c, u, v);
        }
    }
}

#[test]
fn lambertian_sphere_against_white_sky() {
    let mut scene = Scene::new();
    scene.add(Object::sphere(
        Material {
            albedo: Vec3::from(0.5),
            ..Material::default()
        },
        Vec3::new(0.0, 0.0, 3.0),
        1.0,
    ));

    let skybox = solid_cubemap([255, 255, 255]);
    let integrator = PathIntegrator::new(&scene, &skybox, Params::default());
    let camera = FlyCamera::default();
    let mut sampler = PathSampler::new(0xFEED, 0);

    // The silhouette center bounces off once and escapes, so the mean
    // converges to the albedo
    let mut mean = Vec3::zeros();
    let samples = 1000;
    for _ in 0..samples {
        mean += integrator.sample_pixel(&camera, &mut sampler, 0.5, 0.5, 1.0);
    }
    mean = mean / samples as f32;

    assert_abs_diff_eq!(mean, Vec3::from(0.5), epsilon = 0.05);
}

#[test]
fn mirror_sphere_reflects_the_face_behind_the_camera() {
    let mut scene = Scene::new();
    scene.add(Object::sphere(
        Material {
            albedo: Vec3::ones(),
            metallic: 1.0,
            roughness: 0.0,
            ..Material::default()
        },
        Vec3::new(0.0, 0.0, 3.0),
        1.0,
    ));

    // Red +X, green -X, blue everywhere else
    let skybox = tinted_cubemap([
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [0, 0, 255],
        [0, 0, 255],
        [0, 0, 255],
    ]);
    let integrator = PathIntegrator::new(&scene, &skybox, Params::default());
    let camera = FlyCamera::default();
    let mut sampler = PathSampler::new(0xACE, 0);

    let color = integrator.sample_pixel(&camera, &mut sampler, 0.5, 0.5, 1.0);
    assert_abs_diff_eq!(color, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-3);
}

#[test]
fn floor_bleeds_the_nearest_wall_color() {
    let mut scene = Scene::new();
    // Red wall on -x, green wall on +x, matte floor between, emissive patch
    // above
    scene.add(Object::aabb(
        Material {
            albedo: Vec3::new(1.0, 0.1, 0.1),
            ..Material::default()
        },
        Vec3::new(-2.2, 0.0, 0.0),
        Vec3::new(0.2, 3.0, 4.0),
    ));
    scene.add(Object::aabb(
        Material {
            albedo: Vec3::new(0.1, 1.0, 0.1),
            ..Material::default()
        },
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.2, 3.0, 4.0),
    ));
    scene.add(Object::aabb(
        Material {
            albedo: Vec3::from(0.85),
            ..Material::default()
        },
        Vec3::new(-2.2, -0.2, 0.0),
        Vec3::new(4.4, 0.2, 4.0),
    ));
    scene.add(Object::aabb(
        Material {
            emission_color: Vec3::ones(),
            emission_power: 2.0,
            ..Material::default()
        },
        Vec3::new(-0.5, 2.8, 1.5),
        Vec3::new(1.0, 0.2, 1.0),
    ));

    let skybox = solid_cubemap([0, 0, 0]);
    let integrator = PathIntegrator::new(&scene, &skybox, Params::default());
    let camera = FlyCamera::new(
        Vec3::new(0.0, 1.0, 0.2),
        std::f32::consts::FRAC_PI_2,
        0.0,
        90.0,
    );
    let mut sampler = PathSampler::new(0xB0071E, 0);

    // u maps to -x on screen, so 0.85 lands the primary on the floor by the
    // red wall and 0.15 by the green wall
    let samples = 2500;
    let mut near_red = Vec3::zeros();
    let mut near_green = Vec3::zeros();
    for _ in 0..samples {
        near_red += integrator.sample_pixel(&camera, &mut sampler, 0.85, 0.25, 1.0);
        near_green += integrator.sample_pixel(&camera, &mut sampler, 0.15, 0.25, 1.0);
    }
    near_red = near_red / samples as f32;
    near_green = near_green / samples as f32;

    assert!(near_red.x > 0.0);
    assert!(
        near_red.x - near_red.y > near_green.x - near_green.y,
        "near_red {:?} near_green {:?}",
        near_red,
        near_green
    );
}
