use crate::{
    camera::FlyCamera,
    cubemap::Cubemap,
    materials::fresnel_schlick,
    math::{Ray, Vec3},
    sampling::PathSampler,
    scene::{Hit, Scene},
};

/// Offset along new rays to step off the surface they originate from.
const RAY_OFFSET: f32 = 0.001;

/// Tuning knobs of the path estimator.
#[derive(Copy, Clone, Debug)]
pub struct Params {
    /// Maximum number of path vertices.
    pub max_depth: u32,
    /// Shadow rays cast per light estimate.
    pub light_samples: u32,
    /// Jitter scale on shadow ray directions.
    pub light_spread: f32,
    /// Blend weight of the explicit light estimate.
    pub light_sample_weight: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_depth: 5,
            light_samples: 5,
            light_spread: 0.5,
            light_sample_weight: 0.05,
        }
    }
}

/// Bounded-depth path estimator mixing hemisphere bounces with a one-bounce
/// explicit light sample.
pub struct PathIntegrator<'a> {
    scene: &'a Scene,
    skybox: &'a Cubemap,
    params: Params,
}

impl<'a> PathIntegrator<'a> {
    /// Creates a new `PathIntegrator` over an immutable scene and
    /// environment.
    pub fn new(scene: &'a Scene, skybox: &'a Cubemap, params: Params) -> Self {
        Self {
            scene,
            skybox,
            params,
        }
    }

    /// Estimates the radiance arriving through the normalized screen point
    /// `(u, v)`, clamped to [0, 1] per channel.
    pub fn sample_pixel(
        &self,
        camera: &FlyCamera,
        sampler: &mut PathSampler,
        u: f32,
        v: f32,
        aspect_ratio: f32,
    ) -> Vec3 {
        debug_assert!(!aspect_ratio.is_nan());

        let primary = camera.ray_through_screen(u, v, aspect_ratio);
        let mut ray = Ray::new(primary.o, primary.d.normalized());

        let mut contrib = Vec3::ones();
        let mut result = Vec3::zeros();

        for _ in 0..self.params.max_depth {
            let hit = match self.scene.trace(ray) {
                Some(hit) => hit,
                None => {
                    result += self.skybox.sample(ray.d) * contrib;
                    break;
                }
            };

            let sampled_light = self.sample_first_emitter(&hit, sampler);

            let material = self.scene.object(hit.object).material;

            let n = hit.normal;
            let n_o_v = n.dot(-ray.d).clamp(0.0, 1.0);
            let fresnel = fresnel_schlick(n_o_v, material.f0());

            let rand_dir = sampler.hemisphere_direction(n);

            result += material.emission_color * material.emission_power * contrib;

            let out_dir = if material.metallic > 0.001 || sampler.sample_1d() <= fresnel.avg() {
                // Mirror lobe, widened by roughness
                let reflect_dir = ray.d.reflected(-n);
                (rand_dir * material.roughness + reflect_dir).normalized()
            } else {
                contrib = contrib * (material.albedo * (1.0 - material.metallic));
                rand_dir
            };

            if !sampled_light.is_near_zero() {
                result += sampled_light * contrib * self.params.light_sample_weight;
                contrib = contrib * (1.0 - self.params.light_sample_weight);
            }

            ray = Ray::new(hit.point + out_dir * RAY_OFFSET, out_dir);
        }

        result.clamped(0.0, 1.0)
    }

    // Estimates direct light at `hit` from the first emitter in table order.
    // Emitters past the first are not sampled.
    fn sample_first_emitter(&self, hit: &Hit, sampler: &mut PathSampler) -> Vec3 {
        let mut color = Vec3::zeros();
        for (i, object) in self.scene.objects().iter().enumerate() {
            if !object.material.is_emissive() || i == hit.object {
                continue;
            }

            let to_light = object.origin() - hit.point;
            for _ in 0..self.params.light_samples {
                let jitter = sampler.hemisphere_direction(hit.normal);
                let dir = (jitter * self.params.light_spread + to_light).normalized();
                let shadow_ray = Ray::new(hit.point + dir * RAY_OFFSET, dir);
                // Whatever the shadow ray lands on contributes its emission
                if let Some(shadow_hit) = self.scene.trace(shadow_ray) {
                    let m = &self.scene.object(shadow_hit.object).material;
                    color += m.emission_color * m.emission_power;
                }
            }
            color = color / self.params.light_samples as f32;
            break;
        }
        color
    }
}
