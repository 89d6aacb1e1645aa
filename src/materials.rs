use crate::math::Vec3;

// The metallic workflow and the 0.16 * reflectance^2 dielectric F0 follow
// the Filament conventions
// https://google.github.io/filament/Filament.html#materialsystem/parameterization

/// Metallic-workflow surface parameters.
#[derive(Copy, Clone, Debug)]
pub struct Material {
    /// Diffuse reflectance color, in [0, 1] per channel.
    pub albedo: Vec3,
    /// Width of the mirror lobe in [0, 1]; 0 is a perfect mirror.
    pub roughness: f32,
    /// Dielectric F0 scaling in [0, 1].
    pub reflectance: f32,
    /// Dielectric-to-metal interpolation in [0, 1].
    pub metallic: f32,
    /// Emission scale, 0 for non-emitters.
    pub emission_power: f32,
    /// Emission tint in [0, 1] per channel.
    pub emission_color: Vec3,
}

impl Default for Material {
    /// A white diffuse dielectric.
    fn default() -> Self {
        Self {
            albedo: Vec3::ones(),
            roughness: 1.0,
            reflectance: 0.0,
            metallic: 0.0,
            emission_power: 0.0,
            emission_color: Vec3::zeros(),
        }
    }
}

impl Material {
    /// Returns the reflectance at normal incidence.
    pub fn f0(&self) -> Vec3 {
        let dielectric = Vec3::from(0.16 * self.reflectance * self.reflectance);
        dielectric.lerp(self.albedo, self.metallic)
    }

    /// Checks if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission_power != 0.0
    }
}

/// Schlick's approximation of the Fresnel factor at `cos_theta`,
/// `F0 + (1 - F0)(1 - cos)^5`.
pub fn fresnel_schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ones() - f0) * (1.0 - cos_theta).powi(5)
}
