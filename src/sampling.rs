use rand::{distributions::Standard, Rng};
use rand_pcg::Pcg32;

use crate::math::Vec3;

/// Uniform random source for path sampling.
pub struct PathSampler {
    rng: Pcg32,
}

impl PathSampler {
    /// Creates a new `PathSampler` on `stream` of `seed`.
    ///
    /// Pcg streams are uncorrelated so samplers sharing a seed stay
    /// independent as long as their streams differ.
    pub fn new(seed: u64, stream: u64) -> Self {
        Self {
            rng: Pcg32::new(seed, stream),
        }
    }

    /// Creates a new `PathSampler` on `stream` of an OS-random seed.
    pub fn from_entropy(stream: u64) -> Self {
        Self::new(rand::thread_rng().gen(), stream)
    }

    /// Returns a uniform f32 in [0, 1).
    pub fn sample_1d(&mut self) -> f32 {
        self.rng.sample(Standard)
    }

    /// Returns a direction on the unit sphere, as a normalized sample of the
    /// [-1, 1] cube.
    pub fn unit_direction(&mut self) -> Vec3 {
        Vec3::new(
            self.sample_1d() * 2.0 - 1.0,
            self.sample_1d() * 2.0 - 1.0,
            self.sample_1d() * 2.0 - 1.0,
        )
        .normalized()
    }

    /// Returns a direction on the unit sphere, mirrored into the hemisphere
    /// around `normal`.
    pub fn hemisphere_direction(&mut self, normal: Vec3) -> Vec3 {
        let dir = self.unit_direction();
        if dir.dot(normal) < 0.0 {
            -dir
        } else {
            dir
        }
    }
}
