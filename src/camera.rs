use crate::math::{Ray, Vec3};

/// Movement axes for [`FlyCamera::translate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Radians turned per pixel of mouse travel.
const LOOK_SENSITIVITY: f32 = 0.002;
/// Pitch stops short of the poles so the view basis stays well defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

const WORLD_UP: Vec3 = Vec3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

/// A free-fly pinhole camera.
#[derive(Copy, Clone, Debug)]
pub struct FlyCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    half_tan_fov: f32,
}

impl Default for FlyCamera {
    /// At the origin, looking down +Z, with a 90 degree vertical field of
    /// view.
    fn default() -> Self {
        Self::new(Vec3::zeros(), std::f32::consts::FRAC_PI_2, 0.0, 90.0)
    }
}

impl FlyCamera {
    /// Creates a new `FlyCamera`. `yaw` and `pitch` are in radians, `fov` is
    /// vertical and in degrees.
    pub fn new(position: Vec3, yaw: f32, pitch: f32, fov: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            half_tan_fov: (fov.to_radians() / 2.0).tan(),
        }
    }

    /// Returns the eye position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        )
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(WORLD_UP).normalized()
    }

    fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Returns the [Ray] from the eye through the normalized screen point
    /// `(u, v)`.
    pub fn ray_through_screen(&self, u: f32, v: f32, aspect_ratio: f32) -> Ray {
        let x = (2.0 * u - 1.0) * aspect_ratio * self.half_tan_fov;
        let y = (2.0 * v - 1.0) * self.half_tan_fov;
        let d = self.forward() + self.right() * x + self.up() * y;
        Ray::new(self.position, d)
    }

    /// Moves the camera along its view basis.
    pub fn translate(&mut self, direction: Direction, speed: f32) {
        let step = match direction {
            Direction::Forward => self.forward(),
            Direction::Backward => -self.forward(),
            Direction::Left => -self.right(),
            Direction::Right => self.right(),
        };
        self.position += step * speed;
    }

    /// Turns the camera by the given mouse deltas.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - dy * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}
