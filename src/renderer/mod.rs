mod film;
mod worker;

pub use film::{Film, LocalFilm, PREVIEW_SCALE};

use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

use crate::{
    camera::{Direction, FlyCamera},
    cubemap::Cubemap,
    expect,
    integrator::{Params, PathIntegrator},
    math::Vec3,
    routa_debug, routa_trace,
    sampling::PathSampler,
    scene::Scene,
};

/// Worker pool sizing and estimator tuning.
#[derive(Copy, Clone, Debug)]
pub struct RendererSettings {
    /// Worker thread count. Every consecutive worker starts twice as coarse,
    /// capped at 16x, so the pool refines a preview progressively.
    pub worker_count: usize,
    /// Path estimator knobs.
    pub path: Params,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            worker_count: 16,
            path: Params::default(),
        }
    }
}

// Camera lives next to the film so workers get a coherent snapshot of both
// under one lock.
pub(crate) struct Shared {
    pub(crate) film: Film,
    pub(crate) camera: FlyCamera,
    pub(crate) shutdown: bool,
}

/// Owns the immutable scene data and the shared film the worker pool and the
/// presenter communicate through.
pub struct RenderContext {
    scene: Scene,
    skybox: Cubemap,
    params: Params,
    pub(crate) shared: Mutex<Shared>,
}

impl RenderContext {
    /// Creates a new `RenderContext`. `scene` and `skybox` are immutable from
    /// here on.
    pub fn new(scene: Scene, skybox: Cubemap, camera: FlyCamera, params: Params) -> Self {
        Self {
            scene,
            skybox,
            params,
            shared: Mutex::new(Shared {
                film: Film::new(),
                camera,
                shutdown: false,
            }),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn skybox(&self) -> &Cubemap {
        &self.skybox
    }

    pub fn params(&self) -> Params {
        self.params
    }

    /// Spawns the render worker pool. Worker `i` renders passes at
    /// `min(2^i, 16)`x coarseness: the coarse workers keep preview latency
    /// low while the fine ones fill in full resolution.
    pub fn spawn_workers(self: &Arc<Self>, count: usize) -> Vec<JoinHandle<()>> {
        (0..count)
            .map(|i| {
                let ctx = Arc::clone(self);
                let init_scale = 1usize << i.min(4);
                expect!(
                    std::thread::Builder::new()
                        .name(format!("RenderWorker{}", i))
                        .spawn(move || worker::launch(ctx, i, init_scale)),
                    "Failed to spawn RenderWorker"
                )
            })
            .collect()
    }

    /// Drops accumulated samples so stale camera state never reaches the
    /// screen.
    pub fn invalidate(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.film.invalidate();
    }

    /// Moves the camera and restarts sampling.
    pub fn translate_camera(&self, direction: Direction, speed: f32) {
        let mut shared = self.shared.lock().unwrap();
        shared.camera.translate(direction, speed);
        shared.film.invalidate();
    }

    /// Turns the camera and restarts sampling.
    pub fn rotate_camera(&self, dx: f32, dy: f32) {
        let mut shared = self.shared.lock().unwrap();
        shared.camera.rotate(dx, dy);
        shared.film.invalidate();
    }

    /// Returns the current (generation, accumulated weight) pair.
    pub fn progress(&self) -> (u32, f32) {
        let shared = self.shared.lock().unwrap();
        (shared.film.generation(), shared.film.accum_count())
    }

    /// Signals all workers to exit after their current pass.
    pub fn shutdown(&self) {
        routa_debug!("shutdown: Signaling workers");
        let mut shared = self.shared.lock().unwrap();
        shared.shutdown = true;
    }

    /// Resolves the current frame at `scale` times the screen resolution and
    /// hands it to `show` while the film lock is held.
    ///
    /// Whenever accumulation is empty a [`PREVIEW_SCALE`]x coarse preview is
    /// seeded first, so something is presentable immediately after a move or
    /// a resize.
    pub fn present<R>(
        &self,
        scale: f32,
        screen: (u32, u32),
        show: impl FnOnce(usize, usize, &[Vec3]) -> R,
    ) -> R {
        routa_trace!("present: Waiting for lock on film");
        let mut shared = self.shared.lock().unwrap();
        routa_trace!("present: Acquired film");

        let Shared { film, camera, .. } = &mut *shared;
        film.fit_to(scale, screen);

        if film.is_empty() {
            routa_debug!("present: Seeding preview");
            let integrator = PathIntegrator::new(&self.scene, &self.skybox, self.params);
            let mut sampler = PathSampler::from_entropy(u64::MAX);
            let camera = *camera;
            film.seed_preview(|u, v, aspect_ratio| {
                integrator.sample_pixel(&camera, &mut sampler, u, v, aspect_ratio)
            });
        }

        film.resolve();

        routa_trace!("present: Releasing film");
        show(film.width(), film.height(), film.frame())
    }
}
