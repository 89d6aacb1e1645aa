use crate::math::Vec3;

/// Coarseness of the instant preview seeded when accumulation is empty.
pub const PREVIEW_SCALE: usize = 16;

/// Shared accumulation target and the resolved display frame.
///
/// All access goes through the render context mutex; the methods here assume
/// the caller holds it.
pub struct Film {
    width: usize,
    height: usize,
    accum: Vec<Vec3>,
    frame: Vec<Vec3>,
    accum_count: f32,
    generation: u32,
}

impl Default for Film {
    fn default() -> Self {
        Self::new()
    }
}

impl Film {
    /// Creates an empty, zero-sized `Film`.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            accum: Vec::new(),
            frame: Vec::new(),
            accum_count: 0.0,
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn res(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the generation current passes have to match to merge.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns the total weight accumulated since the last invalidation.
    pub fn accum_count(&self) -> f32 {
        self.accum_count
    }

    /// Returns the raw accumulator sums.
    pub fn accum(&self) -> &[Vec3] {
        &self.accum
    }

    /// Returns the resolved display pixels. Meaningful after
    /// [`Film::resolve`].
    pub fn frame(&self) -> &[Vec3] {
        &self.frame
    }

    /// Checks if no samples have been merged since the last invalidation.
    pub fn is_empty(&self) -> bool {
        self.accum_count == 0.0
    }

    /// Drops all accumulated weight and starts a new generation, so samples
    /// still in flight on workers can never merge.
    pub fn invalidate(&mut self) {
        self.accum_count = 0.0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Resizes the buffers to `scale` times the screen dimensions if they
    /// differ. A resize implies an invalidation.
    pub fn fit_to(&mut self, scale: f32, screen: (u32, u32)) {
        let width = (scale * screen.0 as f32) as usize;
        let height = (scale * screen.1 as f32) as usize;
        if (width, height) == (self.width, self.height) {
            return;
        }

        self.width = width;
        self.height = height;
        self.accum = vec![Vec3::zeros(); width * height];
        self.frame = vec![Vec3::zeros(); width * height];
        self.invalidate();
    }

    /// Merges a completed worker pass into the accumulator, then clears the
    /// pass buffer. Passes from a stale generation or a stale size are
    /// dropped.
    pub fn merge(&mut self, local: &mut LocalFilm) {
        if !self.accum.is_empty()
            && !local.accum.is_empty()
            && local.generation == self.generation
            && local.res() == self.res()
        {
            for (sum, pass) in self.accum.iter_mut().zip(&local.accum) {
                *sum += *pass;
            }
            self.accum_count += local.count;
        }
        local.clear();
    }

    /// Seeds a [`PREVIEW_SCALE`]x coarse preview so a frame is presentable
    /// immediately. `sample` is called as `(u, v, aspect_ratio)` per coarse
    /// cell; the cell color overwrites its whole tile with 1/256 weight.
    pub fn seed_preview(&mut self, mut sample: impl FnMut(f32, f32, f32) -> Vec3) {
        let coarse_w = self.width / PREVIEW_SCALE;
        let coarse_h = self.height / PREVIEW_SCALE;
        let weight = 1.0 / (PREVIEW_SCALE * PREVIEW_SCALE) as f32;
        let aspect_ratio = coarse_w as f32 / coarse_h as f32;

        for j in 0..coarse_h {
            for i in 0..coarse_w {
                let u = 1.0 - i as f32 / (coarse_w - 1) as f32;
                let v = 1.0 - j as f32 / (coarse_h - 1) as f32;
                let color = sample(u, v, aspect_ratio) * weight;
                for g in 0..PREVIEW_SCALE {
                    for t in 0..PREVIEW_SCALE {
                        self.accum[(j * PREVIEW_SCALE + g) * self.width
                            + (i * PREVIEW_SCALE + t)] = color;
                    }
                }
            }
        }

        self.accum_count += weight;
    }

    /// Resolves the display frame as the accumulator average.
    pub fn resolve(&mut self) {
        debug_assert!(self.accum_count > 0.0);
        let inv = 1.0 / self.accum_count;
        for (out, sum) in self.frame.iter_mut().zip(&self.accum) {
            *out = *sum * inv;
        }
    }
}

/// A worker's private accumulation buffer, holding one pass at a time.
pub struct LocalFilm {
    width: usize,
    height: usize,
    accum: Vec<Vec3>,
    count: f32,
    generation: u32,
}

impl Default for LocalFilm {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFilm {
    /// Creates an empty, zero-sized `LocalFilm`.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            accum: Vec::new(),
            count: 0.0,
            generation: 0,
        }
    }

    pub fn res(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the weight of the held pass.
    pub fn count(&self) -> f32 {
        self.count
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Adopts the shared generation so the next pass is mergeable.
    pub fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }

    /// Reallocates to `res`, dropping any pass contents.
    pub fn resize(&mut self, res: (usize, usize)) {
        self.width = res.0;
        self.height = res.1;
        self.accum = vec![Vec3::zeros(); self.width * self.height];
        self.count = 0.0;
    }

    /// Zeroes the pass contents.
    pub fn clear(&mut self) {
        for pixel in &mut self.accum {
            *pixel = Vec3::zeros();
        }
        self.count = 0.0;
    }

    /// Renders one full pass at `scale`x coarseness: `sample` is called as
    /// `(u, v, aspect_ratio)` once per coarse cell and the estimate is
    /// splatted over the cell's tile with 1/scale^2 weight, so a pass
    /// averages one full-resolution sample.
    ///
    /// The `(1 - u, 1 - v)` flip matches the orientation of the presented
    /// frame.
    pub fn render_pass(&mut self, scale: usize, mut sample: impl FnMut(f32, f32, f32) -> Vec3) {
        if self.accum.is_empty() {
            return;
        }

        let coarse_w = self.width / scale;
        let coarse_h = self.height / scale;
        let weight = 1.0 / (scale * scale) as f32;
        let aspect_ratio = self.width as f32 / self.height as f32;

        for j in 0..coarse_h {
            for i in 0..coarse_w {
                let u = 1.0 - i as f32 / (coarse_w - 1) as f32;
                let v = 1.0 - j as f32 / (coarse_h - 1) as f32;

                // Clip the splat to the frame edges
                let tile_w = scale.min(self.width - i * scale);
                let tile_h = scale.min(self.height - j * scale);

                let color = sample(u, v, aspect_ratio) * weight;
                for g in 0..tile_h {
                    for t in 0..tile_w {
                        self.accum[(j * scale + g) * self.width + (i * scale + t)] += color;
                    }
                }
            }
        }

        self.count += weight;
    }
}
