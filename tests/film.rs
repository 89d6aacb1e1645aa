use approx::assert_abs_diff_eq;

use routa::{
    math::Vec3,
    renderer::{Film, LocalFilm, PREVIEW_SCALE},
};

#[test]
fn fit_to_allocates_and_invalidates() {
    let mut film = Film::new();
    assert_eq!(film.res(), (0, 0));
    assert_eq!(film.generation(), 0);

    film.fit_to(1.0, (64, 48));
    assert_eq!(film.res(), (64, 48));
    assert!(film.is_empty());
    assert_eq!(film.generation(), 1);
    assert_eq!(film.accum().len(), 64 * 48);
    assert_eq!(film.frame().len(), 64 * 48);

    // Same target is a no-op
    film.fit_to(1.0, (64, 48));
    assert_eq!(film.generation(), 1);

    // Scaled target resizes again
    film.fit_to(0.5, (64, 48));
    assert_eq!(film.res(), (32, 24));
    assert_eq!(film.generation(), 2);
}

#[test]
fn seed_preview_weight() {
    let mut film = Film::new();
    film.fit_to(1.0, (64, 48));

    let color = Vec3::new(0.6, 0.3, 0.9);
    film.seed_preview(|_, _, _| color);

    let weight = 1.0 / (PREVIEW_SCALE * PREVIEW_SCALE) as f32;
    assert_eq!(film.accum_count(), weight);
    for sum in film.accum() {
        assert_abs_diff_eq!(*sum, color * weight, epsilon = 1e-7);
    }

    film.resolve();
    for pixel in film.frame() {
        assert_abs_diff_eq!(*pixel, color, epsilon = 1e-6);
    }
}

#[test]
fn seed_preview_cells_see_the_whole_screen() {
    let mut film = Film::new();
    film.fit_to(1.0, (64, 64));

    let mut us: Vec<f32> = Vec::new();
    let mut vs: Vec<f32> = Vec::new();
    film.seed_preview(|u, v, aspect_ratio| {
        assert_abs_diff_eq!(aspect_ratio, 1.0, epsilon = 1e-6);
        us.push(u);
        vs.push(v);
        Vec3::zeros()
    });

    assert_eq!(us.len(), 16);
    for &u in &us {
        assert!((0.0..=1.0).contains(&u));
    }
    assert!(us.iter().any(|&u| u == 0.0) && us.iter().any(|&u| u == 1.0));
    assert!(vs.iter().any(|&v| v == 0.0) && vs.iter().any(|&v| v == 1.0));
}

#[test]
fn resolve_is_the_accumulator_average() {
    let mut film = Film::new();
    film.fit_to(1.0, (32, 32));

    let mut local = LocalFilm::new();
    local.resize(film.res());
    local.set_generation(film.generation());
    local.render_pass(2, |u, v, _| Vec3::new(u, v, 0.25));
    film.merge(&mut local);

    film.resolve();
    let inv = 1.0 / film.accum_count();
    for (pixel, sum) in film.frame().iter().zip(film.accum()) {
        assert_eq!(*pixel, *sum * inv);
    }
}

#[test]
fn merge_adds_matching_passes() {
    let mut film = Film::new();
    film.fit_to(1.0, (32, 32));

    let mut local = LocalFilm::new();
    local.resize(film.res());
    local.set_generation(film.generation());

    local.render_pass(4, |_, _, _| Vec3::ones());
    film.merge(&mut local);
    assert_abs_diff_eq!(film.accum_count(), 1.0 / 16.0, epsilon = 1e-7);

    // The merge clears the pass buffer
    assert_eq!(local.count(), 0.0);

    local.render_pass(4, |_, _, _| Vec3::ones());
    film.merge(&mut local);
    assert_abs_diff_eq!(film.accum_count(), 2.0 / 16.0, epsilon = 1e-7);
}

#[test]
fn merge_drops_stale_generations() {
    let mut film = Film::new();
    film.fit_to(1.0, (32, 32));

    let mut local = LocalFilm::new();
    local.resize(film.res());
    local.set_generation(film.generation());
    local.render_pass(4, |_, _, _| Vec3::ones());

    // Invalidation between the pass and the merge attempt
    film.invalidate();
    let stale_generation = local.generation();
    film.merge(&mut local);

    assert_ne!(stale_generation, film.generation());
    assert_eq!(film.accum_count(), 0.0);
    // The stale pass is gone either way
    assert_eq!(local.count(), 0.0);

    // The next pass in the new generation merges again
    local.set_generation(film.generation());
    local.render_pass(4, |_, _, _| Vec3::ones());
    film.merge(&mut local);
    assert_abs_diff_eq!(film.accum_count(), 1.0 / 16.0, epsilon = 1e-7);
}

#[test]
fn merge_drops_stale_sizes() {
    let mut film = Film::new();
    film.fit_to(1.0, (32, 32));

    let mut local = LocalFilm::new();
    local.resize((16, 16));
    local.set_generation(film.generation());
    local.render_pass(4, |_, _, _| Vec3::ones());

    film.merge(&mut local);
    assert_eq!(film.accum_count(), 0.0);
}

#[test]
fn render_pass_covers_every_pixel_once() {
    let mut local = LocalFilm::new();
    local.resize((32, 32));

    local.render_pass(4, |_, _, _| Vec3::ones());
    assert_abs_diff_eq!(local.count(), 1.0 / 16.0, epsilon = 1e-7);

    // Splat weights sum to one full-resolution sample
    let mut film = Film::new();
    film.fit_to(1.0, (32, 32));
    local.set_generation(film.generation());
    film.merge(&mut local);
    for sum in film.accum() {
        assert_abs_diff_eq!(*sum, Vec3::from(1.0 / 16.0), epsilon = 1e-7);
    }
}

#[test]
fn render_pass_against_empty_buffer_is_a_noop() {
    let mut local = LocalFilm::new();
    local.render_pass(4, |_, _, _| Vec3::ones());
    assert_eq!(local.count(), 0.0);
}

#[test]
fn invalidate_restarts_accumulation() {
    let mut film = Film::new();
    film.fit_to(1.0, (64, 48));
    film.seed_preview(|_, _, _| Vec3::ones());
    assert!(!film.is_empty());

    let generation = film.generation();
    film.invalidate();
    assert!(film.is_empty());
    assert_eq!(film.generation(), generation + 1);
}
