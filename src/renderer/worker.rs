use std::sync::Arc;

use crate::{
    integrator::PathIntegrator,
    renderer::{film::LocalFilm, RenderContext},
    routa_debug, routa_trace,
    sampling::PathSampler,
};

/// Body of one render worker.
///
/// Repeats full passes at `init_scale`x coarseness until the context signals
/// shutdown, merging every completed pass into the shared film. A pass whose
/// generation went stale while it was being rendered is dropped at the merge
/// attempt.
pub(super) fn launch(ctx: Arc<RenderContext>, thread_id: usize, init_scale: usize) {
    routa_debug!("Render worker {}: Begin", thread_id);

    let mut sampler = PathSampler::from_entropy(thread_id as u64);
    let integrator = PathIntegrator::new(ctx.scene(), ctx.skybox(), ctx.params());
    let mut local = LocalFilm::new();

    loop {
        let (camera, shared_res) = {
            routa_trace!("Render worker {}: Waiting for lock on film", thread_id);
            let mut shared = ctx.shared.lock().unwrap();
            routa_trace!("Render worker {}: Acquired film", thread_id);

            if shared.shutdown {
                routa_debug!("Render worker {}: Killed by shutdown", thread_id);
                break;
            }

            shared.film.merge(&mut local);
            local.set_generation(shared.film.generation());

            routa_trace!("Render worker {}: Releasing film", thread_id);
            (shared.camera, shared.film.res())
        };

        // Reallocation happens with the lock released
        if local.res() != shared_res {
            routa_debug!(
                "Render worker {}: Resize to {}x{}",
                thread_id,
                shared_res.0,
                shared_res.1
            );
            local.resize(shared_res);
        }

        local.render_pass(init_scale, |u, v, aspect_ratio| {
            integrator.sample_pixel(&camera, &mut sampler, u, v, aspect_ratio)
        });
    }

    routa_debug!("Render worker {}: End", thread_id);
}
