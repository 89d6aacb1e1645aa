pub mod camera;
pub mod cubemap;
pub mod integrator;
mod macros;
pub mod materials;
pub mod math;
pub mod renderer;
pub mod sampling;
pub mod scene;
pub mod shapes;
pub mod window;
