pub mod ray;
pub mod vector;

pub use ray::Ray;
pub use vector::Vec3;
