//! Physics module - signal smoothing, particle buffers and force fields
//!
//! Re-exports only. All logic in submodules.

mod forces;
mod one_euro;
mod particles;

pub use forces::{
    apply_collapse, apply_repel, apply_spring_back, compute_centroids, damp_positions,
    find_nearest, repel_force, Centroids,
};
pub use one_euro::{OneEuroFilter, OneEuroFilter3D};
pub use particles::{default_colors, read_point, write_point, ParticleSet};
