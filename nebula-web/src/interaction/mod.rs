//! Interaction module - per-frame orchestration of gestures, physics and layouts
//!
//! Re-exports only.

mod feedback;
mod orchestrator;
mod strategy;
mod transition;

pub use feedback::{fade_scales, highlight_category, restore_colors, topology_colors};
pub use orchestrator::{FrameOutput, Simulation};
pub use strategy::{apply_behavior, behavior_for, Behavior, Scene};
pub use transition::Transition;
