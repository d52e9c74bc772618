//! Gesture -> behaviour table
//!
//! Each gesture maps to one `Behavior`; each behaviour is a transform over
//! the particle buffers. Swipes rest here; their topology cycle is handled
//! by the orchestrator.

use nalgebra::Vector3;
use serde::Serialize;

use crate::classifier::Gesture;
use crate::config::PhysicsConfig;
use crate::physics::{apply_collapse, apply_repel, apply_spring_back, find_nearest, Centroids};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Behavior {
    /// Open hand pushes particles away
    Repel,
    /// Fist pulls categories to their centroids
    Collapse,
    /// Pinch picks the nearest particle
    Select,
    /// Point lights up the nearest particle's category
    Highlight,
    /// Targets back to the rest layout
    Rest,
}

pub fn behavior_for(gesture: Gesture) -> Behavior {
    match gesture {
        Gesture::OpenHand => Behavior::Repel,
        Gesture::Fist => Behavior::Collapse,
        Gesture::Pinch => Behavior::Select,
        Gesture::Point => Behavior::Highlight,
        Gesture::None | Gesture::SwipeLeft | Gesture::SwipeRight => Behavior::Rest,
    }
}

/// Everything a behaviour reads besides the buffers it writes
pub struct Scene<'a> {
    /// World-space hand position
    pub hand: Vector3<f32>,
    /// Rest layout: base positions, or the pending topology layout
    pub rest: &'a [f32],
    /// Cached centroids + category per particle, when categories are known
    pub collapse: Option<(&'a Centroids, &'a [u32])>,
    pub physics: &'a PhysicsConfig,
}

/// Rewrite `target` for one frame. Returns the particle picked by
/// Select / Highlight, if any.
pub fn apply_behavior(
    behavior: Behavior,
    current: &[f32],
    target: &mut [f32],
    scene: &Scene,
) -> Option<usize> {
    let physics = scene.physics;
    match behavior {
        Behavior::Repel => {
            apply_repel(
                current,
                target,
                scene.rest,
                &scene.hand,
                physics.repel_radius,
                physics.repel_strength,
            );
            None
        }
        Behavior::Collapse => {
            apply_collapse(target, scene.collapse);
            None
        }
        Behavior::Select => {
            apply_spring_back(target, scene.rest);
            find_nearest(current, &scene.hand, physics.select_distance)
        }
        Behavior::Highlight => {
            apply_spring_back(target, scene.rest);
            find_nearest(current, &scene.hand, physics.select_distance * 2.0)
        }
        Behavior::Rest => {
            apply_spring_back(target, scene.rest);
            None
        }
    }
}
