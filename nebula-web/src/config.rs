//! Runtime configuration
//!
//! Every section defaults to `constants.rs`. Partial JSON from JS overrides
//! only the fields it names:
//!
//! ```text
//! { "physics": { "repel_radius": 3.0 }, "gesture": { "debounce_frames": 4 } }
//! ```

use serde::Deserialize;

use crate::constants::*;
use crate::error::{NebulaError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub frequency: f32,
    pub min_cutoff: f32,
    pub beta: f32,
    pub d_cutoff: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            frequency: ONE_EURO_FREQUENCY,
            min_cutoff: ONE_EURO_MIN_CUTOFF,
            beta: ONE_EURO_BETA,
            d_cutoff: ONE_EURO_D_CUTOFF,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pinch_distance: f32,
    pub curl_threshold: f32,
    pub extend_threshold: f32,
    pub debounce_frames: usize,
    pub swipe_velocity: f32,
    pub swipe_dominance: f32,
    pub swipe_history: usize,
    pub swipe_window: usize,
    pub swipe_cooldown_ms: f64,
    pub swipe_confidence: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_distance: PINCH_DISTANCE,
            curl_threshold: FIST_CURL_THRESHOLD,
            extend_threshold: POINT_EXTEND_THRESHOLD,
            debounce_frames: GESTURE_DEBOUNCE_FRAMES,
            swipe_velocity: SWIPE_VELOCITY_THRESHOLD,
            swipe_dominance: SWIPE_DOMINANCE_RATIO,
            swipe_history: SWIPE_HISTORY,
            swipe_window: SWIPE_WINDOW,
            swipe_cooldown_ms: SWIPE_COOLDOWN_MS,
            swipe_confidence: SWIPE_CONFIDENCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub repel_radius: f32,
    pub repel_strength: f32,
    pub damp_lambda: f32,
    pub select_distance: f32,
    /// Point gesture: pointed-at category colour gain
    pub highlight_gain: f32,
    /// Point gesture: every other category
    pub dim_gain: f32,
    pub highlight_ease: f32,
    pub restore_ease: f32,
    /// Category show / hide scale easing
    pub fade_ease: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repel_radius: REPEL_RADIUS,
            repel_strength: REPEL_STRENGTH,
            damp_lambda: DAMP_LAMBDA,
            select_distance: SELECT_DISTANCE,
            highlight_gain: HIGHLIGHT_GAIN,
            dim_gain: DIM_GAIN,
            highlight_ease: HIGHLIGHT_EASE,
            restore_ease: RESTORE_EASE,
            fade_ease: FILTER_FADE_EASE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub scene_scale: f32,
    pub hub_radius_factor: f32,
    pub cluster_radius_factor: f32,
    pub cluster_spread_factor: f32,
    pub intra_cluster_neighbors: usize,
    pub bridge_sample_size: usize,
    pub star_weight: f32,
    pub intra_weight: f32,
    pub bridge_weight: f32,
    pub distributed_k: usize,
    pub max_edge_labels: usize,
    pub edge_label_chars: usize,
    pub transition_ms: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scene_scale: SCENE_SCALE,
            hub_radius_factor: HUB_RADIUS_FACTOR,
            cluster_radius_factor: CLUSTER_RADIUS_FACTOR,
            cluster_spread_factor: CLUSTER_SPREAD_FACTOR,
            intra_cluster_neighbors: INTRA_CLUSTER_NEIGHBORS,
            bridge_sample_size: BRIDGE_SAMPLE_SIZE,
            star_weight: STAR_EDGE_WEIGHT,
            intra_weight: INTRA_EDGE_WEIGHT,
            bridge_weight: BRIDGE_EDGE_WEIGHT,
            distributed_k: DISTRIBUTED_K,
            max_edge_labels: MAX_EDGE_LABELS,
            edge_label_chars: EDGE_LABEL_CHARS,
            transition_ms: TOPOLOGY_TRANSITION_MS,
        }
    }
}

impl LayoutConfig {
    /// Radius of the spoke sphere around the hub
    pub fn hub_radius(&self) -> f32 {
        self.scene_scale * self.hub_radius_factor
    }

    pub fn cluster_radius(&self) -> f32 {
        self.scene_scale * self.cluster_radius_factor
    }

    pub fn cluster_spread(&self) -> f32 {
        self.scene_scale * self.cluster_spread_factor
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub target_fps: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            target_fps: HAND_TRACKING_FPS,
        }
    }
}

impl TrackingConfig {
    /// Minimum spacing between two accepted detections (ms)
    pub fn frame_interval_ms(&self) -> f64 {
        if self.target_fps <= 0.0 {
            0.0
        } else {
            1000.0 / self.target_fps as f64
        }
    }
}

/// Full engine configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub filter: FilterConfig,
    pub gesture: GestureConfig,
    pub physics: PhysicsConfig,
    pub layout: LayoutConfig,
    pub tracking: TrackingConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NebulaError::Config(e.to_string()))
    }
}
