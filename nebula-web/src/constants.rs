//! Tunable constants - one section per pipeline stage
//!
//! Everything here feeds the `Default` impls in `config.rs`; a JSON config
//! from JS can override any of them at runtime.

// ============================================================================
// ONE EURO FILTER
// ============================================================================

/// Nominal sampling rate (Hz) before real timestamps arrive
pub const ONE_EURO_FREQUENCY: f32 = 30.0;
/// Minimum cutoff (Hz) - lower = smoother at rest
pub const ONE_EURO_MIN_CUTOFF: f32 = 1.0;
/// Speed coefficient - higher = less lag during fast motion
pub const ONE_EURO_BETA: f32 = 0.007;
/// Derivative cutoff (Hz)
pub const ONE_EURO_D_CUTOFF: f32 = 1.0;

// ============================================================================
// GESTURE CLASSIFICATION
// ============================================================================

/// Thumb tip to index tip distance below which the hand is pinching
pub const PINCH_DISTANCE: f32 = 0.05;
/// Tip-to-MCP distance below which a finger counts as curled
pub const FIST_CURL_THRESHOLD: f32 = 0.08;
/// Tip-to-MCP distance above which a finger counts as extended
pub const POINT_EXTEND_THRESHOLD: f32 = 0.15;
/// Raw classifications that must agree before a gesture is confirmed
pub const GESTURE_DEBOUNCE_FRAMES: usize = 3;

/// Horizontal palm speed (normalized units / s) that counts as a swipe
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 0.8;
/// |vy| must stay below this fraction of |vx|
pub const SWIPE_DOMINANCE_RATIO: f32 = 0.7;
/// Palm samples kept for swipe detection (~300ms at 30fps)
pub const SWIPE_HISTORY: usize = 10;
/// Samples spanned by the swipe velocity estimate
pub const SWIPE_WINDOW: usize = 5;
/// Minimum time between two swipes (ms)
pub const SWIPE_COOLDOWN_MS: f64 = 1500.0;
/// Confidence reported alongside a swipe
pub const SWIPE_CONFIDENCE: f32 = 0.9;

// ============================================================================
// PARTICLE PHYSICS
// ============================================================================

/// World-space radius of the open-hand repel field
pub const REPEL_RADIUS: f32 = 2.0;
/// Displacement applied at the centre of the repel field
pub const REPEL_STRENGTH: f32 = 0.15;
/// Exponential damping rate (1/s)
pub const DAMP_LAMBDA: f32 = 4.0;
/// Pinch selection distance (Point uses twice this)
pub const SELECT_DISTANCE: f32 = 0.5;

/// Colour multiplier for particles in the highlighted category
pub const HIGHLIGHT_GAIN: f32 = 1.2;
/// Colour multiplier for everything else while highlighting
pub const DIM_GAIN: f32 = 0.3;
/// Per-frame easing toward highlight colours
pub const HIGHLIGHT_EASE: f32 = 0.1;
/// Per-frame easing back to resting colours
pub const RESTORE_EASE: f32 = 0.05;
/// Per-frame easing of the visibility multiplier
pub const FILTER_FADE_EASE: f32 = 0.1;

// ============================================================================
// PARTICLE DEFAULTS
// ============================================================================

/// Half-extent of the scene cube data is normalized into
pub const SCENE_SCALE: f32 = 4.0;
/// Emissive violet (#b388ff) before any colour mapping
pub const DEFAULT_COLOR: [f32; 3] = [0.702, 0.533, 1.0];
pub const EMISSIVE_MULTIPLIER: f32 = 2.5;
pub const DEFAULT_SIZE: f32 = 0.04;
pub const DEFAULT_SCALE: f32 = 1.0;

// ============================================================================
// TOPOLOGY LAYOUTS
// ============================================================================

/// Centralized: spoke sphere radius as a fraction of SCENE_SCALE
pub const HUB_RADIUS_FACTOR: f32 = 0.9;
/// Decentralized: cluster-centre sphere radius as a fraction of SCENE_SCALE
pub const CLUSTER_RADIUS_FACTOR: f32 = 0.7;
/// Decentralized: intra-cluster spread as a fraction of SCENE_SCALE
pub const CLUSTER_SPREAD_FACTOR: f32 = 0.35;
/// Neighbours linked inside a cluster
pub const INTRA_CLUSTER_NEIGHBORS: usize = 3;
/// Members per cluster considered when picking a bridge pair
pub const BRIDGE_SAMPLE_SIZE: usize = 10;

pub const STAR_EDGE_WEIGHT: f32 = 0.8;
pub const INTRA_EDGE_WEIGHT: f32 = 0.7;
pub const BRIDGE_EDGE_WEIGHT: f32 = 0.3;

/// Distributed: neighbours per node
pub const DISTRIBUTED_K: usize = 4;
/// Distributed: edge labels produced at most
pub const MAX_EDGE_LABELS: usize = 40;
/// Characters kept from each side of an edge label
pub const EDGE_LABEL_CHARS: usize = 12;

/// Time between a topology switch and committing the new rest layout (ms)
pub const TOPOLOGY_TRANSITION_MS: f64 = 1500.0;

// ============================================================================
// CAMERA + TRACKING
// ============================================================================

pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 8.0];
/// Vertical field of view (degrees)
pub const CAMERA_FOV: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Detection rate cap for the landmark provider
pub const HAND_TRACKING_FPS: f32 = 30.0;

/// Landmarks per hand frame (MediaPipe Hands)
pub const HAND_LANDMARK_COUNT: usize = 21;

// ============================================================================
// TOPOLOGY COLOURS
// ============================================================================

/// Centralized hub (#ffd700)
pub const HUB_COLOR: [f32; 3] = [1.0, 0.843, 0.0];
/// Centralized spokes (#4f8ff7)
pub const SPOKE_COLOR: [f32; 3] = [0.31, 0.561, 0.969];
