//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_tracking;
mod scene;
mod state;

pub use hand_tracking::{
    clear_landmarks, should_detect, submit_landmarks, tracking_failed, tracking_started,
    tracking_starting, tracking_state, tracking_stopped,
};

pub use scene::{
    configure, cycle_topology, frame, get_cluster_labels, get_colors, get_edge_labels,
    get_edge_weights, get_edges, get_hub_index, get_positions, get_scales, get_selected_index,
    get_sizes, get_topology, initialize_random, load_embedding, load_positions, particle_count,
    set_camera, set_camera_aspect, set_categories, set_category_visible, set_labels, set_topology,
};
