//! Scene entry points: data loading, topology, per-frame update, buffers

use wasm_bindgen::prelude::*;

use super::state::{to_json, with_sim, with_sim_mut};
use crate::config::EngineConfig;
use crate::data::string_list_from_json;
use crate::error::NebulaError;
use crate::graph::TopologyMode;
use crate::world::CameraProjection;

// ============================================================================
// CONFIGURATION + CAMERA
// ============================================================================

/// Partial JSON config; unspecified fields keep their defaults
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = EngineConfig::from_json(json)?;
    with_sim_mut(|sim| sim.configure(config));
    Ok(())
}

/// Column-major inverse of projection × view (16 floats)
#[wasm_bindgen]
pub fn set_camera(view_projection_inverse: &[f32]) -> Result<(), JsValue> {
    let camera = CameraProjection::from_inverse_slice(view_projection_inverse).ok_or(
        NebulaError::BufferLength {
            buffer: "camera matrix",
            expected: 16,
            actual: view_projection_inverse.len(),
        },
    )?;
    with_sim_mut(|sim| sim.set_camera(camera));
    Ok(())
}

/// Default scene camera for a viewport aspect ratio
#[wasm_bindgen]
pub fn set_camera_aspect(aspect: f32) {
    if aspect.is_finite() && aspect > 0.0 {
        with_sim_mut(|sim| sim.set_camera(CameraProjection::scene(aspect)));
    }
}

// ============================================================================
// DATA
// ============================================================================

#[wasm_bindgen]
pub fn initialize_random(count: usize, seed: u64) {
    with_sim_mut(|sim| sim.initialize_random(count, seed));
}

/// n×3 embedding, normalized into the scene. Empty colours/sizes = defaults.
#[wasm_bindgen]
pub fn load_embedding(embedding: &[f32], colors: Vec<f32>, sizes: Vec<f32>) -> Result<(), JsValue> {
    with_sim_mut(|sim| sim.load_embedding(embedding, colors, sizes))?;
    Ok(())
}

/// Positions already in scene units
#[wasm_bindgen]
pub fn load_positions(positions: Vec<f32>, colors: Vec<f32>, sizes: Vec<f32>) -> Result<(), JsValue> {
    with_sim_mut(|sim| sim.load_positions(positions, colors, sizes))?;
    Ok(())
}

/// Category index per particle + JSON array of category names
#[wasm_bindgen]
pub fn set_categories(indices: Vec<u32>, names_json: &str) -> Result<(), JsValue> {
    let names = string_list_from_json("category names", names_json)?;
    with_sim_mut(|sim| sim.set_categories(indices, names))?;
    Ok(())
}

/// JSON array with one display label per particle
#[wasm_bindgen]
pub fn set_labels(labels_json: &str) -> Result<(), JsValue> {
    let labels = string_list_from_json("labels", labels_json)?;
    with_sim_mut(|sim| sim.set_labels(labels))?;
    Ok(())
}

#[wasm_bindgen]
pub fn set_category_visible(category: u32, visible: bool) {
    with_sim_mut(|sim| sim.set_category_visible(category, visible));
}

// ============================================================================
// TOPOLOGY
// ============================================================================

/// "centralized" | "decentralized" | "distributed"
#[wasm_bindgen]
pub fn set_topology(name: &str) -> Result<(), JsValue> {
    let mode = TopologyMode::parse(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown topology '{name}'")))?;
    with_sim_mut(|sim| sim.switch_topology(mode));
    Ok(())
}

/// Advance to the next topology, returns its name
#[wasm_bindgen]
pub fn cycle_topology() -> String {
    with_sim_mut(|sim| {
        sim.next_topology();
        sim.topology().as_str().to_string()
    })
}

#[wasm_bindgen]
pub fn get_topology() -> String {
    with_sim(|sim| sim.topology().as_str().to_string())
}

// ============================================================================
// FRAME
// ============================================================================

/// Advance one rendered frame (`dt` seconds). Returns the frame output as JSON.
#[wasm_bindgen]
pub fn frame(dt: f32) -> Result<String, JsValue> {
    let output = with_sim_mut(|sim| sim.frame(dt));
    to_json(&output)
}

// ============================================================================
// BUFFERS (copied out; re-read after every load or topology commit)
// ============================================================================

#[wasm_bindgen]
pub fn get_positions() -> Vec<f32> {
    with_sim(|sim| sim.particles.current_positions.clone())
}

#[wasm_bindgen]
pub fn get_colors() -> Vec<f32> {
    with_sim(|sim| sim.particles.colors.clone())
}

#[wasm_bindgen]
pub fn get_sizes() -> Vec<f32> {
    with_sim(|sim| sim.particles.sizes.clone())
}

#[wasm_bindgen]
pub fn get_scales() -> Vec<f32> {
    with_sim(|sim| sim.particles.scales.clone())
}

#[wasm_bindgen]
pub fn particle_count() -> usize {
    with_sim(|sim| sim.particles.count())
}

/// Flat (source, target) pairs
#[wasm_bindgen]
pub fn get_edges() -> Vec<u32> {
    with_sim(|sim| {
        sim.edges()
            .iter()
            .flat_map(|e| [e.source as u32, e.target as u32])
            .collect()
    })
}

#[wasm_bindgen]
pub fn get_edge_weights() -> Vec<f32> {
    with_sim(|sim| sim.edges().iter().map(|e| e.weight).collect())
}

#[wasm_bindgen]
pub fn get_cluster_labels() -> Result<String, JsValue> {
    with_sim(|sim| to_json(sim.cluster_labels()))
}

#[wasm_bindgen]
pub fn get_edge_labels() -> Result<String, JsValue> {
    with_sim(|sim| to_json(sim.edge_labels()))
}

/// Hub node of the centralized layout, -1 when there is none
#[wasm_bindgen]
pub fn get_hub_index() -> i32 {
    with_sim(|sim| sim.hub().map_or(-1, |h| h as i32))
}

/// Pinch-selected particle, -1 when nothing is selected
#[wasm_bindgen]
pub fn get_selected_index() -> i32 {
    with_sim(|sim| sim.particles.selected_index().map_or(-1, |i| i as i32))
}
