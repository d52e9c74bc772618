//! Hand tracking entry points
//!
//! The detector loop lives in JS. It asks `should_detect` before running a
//! detection, then hands the result to `submit_landmarks` (or
//! `clear_landmarks` when no hand was found).

use wasm_bindgen::prelude::*;

use super::state::{now_ms, with_sim_mut};
use crate::classifier::HandFrame;
use crate::constants::HAND_LANDMARK_COUNT;
use crate::error::TrackingError;

/// Flat Float32Array of 63 values (21 landmarks × x, y, z).
/// Any other length counts as no hand.
#[wasm_bindgen]
pub fn submit_landmarks(data: &[f32]) -> Result<(), JsValue> {
    let frame = HandFrame::from_flat(data);
    if frame.is_none() && !data.is_empty() {
        log::warn!(
            "invalid hand landmark length: {} (expected {})",
            data.len(),
            HAND_LANDMARK_COUNT * 3
        );
    }
    with_sim_mut(|sim| sim.submit_landmarks(frame))?;
    Ok(())
}

/// Detector ran and found no hand
#[wasm_bindgen]
pub fn clear_landmarks() -> Result<(), JsValue> {
    with_sim_mut(|sim| sim.submit_landmarks(None))?;
    Ok(())
}

/// Frame-rate cap for the detector loop. Without a timestamp
/// `performance.now()` is used.
#[wasm_bindgen]
pub fn should_detect(now: Option<f64>) -> bool {
    let now = now.unwrap_or_else(now_ms);
    with_sim_mut(|sim| sim.should_detect(now))
}

/// Camera permission requested / detector loading
#[wasm_bindgen]
pub fn tracking_starting() {
    with_sim_mut(|sim| sim.tracking_starting());
}

#[wasm_bindgen]
pub fn tracking_started() {
    with_sim_mut(|sim| sim.tracking_started());
}

/// Acquisition failed; the scene keeps running without gestures
#[wasm_bindgen]
pub fn tracking_failed(message: &str, permission_denied: bool) {
    let err = if permission_denied {
        TrackingError::PermissionDenied
    } else {
        TrackingError::DetectorInit(message.to_string())
    };
    with_sim_mut(|sim| sim.tracking_failed(err));
}

/// Camera released; gesture and landmark state back to neutral
#[wasm_bindgen]
pub fn tracking_stopped() {
    with_sim_mut(|sim| sim.stop_tracking());
}

/// "idle" | "starting" | "running" | "failed"
#[wasm_bindgen]
pub fn tracking_state() -> String {
    super::state::with_sim(|sim| sim.tracking().state().as_str().to_string())
}
