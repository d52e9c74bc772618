//! Nebula Web - gesture-driven particle cloud and topology explorer
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - The load hook that wires up logging and panics
//!
//! The pure-Rust core (`classifier`, `physics`, `graph`, `interaction`,
//! `data`) has no JS dependency and runs natively in tests. `bridge` holds
//! every `#[wasm_bindgen]` entry point.

mod bridge;

pub mod classifier;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod graph;
pub mod interaction;
pub mod physics;
pub mod tracking;
pub mod world;

use wasm_bindgen::prelude::*;

pub use bridge::*;
pub use config::EngineConfig;
pub use error::{NebulaError, TrackingError};
pub use interaction::{FrameOutput, Simulation};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the existing logger
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("nebula-web loaded");
}
