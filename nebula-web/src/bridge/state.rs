//! Shared simulation state behind the JS bridge
//!
//! WASM is single-threaded: one `Simulation` in thread-local storage,
//! borrowed for the duration of each entry point.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::interaction::Simulation;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SIMULATION: RefCell<Simulation> = RefCell::new(Simulation::default());
}

pub(crate) fn with_sim<R>(f: impl FnOnce(&Simulation) -> R) -> R {
    SIMULATION.with(|cell| f(&cell.borrow()))
}

pub(crate) fn with_sim_mut<R>(f: impl FnOnce(&mut Simulation) -> R) -> R {
    SIMULATION.with(|cell| f(&mut cell.borrow_mut()))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `performance.now()`, or wall clock inside a worker without `window`
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
