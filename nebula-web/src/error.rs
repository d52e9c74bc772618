//! Error types surfaced to JS
//!
//! Numeric degeneracy never lands here (it is resolved in place with
//! fallbacks). These cover caller input we refuse and tracking failures.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while acquiring the camera / landmark detector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("hand detector failed to initialize: {0}")]
    DetectorInit(String),
    #[error("hand tracking is not running")]
    NotRunning,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NebulaError {
    #[error("{buffer} buffer has {actual} values, expected {expected}")]
    BufferLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("embedding has {rows} rows, expected {expected} with 3 columns each")]
    EmbeddingShape { rows: usize, expected: usize },
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid {payload} JSON: {reason}")]
    Payload {
        payload: &'static str,
        reason: String,
    },
    #[error("hand tracking: {0}")]
    Tracking(#[from] TrackingError),
}

pub type Result<T> = std::result::Result<T, NebulaError>;

impl From<NebulaError> for JsValue {
    fn from(err: NebulaError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_errors_nest() {
        let err: NebulaError = TrackingError::PermissionDenied.into();
        assert_eq!(err.to_string(), "hand tracking: camera permission denied");
    }

    #[test]
    fn buffer_length_message_names_buffer() {
        let err = NebulaError::BufferLength {
            buffer: "colors",
            expected: 9,
            actual: 6,
        };
        assert_eq!(err.to_string(), "colors buffer has 6 values, expected 9");
    }
}
