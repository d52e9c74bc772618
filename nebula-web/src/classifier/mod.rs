//! Classifier module - hand landmarks to discrete gestures
//!
//! Re-exports only. Geometry rules in `gesture`, temporal state in
//! `buffer`/`swipe`, both combined in `recognizer`.

mod buffer;
mod gesture;
mod hand;
mod recognizer;
mod swipe;

#[cfg(test)]
pub(crate) use gesture::poses;

pub use buffer::DebounceBuffer;
pub use gesture::{classify_raw, finger_states, FingerState, Gesture};
pub use hand::{HandFrame, HandLandmark, FINGERS, INDEX_TIP, THUMB_TIP, WRIST};
pub use recognizer::{GestureClassifier, GestureReading};
pub use swipe::SwipeDetector;
