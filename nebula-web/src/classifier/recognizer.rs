//! Stateful gesture recognizer
//!
//! Raw per-frame classifications go through the debounce ring; a gesture is
//! adopted only when the whole window agrees. Swipes are detected from palm
//! motion alongside and override the debounced gesture for one frame.

use serde::Serialize;

use super::buffer::DebounceBuffer;
use super::gesture::{classify_raw, Gesture};
use super::hand::HandFrame;
use super::swipe::SwipeDetector;
use crate::config::GestureConfig;

/// Confirmed gesture for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GestureReading {
    pub gesture: Gesture,
    /// 0-1
    pub confidence: f32,
}

impl GestureReading {
    pub const NONE: GestureReading = GestureReading {
        gesture: Gesture::None,
        confidence: 0.0,
    };
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    buffer: DebounceBuffer,
    swipe: SwipeDetector,
    /// Last confirmed (debounced) gesture
    current: Gesture,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            buffer: DebounceBuffer::new(config.debounce_frames),
            swipe: SwipeDetector::new(&config),
            current: Gesture::None,
            config,
        }
    }

    pub fn current(&self) -> Gesture {
        self.current
    }

    /// Classify one landmark frame taken at `now_ms`
    pub fn classify(&mut self, frame: Option<&HandFrame>, now_ms: f64) -> GestureReading {
        let Some(hand) = frame else {
            // Stale palm samples would read as a jump when the hand returns
            self.swipe.clear_history();
            self.push(Gesture::None);
            return GestureReading::NONE;
        };

        let raw = classify_raw(Some(hand), &self.config);
        let palm = hand.palm_center();
        self.swipe.record((palm[0], palm[1]), now_ms);

        if raw == Gesture::OpenHand {
            if let Some(swipe) = self.swipe.detect(now_ms) {
                log::debug!("swipe detected: {}", swipe.as_str());
                return GestureReading {
                    gesture: swipe,
                    confidence: self.config.swipe_confidence,
                };
            }
        }

        self.push(raw);
        GestureReading {
            gesture: self.current,
            confidence: self.buffer.agreement(self.current),
        }
    }

    fn push(&mut self, raw: Gesture) {
        self.buffer.push(raw);
        if raw != self.current && self.buffer.is_unanimous(raw) {
            self.current = raw;
        }
    }

    /// Back to neutral: both buffers and the swipe cooldown
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.swipe.reset();
        self.current = Gesture::None;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
