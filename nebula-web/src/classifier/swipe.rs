//! Swipe detection from palm motion
//!
//! Tracks recent palm centres with timestamps. A fast, mostly-horizontal
//! move over the last few samples is a swipe; a cooldown stops repeats.

use std::collections::VecDeque;

use super::gesture::Gesture;
use crate::config::GestureConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PalmSample {
    x: f32,
    y: f32,
    /// Milliseconds
    t: f64,
}

/// Palm history + cooldown
#[derive(Clone, Debug)]
pub struct SwipeDetector {
    /// Ring buffer of recent palm positions
    history: VecDeque<PalmSample>,
    capacity: usize,
    window: usize,
    min_velocity: f32,
    dominance: f32,
    cooldown_ms: f64,
    last_swipe: Option<f64>,
}

impl SwipeDetector {
    pub fn new(cfg: &GestureConfig) -> Self {
        let window = cfg.swipe_window.max(2);
        let capacity = cfg.swipe_history.max(window);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
            window,
            min_velocity: cfg.swipe_velocity,
            dominance: cfg.swipe_dominance,
            cooldown_ms: cfg.swipe_cooldown_ms,
            last_swipe: None,
        }
    }

    /// Record a palm position
    pub fn record(&mut self, palm: (f32, f32), t_ms: f64) {
        self.history.push_back(PalmSample {
            x: palm.0,
            y: palm.1,
            t: t_ms,
        });

        // Keep only enough history
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    pub fn samples(&self) -> usize {
        self.history.len()
    }

    /// Velocity (units/s) across the last `window` samples
    pub fn velocity(&self) -> Option<(f32, f32)> {
        if self.history.len() < self.window {
            return None;
        }
        let start = self.history[self.history.len() - self.window];
        let end = *self.history.back()?;
        let dt = ((end.t - start.t) / 1000.0) as f32;
        if dt <= 0.0 {
            return None;
        }
        Some(((end.x - start.x) / dt, (end.y - start.y) / dt))
    }

    /// Check for a swipe at `now_ms`. Firing clears history and starts the cooldown.
    ///
    /// The camera image is mirrored: palm moving toward smaller x is a
    /// visual swipe right.
    pub fn detect(&mut self, now_ms: f64) -> Option<Gesture> {
        if let Some(last) = self.last_swipe {
            if now_ms - last < self.cooldown_ms {
                return None;
            }
        }

        let (vx, vy) = self.velocity()?;
        if vx.abs() < self.min_velocity || vy.abs() >= vx.abs() * self.dominance {
            return None;
        }

        self.last_swipe = Some(now_ms);
        self.history.clear();

        if vx < 0.0 {
            Some(Gesture::SwipeRight)
        } else {
            Some(Gesture::SwipeLeft)
        }
    }

    /// Drop motion history (hand lost), keep the cooldown
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_swipe = None;
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five samples 33ms apart moving `dx` per sample
    fn feed(det: &mut SwipeDetector, start_ms: f64, x0: f32, dx: f32, dy: f32) -> f64 {
        let mut t = start_ms;
        for i in 0..5 {
            det.record((x0 + dx * i as f32, 0.5 + dy * i as f32), t);
            t += 33.0;
        }
        t - 33.0
    }

    #[test]
    fn needs_full_window() {
        let mut det = SwipeDetector::default();
        det.record((0.2, 0.5), 0.0);
        det.record((0.8, 0.5), 33.0);
        assert!(det.velocity().is_none());
        assert_eq!(det.detect(33.0), None);
    }

    #[test]
    fn fast_horizontal_motion_is_a_swipe_with_mirrored_direction() {
        let mut det = SwipeDetector::default();
        let now = feed(&mut det, 0.0, 0.8, -0.05, 0.0);
        assert_eq!(det.detect(now), Some(Gesture::SwipeRight));

        let mut det = SwipeDetector::default();
        let now = feed(&mut det, 0.0, 0.2, 0.05, 0.0);
        assert_eq!(det.detect(now), Some(Gesture::SwipeLeft));
    }

    #[test]
    fn slow_or_diagonal_motion_is_ignored() {
        let mut det = SwipeDetector::default();
        let now = feed(&mut det, 0.0, 0.5, 0.001, 0.0);
        assert_eq!(det.detect(now), None);

        let mut det = SwipeDetector::default();
        let now = feed(&mut det, 0.0, 0.2, 0.05, 0.05);
        assert_eq!(det.detect(now), None);
    }

    #[test]
    fn cooldown_blocks_repeat_swipes() {
        let mut det = SwipeDetector::default();
        let mut now = feed(&mut det, 0.0, 0.8, -0.05, 0.0);
        assert!(det.detect(now).is_some());

        // Keep swiping for a second: nothing fires
        for _ in 0..6 {
            now = feed(&mut det, now + 33.0, 0.8, -0.05, 0.0);
            assert_eq!(det.detect(now), None);
        }
        assert!(now < 1500.0);

        let now = feed(&mut det, 1600.0, 0.8, -0.05, 0.0);
        assert_eq!(det.detect(now), Some(Gesture::SwipeRight));
    }

    #[test]
    fn zero_elapsed_time_is_not_a_swipe() {
        let mut det = SwipeDetector::default();
        for i in 0..5 {
            det.record((0.1 * i as f32, 0.5), 100.0);
        }
        assert_eq!(det.detect(100.0), None);
    }
}
