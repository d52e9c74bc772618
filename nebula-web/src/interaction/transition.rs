//! Pending topology transition
//!
//! Holds the layout particles are heading to and the frame-clock deadline
//! at which the rendered positions become the new rest layout. Starting a
//! new transition simply replaces the old one.

use crate::graph::TopologyMode;

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub mode: TopologyMode,
    /// Packed xyz targets
    layout: Vec<f32>,
    /// Frame clock (ms) at which to commit
    deadline_ms: f64,
}

impl Transition {
    pub fn new(mode: TopologyMode, layout: Vec<f32>, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            mode,
            layout,
            deadline_ms: now_ms + duration_ms.max(0.0),
        }
    }

    pub fn layout(&self) -> &[f32] {
        &self.layout
    }

    pub fn deadline_ms(&self) -> f64 {
        self.deadline_ms
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.deadline_ms
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.deadline_ms - now_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_at_deadline() {
        let t = Transition::new(TopologyMode::Centralized, vec![0.0; 3], 100.0, 1500.0);
        assert!(!t.is_due(1599.0));
        assert!(t.is_due(1600.0));
        assert_eq!(t.remaining_ms(1000.0), 600.0);
        assert_eq!(t.remaining_ms(5000.0), 0.0);
    }

    #[test]
    fn negative_duration_is_immediate() {
        let t = Transition::new(TopologyMode::Distributed, Vec::new(), 10.0, -5.0);
        assert!(t.is_due(10.0));
    }
}
