//! Rolling buffer of raw per-frame classifications
//!
//! Holds the last `window` raw gestures in a fixed ring. A gesture is only
//! confirmed once every slot agrees.

use super::gesture::Gesture;

/// Ring of the most recent raw classifications
#[derive(Clone, Debug)]
pub struct DebounceBuffer {
    /// Ring storage, `window` slots
    data: Vec<Gesture>,
    /// Next slot to write
    write_index: usize,
    /// Slots written so far, saturating at `window`
    len: usize,
}

impl DebounceBuffer {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            data: vec![Gesture::None; window],
            write_index: 0,
            len: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.data.len()
    }

    /// Push a new raw classification, overwriting the oldest when full
    pub fn push(&mut self, gesture: Gesture) {
        let window = self.data.len();
        self.data[self.write_index] = gesture;
        self.write_index = (self.write_index + 1) % window;
        self.len = (self.len + 1).min(window);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Full window and every sample equal to `gesture`
    pub fn is_unanimous(&self, gesture: Gesture) -> bool {
        self.len == self.data.len() && self.data.iter().all(|g| *g == gesture)
    }

    /// Share of buffered samples equal to `gesture`; 0 when empty
    pub fn agreement(&self, gesture: Gesture) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        let matches = self.filled().filter(|g| **g == gesture).count();
        matches as f32 / self.len as f32
    }

    fn filled(&self) -> impl Iterator<Item = &Gesture> {
        // Before the first wrap only the first `len` slots are meaningful
        self.data.iter().take(self.len)
    }

    pub fn clear(&mut self) {
        self.data.fill(Gesture::None);
        self.write_index = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimous_only_when_full() {
        let mut buf = DebounceBuffer::new(3);
        buf.push(Gesture::Fist);
        buf.push(Gesture::Fist);
        assert!(!buf.is_unanimous(Gesture::Fist));
        buf.push(Gesture::Fist);
        assert!(buf.is_unanimous(Gesture::Fist));
        buf.push(Gesture::Point);
        assert!(!buf.is_unanimous(Gesture::Fist));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn agreement_counts_partial_buffer() {
        let mut buf = DebounceBuffer::new(4);
        assert_eq!(buf.agreement(Gesture::None), 0.0);
        buf.push(Gesture::Pinch);
        buf.push(Gesture::None);
        assert_eq!(buf.agreement(Gesture::Pinch), 0.5);
    }

    #[test]
    fn clear_empties() {
        let mut buf = DebounceBuffer::new(2);
        buf.push(Gesture::OpenHand);
        buf.push(Gesture::OpenHand);
        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.is_unanimous(Gesture::None));
    }

    #[test]
    fn zero_window_is_clamped() {
        let mut buf = DebounceBuffer::new(0);
        buf.push(Gesture::Fist);
        assert!(buf.is_unanimous(Gesture::Fist));
    }
}
