//! Gesture labels and single-frame geometry classification

use serde::Serialize;

use super::hand::{HandFrame, FINGERS};
use crate::config::GestureConfig;

/// Recognised hand gestures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Gesture {
    #[default]
    None,
    OpenHand,
    Pinch,
    Fist,
    Point,
    SwipeLeft,
    SwipeRight,
}

impl Gesture {
    pub const ALL: [Gesture; 7] = [
        Gesture::None,
        Gesture::OpenHand,
        Gesture::Pinch,
        Gesture::Fist,
        Gesture::Point,
        Gesture::SwipeLeft,
        Gesture::SwipeRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "None",
            Gesture::OpenHand => "OpenHand",
            Gesture::Pinch => "Pinch",
            Gesture::Fist => "Fist",
            Gesture::Point => "Point",
            Gesture::SwipeLeft => "SwipeLeft",
            Gesture::SwipeRight => "SwipeRight",
        }
    }

    pub fn is_swipe(&self) -> bool {
        matches!(self, Gesture::SwipeLeft | Gesture::SwipeRight)
    }
}

/// Extension / curl of one finger, from tip-to-MCP distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerState {
    pub extended: bool,
    pub curled: bool,
}

impl FingerState {
    fn measure(frame: &HandFrame, tip: usize, base: usize, cfg: &GestureConfig) -> Self {
        let reach = frame.landmark(tip).distance(frame.landmark(base));
        Self {
            extended: reach > cfg.extend_threshold,
            curled: reach < cfg.curl_threshold,
        }
    }
}

/// Index, middle, ring, pinky
pub fn finger_states(frame: &HandFrame, cfg: &GestureConfig) -> [FingerState; 4] {
    FINGERS.map(|(tip, base)| FingerState::measure(frame, tip, base, cfg))
}

/// Classify one frame, no temporal context. Pinch wins over everything.
pub fn classify_raw(frame: Option<&HandFrame>, cfg: &GestureConfig) -> Gesture {
    let Some(frame) = frame else {
        return Gesture::None;
    };

    if frame.pinch_distance() < cfg.pinch_distance {
        return Gesture::Pinch;
    }

    let [index, middle, ring, pinky] = finger_states(frame, cfg);

    if index.curled && middle.curled && ring.curled && pinky.curled {
        Gesture::Fist
    } else if index.extended && !middle.extended && !ring.extended && !pinky.extended {
        Gesture::Point
    } else if index.extended && middle.extended && ring.extended && pinky.extended {
        Gesture::OpenHand
    } else {
        Gesture::None
    }
}


#[cfg(test)]
mod tests {
    use super::poses::*;
    use super::*;
    use crate::classifier::hand::{INDEX_TIP, THUMB_TIP};

    fn cfg() -> GestureConfig {
        GestureConfig::default()
    }

    #[test]
    fn absent_hand_is_none() {
        assert_eq!(classify_raw(None, &cfg()), Gesture::None);
    }

    #[test]
    fn classifies_each_pose() {
        assert_eq!(classify_raw(Some(&open_hand()), &cfg()), Gesture::OpenHand);
        assert_eq!(classify_raw(Some(&fist()), &cfg()), Gesture::Fist);
        assert_eq!(classify_raw(Some(&point()), &cfg()), Gesture::Point);
        assert_eq!(classify_raw(Some(&pinch()), &cfg()), Gesture::Pinch);
        assert_eq!(classify_raw(Some(&ambiguous()), &cfg()), Gesture::None);
    }

    #[test]
    fn pinch_takes_priority_over_fist() {
        let mut frame = fist();
        frame.landmarks[THUMB_TIP] = frame.landmarks[INDEX_TIP];
        assert_eq!(classify_raw(Some(&frame), &cfg()), Gesture::Pinch);
    }

    #[test]
    fn result_is_always_a_known_variant() {
        for frame in [open_hand(), fist(), point(), pinch(), ambiguous()] {
            let g = classify_raw(Some(&frame), &cfg());
            assert!(Gesture::ALL.contains(&g));
        }
    }
}
