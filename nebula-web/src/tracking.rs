//! Hand tracking session
//!
//! The detector runs in JS on its own cadence. This side keeps the session
//! state, caps the detection rate and holds the latest landmark snapshot
//! for the next render frame to read.

use serde::Serialize;

use crate::classifier::HandFrame;
use crate::config::TrackingConfig;
use crate::error::TrackingError;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrackingState {
    #[default]
    Idle,
    /// Camera / detector being acquired
    Starting,
    Running,
    Failed(TrackingError),
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingState::Idle => "idle",
            TrackingState::Starting => "starting",
            TrackingState::Running => "running",
            TrackingState::Failed(_) => "failed",
        }
    }
}

impl Serialize for TrackingState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct TrackingSession {
    state: TrackingState,
    interval_ms: f64,
    last_detection_ms: Option<f64>,
    /// Latest snapshot; `None` = no hand in the last frame
    latest: Option<HandFrame>,
    /// Bumped on every submit so readers can tell a fresh snapshot
    sequence: u64,
}

impl TrackingSession {
    pub fn new(cfg: &TrackingConfig) -> Self {
        Self {
            state: TrackingState::Idle,
            interval_ms: cfg.frame_interval_ms(),
            last_detection_ms: None,
            latest: None,
            sequence: 0,
        }
    }

    /// New rate cap; state, error and snapshot are kept
    pub fn reconfigure(&mut self, cfg: &TrackingConfig) {
        self.interval_ms = cfg.frame_interval_ms();
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TrackingState::Running
    }

    pub fn begin(&mut self) {
        log::info!("hand tracking starting");
        self.state = TrackingState::Starting;
    }

    pub fn started(&mut self) {
        log::info!("hand tracking running");
        self.state = TrackingState::Running;
    }

    /// Acquisition failed. The snapshot is cleared; the error stays readable.
    pub fn fail(&mut self, err: TrackingError) {
        log::warn!("hand tracking failed: {err}");
        self.clear_snapshot();
        self.state = TrackingState::Failed(err);
    }

    /// Back to idle from any state, snapshot cleared
    pub fn stop(&mut self) {
        log::info!("hand tracking stopped");
        self.clear_snapshot();
        self.last_detection_ms = None;
        self.state = TrackingState::Idle;
    }

    fn clear_snapshot(&mut self) {
        self.latest = None;
        self.sequence += 1;
    }

    /// Rate cap: true (and the slot is claimed) if a full frame interval has
    /// passed since the last accepted detection
    pub fn should_detect(&mut self, now_ms: f64) -> bool {
        if !matches!(self.state, TrackingState::Running | TrackingState::Starting) {
            return false;
        }
        match self.last_detection_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_detection_ms = Some(now_ms);
                true
            }
        }
    }

    /// Store the detector's latest result
    pub fn submit(&mut self, frame: Option<HandFrame>) -> Result<(), TrackingError> {
        match self.state {
            TrackingState::Starting | TrackingState::Running => {
                self.latest = frame;
                self.sequence += 1;
                Ok(())
            }
            _ => Err(TrackingError::NotRunning),
        }
    }

    pub fn latest(&self) -> Option<&HandFrame> {
        self.latest.as_ref()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new(&TrackingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::poses::open_hand;

    fn running() -> TrackingSession {
        let mut s = TrackingSession::default();
        s.begin();
        s.started();
        s
    }

    #[test]
    fn detection_is_rate_capped() {
        let mut s = running();
        assert!(s.should_detect(0.0));
        assert!(!s.should_detect(20.0));
        assert!(s.should_detect(34.0));
        assert!(!s.should_detect(50.0));
    }

    #[test]
    fn idle_session_never_detects_or_accepts() {
        let mut s = TrackingSession::default();
        assert!(!s.should_detect(0.0));
        assert_eq!(s.submit(Some(open_hand())), Err(TrackingError::NotRunning));
    }

    #[test]
    fn submit_bumps_sequence() {
        let mut s = running();
        let before = s.sequence();
        s.submit(Some(open_hand())).unwrap();
        assert!(s.latest().is_some());
        assert_eq!(s.sequence(), before + 1);
        s.submit(None).unwrap();
        assert!(s.latest().is_none());
    }

    #[test]
    fn stop_clears_everything() {
        let mut s = running();
        s.submit(Some(open_hand())).unwrap();
        s.should_detect(0.0);
        s.stop();
        assert_eq!(s.state(), &TrackingState::Idle);
        assert!(s.latest().is_none());
        // Restart detects immediately
        s.begin();
        assert!(s.should_detect(1.0));
    }

    #[test]
    fn failure_keeps_error() {
        let mut s = TrackingSession::default();
        s.begin();
        s.fail(TrackingError::PermissionDenied);
        assert_eq!(s.state(), &TrackingState::Failed(TrackingError::PermissionDenied));
        assert_eq!(s.state().as_str(), "failed");
    }

    #[test]
    fn reconfigure_changes_rate_only() {
        let mut s = running();
        assert!(s.should_detect(0.0));
        s.reconfigure(&TrackingConfig { target_fps: 10.0 });
        assert_eq!(s.state(), &TrackingState::Running);
        assert!(!s.should_detect(50.0));
        assert!(s.should_detect(100.0));

        let mut failed = TrackingSession::default();
        failed.begin();
        failed.fail(TrackingError::DetectorInit("no wasm".into()));
        failed.reconfigure(&TrackingConfig::default());
        assert!(matches!(failed.state(), TrackingState::Failed(TrackingError::DetectorInit(_))));
    }
}
