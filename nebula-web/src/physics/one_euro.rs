//! One Euro Filter - adaptive low-pass filter for jitter reduction
//!
//! Smooth when slow (reduces jitter), responsive when fast (tracks swipes).
//! Applied per axis to the palm centre before it is mapped into the scene.

use std::f32::consts::PI;

use crate::config::FilterConfig;

/// Single exponential smoother. Seeds itself with the first value.
#[derive(Clone, Debug, Default)]
struct LowPass {
    state: Option<f32>,
}

impl LowPass {
    fn apply(&mut self, x: f32, alpha: f32) -> f32 {
        let y = match self.state {
            Some(prev) => alpha * x + (1.0 - alpha) * prev,
            None => x,
        };
        self.state = Some(y);
        y
    }

    fn last(&self) -> Option<f32> {
        self.state
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

/// Adaptive low-pass filter: smooth at rest, responsive during motion
#[derive(Clone, Debug)]
pub struct OneEuroFilter {
    /// Nominal sampling rate (Hz), used until timestamps say otherwise
    nominal_frequency: f32,
    /// Current sampling rate estimate (Hz)
    frequency: f32,
    /// Minimum cutoff frequency (Hz) - lower = smoother at rest
    min_cutoff: f32,
    /// Speed coefficient - higher = less lag during fast motion
    beta: f32,
    /// Derivative cutoff frequency (Hz)
    d_cutoff: f32,

    // State
    x: LowPass,
    dx: LowPass,
    t_prev: Option<f64>,
}

impl OneEuroFilter {
    pub fn new(frequency: f32, min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        Self {
            nominal_frequency: frequency,
            frequency,
            min_cutoff,
            beta,
            d_cutoff,
            x: LowPass::default(),
            dx: LowPass::default(),
            t_prev: None,
        }
    }

    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self::new(cfg.frequency, cfg.min_cutoff, cfg.beta, cfg.d_cutoff)
    }

    /// Calculate smoothing factor alpha
    fn smoothing_factor(rate: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff / rate;
        r / (r + 1.0)
    }

    /// Filter a single value
    ///
    /// - `x`: raw input value
    /// - `t`: timestamp in seconds; without one the current rate estimate is kept
    pub fn filter(&mut self, x: f32, t: Option<f64>) -> f32 {
        if let (Some(prev), Some(now)) = (self.t_prev, t) {
            let dt = now - prev;
            if dt > 0.0 {
                self.frequency = (1.0 / dt) as f32;
            }
        }
        self.t_prev = t;

        let Some(x_prev) = self.x.last() else {
            self.dx.apply(0.0, 1.0);
            return self.x.apply(x, 1.0);
        };

        // 1. Estimate derivative (velocity)
        let dx = if self.frequency > 0.0 {
            (x - x_prev) * self.frequency
        } else {
            0.0
        };
        let dx_hat = self
            .dx
            .apply(dx, Self::smoothing_factor(self.frequency, self.d_cutoff));

        // 2. Adaptive cutoff: more smoothing when slow, less when fast
        let cutoff = self.min_cutoff + self.beta * dx_hat.abs();

        // 3. Apply filter
        self.x
            .apply(x, Self::smoothing_factor(self.frequency, cutoff))
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.x.reset();
        self.dx.reset();
        self.t_prev = None;
        self.frequency = self.nominal_frequency;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

/// Three independent One Euro Filters for a 3D point
#[derive(Clone, Debug, Default)]
pub struct OneEuroFilter3D {
    pub x: OneEuroFilter,
    pub y: OneEuroFilter,
    pub z: OneEuroFilter,
}

impl OneEuroFilter3D {
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self {
            x: OneEuroFilter::from_config(cfg),
            y: OneEuroFilter::from_config(cfg),
            z: OneEuroFilter::from_config(cfg),
        }
    }

    pub fn filter(&mut self, p: [f32; 3], t: Option<f64>) -> [f32; 3] {
        [
            self.x.filter(p[0], t),
            self.y.filter(p[1], t),
            self.z.filter(p[2], t),
        ]
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_passes_through() {
        let mut f = OneEuroFilter::default();
        assert_eq!(f.filter(0.42, Some(0.0)), 0.42);
    }

    #[test]
    fn constant_signal_stays_constant() {
        let mut f = OneEuroFilter::default();
        for i in 0..50 {
            let y = f.filter(0.3, Some(i as f64 / 30.0));
            assert!((y - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn step_is_smoothed_then_converges() {
        let mut f = OneEuroFilter::default();
        f.filter(0.0, Some(0.0));
        let first = f.filter(1.0, Some(1.0 / 30.0));
        assert!(first > 0.0 && first < 1.0);

        let mut y = first;
        for i in 2..200 {
            let next = f.filter(1.0, Some(i as f64 / 30.0));
            assert!(next >= y - 1e-6, "output must not move away from a held step");
            y = next;
        }
        assert!((y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn higher_beta_tracks_fast_motion_with_less_lag() {
        let mut slow = OneEuroFilter::new(30.0, 1.0, 0.0, 1.0);
        let mut fast = OneEuroFilter::new(30.0, 1.0, 5.0, 1.0);
        let (mut ys, mut yf) = (0.0, 0.0);
        for i in 0..10 {
            let t = i as f64 / 30.0;
            let x = i as f32 * 0.1;
            ys = slow.filter(x, Some(t));
            yf = fast.filter(x, Some(t));
        }
        let target = 0.9;
        assert!((target - yf).abs() < (target - ys).abs());
    }

    #[test]
    fn works_without_timestamps() {
        let mut f = OneEuroFilter::default();
        f.filter(0.0, None);
        let y = f.filter(1.0, None);
        assert!(y.is_finite() && y > 0.0 && y < 1.0);
    }

    #[test]
    fn reset_reseeds_on_next_sample() {
        let mut f = OneEuroFilter3D::default();
        f.filter([0.0, 0.0, 0.0], Some(0.0));
        f.filter([1.0, 1.0, 1.0], Some(0.033));
        f.reset();
        assert_eq!(f.filter([5.0, -2.0, 0.5], Some(10.0)), [5.0, -2.0, 0.5]);
    }
}
