//! Exponential-decay smoothing of the damped orbit pose.
//!
//! Each frame every damped component moves a fraction of the way toward
//! its raw counterpart:
//!
//! ```text
//! damped += (raw - damped) * min(rate * elapsed_ms, 1)
//! ```
//!
//! The fraction is capped at 1, so a long frame (e.g. a backgrounded tab)
//! lands exactly on the raw value and never past it.

use super::spherical::OrbitPose;

/// Per-millisecond approach rates for the damped pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingRates {
    /// Rate for radius, polar and azimuth.
    pub orbit: f32,
    /// Rate for the pivot. Usually slower than `orbit`.
    pub pan: f32,
}

/// Fraction of the remaining distance covered in `elapsed_ms`.
///
/// Non-finite or negative inputs produce 0 (no motion).
#[inline]
#[must_use]
pub fn smoothing_factor(rate: f32, elapsed_ms: f32) -> f32 {
    let t = rate * elapsed_ms;
    if t.is_finite() && t > 0.0 {
        t.min(1.0)
    } else {
        0.0
    }
}

impl SmoothingRates {
    /// Advance `damped` toward `raw`. `raw` is only read.
    pub fn advance(&self, damped: &mut OrbitPose, raw: &OrbitPose, elapsed_ms: f32) {
        let orbit = smoothing_factor(self.orbit, elapsed_ms);
        let pan = smoothing_factor(self.pan, elapsed_ms);

        damped.radius += (raw.radius - damped.radius) * orbit;
        damped.polar += (raw.polar - damped.polar) * orbit;
        damped.azimuth += (raw.azimuth - damped.azimuth) * orbit;
        damped.target += (raw.target - damped.target) * pan;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn rates() -> SmoothingRates {
        SmoothingRates {
            orbit: 0.01,
            pan: 0.005,
        }
    }

    #[test]
    fn factor_is_capped_at_one() {
        assert_eq!(smoothing_factor(0.01, 1e6), 1.0);
        assert_eq!(smoothing_factor(0.01, -16.0), 0.0);
        assert_eq!(smoothing_factor(0.01, f32::NAN), 0.0);
        assert!((smoothing_factor(0.01, 16.0) - 0.16).abs() < 1e-6);
    }

    #[test]
    fn converges_monotonically() {
        let raw = OrbitPose {
            radius: 12.0,
            polar: 0.4,
            azimuth: -2.0,
            target: Vec3::new(3.0, -1.0, 0.5),
        };
        let mut damped = OrbitPose::default();
        let mut previous = damped.max_difference(&raw);

        let mut steps = 0;
        while damped.max_difference(&raw) > 1e-4 {
            rates().advance(&mut damped, &raw, 16.0);
            let distance = damped.max_difference(&raw);
            assert!(
                distance < previous,
                "distance did not shrink at step {steps}: {previous} -> {distance}"
            );
            previous = distance;
            steps += 1;
            assert!(steps < 500, "did not converge in 500 steps");
        }
    }

    #[test]
    fn huge_frame_snaps_without_overshoot() {
        let raw = OrbitPose {
            radius: 5.0,
            polar: 1.0,
            azimuth: 1.0,
            target: Vec3::ONE,
        };
        let mut damped = OrbitPose::default();
        rates().advance(&mut damped, &raw, 60_000.0);
        assert_eq!(damped, raw);
    }

    #[test]
    fn target_moves_slower_than_orbit() {
        let raw = OrbitPose {
            radius: 2.0,
            polar: 1.0,
            azimuth: 1.0,
            target: Vec3::new(1.0, 0.0, 0.0),
        };
        let mut damped = OrbitPose {
            radius: 1.0,
            polar: 1.0,
            azimuth: 1.0,
            target: Vec3::ZERO,
        };
        rates().advance(&mut damped, &raw, 16.0);
        let radius_progress = damped.radius - 1.0;
        let target_progress = damped.target.x;
        assert!(target_progress < radius_progress);
    }
}
