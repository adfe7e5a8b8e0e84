use std::f32::consts::{PI, TAU};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VantageError;
use crate::navigation::{Bounds, TargetBounds};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Orbit bounds, input sensitivity, smoothing and the home pose.
pub struct NavigationOptions {
    /// Allowed orbit radius (world units). Minimum must be positive.
    #[schemars(skip)]
    pub radius_range: Bounds,
    /// Allowed polar angle in radians, within `[0, π]`.
    #[schemars(skip)]
    pub polar_range: Bounds,
    /// Allowed azimuth in radians; absent means unconstrained.
    #[schemars(skip)]
    pub azimuth_range: Option<Bounds>,
    /// Per-axis bounds on the orbit pivot.
    #[schemars(skip)]
    pub target_range: TargetBounds,
    /// Radians of orbit per drag across the shorter viewport side.
    #[schemars(title = "Drag Sensitivity", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub drag_sensitivity: f32,
    /// Radius change per wheel pixel (dolly) or exponent per pixel (zoom).
    #[schemars(title = "Zoom Sensitivity", range(min = 0.0005, max = 0.05), extend("step" = 0.0005))]
    pub zoom_sensitivity: f32,
    /// Orbit smoothing rate per millisecond; higher is snappier.
    #[schemars(title = "Orbit Smoothing", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub orbit_smoothing_rate: f32,
    /// Pan smoothing rate per millisecond.
    #[schemars(title = "Pan Smoothing", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub pan_smoothing_rate: f32,
    /// Home orbit radius.
    #[schemars(skip)]
    pub initial_radius: f32,
    /// Home polar angle in radians.
    #[schemars(skip)]
    pub initial_polar: f32,
    /// Home azimuth in radians.
    #[schemars(skip)]
    pub initial_azimuth: f32,
    /// Home pivot.
    #[schemars(skip)]
    pub initial_target: [f32; 3],
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            radius_range: Bounds::new(1.0, 25.0),
            polar_range: Bounds::new(0.01, PI - 0.01),
            azimuth_range: None,
            target_range: TargetBounds::uniform(Bounds::new(-10.0, 10.0)),
            drag_sensitivity: TAU,
            zoom_sensitivity: 0.005,
            orbit_smoothing_rate: 0.01,
            pan_smoothing_rate: 0.005,
            initial_radius: 8.0,
            initial_polar: 1.1,
            initial_azimuth: 0.6,
            initial_target: [0.0, 0.0, 0.0],
        }
    }
}

impl NavigationOptions {
    /// Reject non-finite or negative tuning values and non-finite home
    /// pose components. Ranges are checked by
    /// [`Constraints::new`](crate::navigation::Constraints::new).
    pub fn validate(&self) -> Result<(), VantageError> {
        let non_negative = [
            ("drag_sensitivity", self.drag_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("orbit_smoothing_rate", self.orbit_smoothing_rate),
            ("pan_smoothing_rate", self.pan_smoothing_rate),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(VantageError::InvalidOption {
                    name,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        let finite = [
            ("initial_radius", self.initial_radius),
            ("initial_polar", self.initial_polar),
            ("initial_azimuth", self.initial_azimuth),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(VantageError::InvalidOption {
                    name,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        if !self.initial_target.iter().all(|v| v.is_finite()) {
            return Err(VantageError::InvalidOption {
                name: "initial_target",
                reason: format!("must be finite, got {:?}", self.initial_target),
            });
        }
        Ok(())
    }
}
