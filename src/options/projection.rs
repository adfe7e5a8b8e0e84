use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{ProjectionCount, ProjectionMode};
use crate::error::VantageError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Projection", inline)]
#[serde(default)]
/// Perspective and orthographic camera parameters.
pub struct ProjectionOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fov_degrees: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub far: f32,
    /// Vertical extent of the orthographic view volume at zoom 1.
    #[schemars(skip)]
    pub ortho_size: f32,
    /// Projection active at startup.
    #[schemars(title = "Projection")]
    pub initial_mode: ProjectionMode,
    /// Whether an orthographic camera is created at all.
    #[schemars(skip)]
    pub projection_count: ProjectionCount,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            ortho_size: 6.5,
            initial_mode: ProjectionMode::Perspective,
            projection_count: ProjectionCount::Two,
        }
    }
}

impl ProjectionOptions {
    /// Reject degenerate frusta and an orthographic start on a
    /// single-projection rig.
    pub fn validate(&self) -> Result<(), VantageError> {
        if !self.fov_degrees.is_finite()
            || self.fov_degrees <= 0.0
            || self.fov_degrees >= 180.0
        {
            return Err(VantageError::InvalidOption {
                name: "fov_degrees",
                reason: format!("must lie in (0, 180), got {}", self.fov_degrees),
            });
        }
        if !self.near.is_finite() || self.near <= 0.0 {
            return Err(VantageError::InvalidOption {
                name: "near",
                reason: format!("must be positive, got {}", self.near),
            });
        }
        if !self.far.is_finite() || self.far <= self.near {
            return Err(VantageError::InvalidOption {
                name: "far",
                reason: format!(
                    "must be greater than near ({}), got {}",
                    self.near, self.far
                ),
            });
        }
        if !self.ortho_size.is_finite() || self.ortho_size <= 0.0 {
            return Err(VantageError::InvalidOption {
                name: "ortho_size",
                reason: format!("must be positive, got {}", self.ortho_size),
            });
        }
        if self.projection_count == ProjectionCount::One
            && self.initial_mode == ProjectionMode::Orthographic
        {
            return Err(VantageError::ProjectionUnavailable(
                ProjectionMode::Orthographic,
            ));
        }
        Ok(())
    }
}
