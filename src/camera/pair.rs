//! One perspective and (optionally) one orthographic camera sharing a
//! viewport, with the rules for handing the pose between them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::core::CameraTransform;
use super::projection::{ActiveCamera, OrthographicCamera, PerspectiveCamera};
use crate::error::VantageError;
use crate::input::WheelBinding;
use crate::navigation::{OrbitPose, ZoomModel};
use crate::options::ProjectionOptions;

/// Which projection is live.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Foreshortened view.
    #[default]
    Perspective,
    /// Parallel view.
    Orthographic,
}

impl ProjectionMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Orthographic,
            Self::Orthographic => Self::Perspective,
        }
    }

    /// How wheel input is interpreted under this projection.
    #[must_use]
    pub fn wheel_binding(self) -> WheelBinding {
        match self {
            Self::Perspective => WheelBinding::Dolly,
            Self::Orthographic => WheelBinding::Zoom,
        }
    }
}

/// How many projections a rig owns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionCount {
    /// Perspective only.
    One,
    /// Perspective and orthographic.
    #[default]
    Two,
}

/// Both projections plus the shared viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPair {
    perspective: PerspectiveCamera,
    orthographic: Option<OrthographicCamera>,
    mode: ProjectionMode,
    width: u32,
    height: u32,
}

impl ProjectionPair {
    /// Build the cameras for a `width` × `height` viewport.
    ///
    /// A zero dimension falls back to a square aspect until the first
    /// valid [`resize`](Self::resize).
    pub fn new(
        width: u32,
        height: u32,
        options: &ProjectionOptions,
    ) -> Result<Self, VantageError> {
        options.validate()?;
        let aspect = aspect_ratio(width, height).unwrap_or_else(|| {
            log::warn!("viewport {width}x{height} has no area; assuming square");
            1.0
        });

        let perspective = PerspectiveCamera::new(
            options.fov_degrees,
            aspect,
            options.near,
            options.far,
        );
        let orthographic = match options.projection_count {
            ProjectionCount::One => None,
            ProjectionCount::Two => Some(OrthographicCamera::new(
                options.ortho_size,
                aspect,
                options.near,
                options.far,
            )),
        };

        Ok(Self {
            perspective,
            orthographic,
            mode: options.initial_mode,
            width,
            height,
        })
    }

    /// Live projection mode.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Number of projections available.
    #[must_use]
    pub fn count(&self) -> ProjectionCount {
        if self.orthographic.is_some() {
            ProjectionCount::Two
        } else {
            ProjectionCount::One
        }
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Shorter viewport side, used to turn drag pixels into angles.
    #[must_use]
    pub fn normalizing_length(&self) -> f32 {
        self.width.min(self.height) as f32
    }

    /// The perspective camera.
    #[must_use]
    pub fn perspective(&self) -> &PerspectiveCamera {
        &self.perspective
    }

    /// The orthographic camera, if this pair has one.
    #[must_use]
    pub fn orthographic(&self) -> Option<&OrthographicCamera> {
        self.orthographic.as_ref()
    }

    /// Borrow the live camera.
    #[must_use]
    pub fn active(&self) -> ActiveCamera<'_> {
        match (self.mode, &self.orthographic) {
            (ProjectionMode::Orthographic, Some(ortho)) => {
                ActiveCamera::Orthographic(ortho)
            }
            _ => ActiveCamera::Perspective(&self.perspective),
        }
    }

    /// Scale model of the live projection for pan speed.
    #[must_use]
    pub fn zoom_model(&self) -> ZoomModel {
        match self.active() {
            ActiveCamera::Perspective(_) => ZoomModel::Distance,
            ActiveCamera::Orthographic(ortho) => {
                ZoomModel::FixedScale { zoom: ortho.zoom() }
            }
        }
    }

    /// Orthographic zoom that shows the same height as the perspective
    /// camera does at `distance` from its target.
    #[must_use]
    pub fn ortho_zoom_for_distance(&self, distance: f32) -> Option<f32> {
        let ortho = self.orthographic.as_ref()?;
        Some(ortho.zoom_for_visible_height(self.perspective.visible_height_at(distance)))
    }

    /// Inverse of [`ortho_zoom_for_distance`](Self::ortho_zoom_for_distance).
    #[must_use]
    pub fn distance_for_ortho_zoom(&self, zoom: f32) -> Option<f32> {
        let ortho = self.orthographic.as_ref()?;
        let height = ortho.visible_height_for_zoom(zoom);
        Some(self.perspective.distance_for_visible_height(height))
    }

    /// Resize the viewport. Returns `false` and leaves the cameras alone
    /// if either dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(aspect) = aspect_ratio(width, height) else {
            return false;
        };
        self.width = width;
        self.height = height;
        self.perspective.set_aspect(aspect);
        if let Some(ortho) = self.orthographic.as_mut() {
            ortho.set_aspect(aspect);
        }
        self.update_projection_matrices();
        true
    }

    /// Make `mode` live, carrying the view across.
    ///
    /// `radius` is the current orbit distance. Going to orthographic, the
    /// zoom is set so the apparent size is unchanged. Going back, the
    /// equivalent distance is returned so the caller can move the orbit
    /// there. Switching to the mode already live changes nothing.
    pub fn switch_to(
        &mut self,
        mode: ProjectionMode,
        radius: f32,
    ) -> Result<Option<f32>, VantageError> {
        if mode == self.mode {
            return Ok(None);
        }
        let zoom = self.ortho_zoom_for_distance(radius);
        let Some(ortho) = self.orthographic.as_mut() else {
            return Err(VantageError::ProjectionUnavailable(
                ProjectionMode::Orthographic,
            ));
        };

        let distance = match mode {
            ProjectionMode::Orthographic => {
                ortho.set_transform(*self.perspective.transform());
                if let Some(zoom) = zoom {
                    ortho.set_zoom(zoom);
                }
                ortho.update_projection_matrix();
                None
            }
            ProjectionMode::Perspective => {
                self.perspective.set_transform(*ortho.transform());
                let height = ortho.visible_height();
                self.perspective.update_projection_matrix();
                Some(self.perspective.distance_for_visible_height(height))
            }
        };
        self.mode = mode;
        Ok(distance)
    }

    /// Place the live camera at `pose`. Under orthographic the zoom
    /// follows the pose radius.
    pub fn apply_pose(&mut self, pose: &OrbitPose) {
        let transform = CameraTransform {
            position: pose.eye(),
            rotation: pose.orientation(),
            target: pose.target,
        };
        let zoom = self.ortho_zoom_for_distance(pose.radius);
        match (self.mode, self.orthographic.as_mut()) {
            (ProjectionMode::Orthographic, Some(ortho)) => {
                ortho.set_transform(transform);
                if let Some(zoom) = zoom.filter(|z| z.is_finite() && *z > 0.0) {
                    ortho.set_zoom(zoom);
                }
                ortho.update_projection_matrix();
            }
            _ => {
                self.perspective.set_transform(transform);
                self.perspective.update_projection_matrix();
            }
        }
    }

    /// Rebuild any dirty projection matrix.
    pub fn update_projection_matrices(&mut self) {
        self.perspective.update_projection_matrix();
        if let Some(ortho) = self.orthographic.as_mut() {
            ortho.update_projection_matrix();
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn pair() -> ProjectionPair {
        ProjectionPair::new(800, 600, &ProjectionOptions::default()).unwrap()
    }

    #[test]
    fn zoom_and_distance_round_trip_exactly() {
        let pair = pair();
        for distance in [1.0, 4.2, 25.0] {
            let zoom = pair.ortho_zoom_for_distance(distance).unwrap();
            let back = pair.distance_for_ortho_zoom(zoom).unwrap();
            assert!((back - distance).abs() / distance < 1e-5, "{distance} -> {back}");
        }
    }

    #[test]
    fn switching_preserves_apparent_height() {
        let mut pair = pair();
        let visible = pair.perspective().visible_height_at(5.0);
        assert_eq!(pair.switch_to(ProjectionMode::Orthographic, 5.0).unwrap(), None);
        let ortho = pair.orthographic().unwrap();
        assert!((ortho.visible_height() - visible).abs() < 1e-4);

        let distance = pair
            .switch_to(ProjectionMode::Perspective, 5.0)
            .unwrap()
            .unwrap();
        assert!((distance - 5.0).abs() < 0.05);
    }

    #[test]
    fn switching_to_live_mode_is_bit_identical() {
        let mut pair = pair();
        let before = pair.clone();
        assert_eq!(pair.switch_to(ProjectionMode::Perspective, 5.0).unwrap(), None);
        assert_eq!(pair, before);
    }

    #[test]
    fn single_projection_refuses_orthographic() {
        let options = ProjectionOptions {
            projection_count: ProjectionCount::One,
            ..ProjectionOptions::default()
        };
        let mut pair = ProjectionPair::new(800, 600, &options).unwrap();
        assert!(matches!(
            pair.switch_to(ProjectionMode::Orthographic, 5.0),
            Err(VantageError::ProjectionUnavailable(ProjectionMode::Orthographic))
        ));
        assert_eq!(pair.mode(), ProjectionMode::Perspective);
        assert_eq!(pair.count(), ProjectionCount::One);
    }

    #[test]
    fn resize_scenario() {
        let mut pair = pair();
        let (l0, r0, t0, b0) = pair.orthographic().unwrap().extents();
        assert!(pair.resize(1600, 600));

        assert!((pair.perspective().aspect() - 1600.0 / 600.0).abs() < 1e-6);
        let (l1, r1, t1, b1) = pair.orthographic().unwrap().extents();
        assert!((l1 - 2.0 * l0).abs() < 1e-5);
        assert!((r1 - 2.0 * r0).abs() < 1e-5);
        assert_eq!(t1, t0);
        assert_eq!(b1, b0);
        assert!(!pair.perspective().is_projection_dirty());
    }

    #[test]
    fn zero_size_resize_is_ignored() {
        let mut pair = pair();
        let before = pair.clone();
        assert!(!pair.resize(0, 600));
        assert!(!pair.resize(800, 0));
        assert_eq!(pair, before);
    }

    #[test]
    fn orthographic_zoom_follows_pose_radius() {
        let mut pair = pair();
        let _ = pair.switch_to(ProjectionMode::Orthographic, 5.0).unwrap();
        let near = OrbitPose {
            radius: 2.0,
            target: Vec3::ZERO,
            ..OrbitPose::default()
        };
        pair.apply_pose(&near);
        let zoom_near = pair.active().zoom();
        pair.apply_pose(&OrbitPose { radius: 8.0, ..near });
        assert!(pair.active().zoom() < zoom_near);
        assert!((pair.active().transform().position - near.target).length() > 7.9);
    }

    #[test]
    fn wheel_binding_follows_mode() {
        assert_eq!(ProjectionMode::Perspective.wheel_binding(), WheelBinding::Dolly);
        assert_eq!(ProjectionMode::Orthographic.wheel_binding(), WheelBinding::Zoom);
        assert_eq!(ProjectionMode::Perspective.toggled(), ProjectionMode::Orthographic);
    }
}
