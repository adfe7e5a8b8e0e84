//! The two projection cameras.
//!
//! Both cache their projection matrix. Parameter setters only mark it
//! dirty; [`PerspectiveCamera::update_projection_matrix`] and its
//! orthographic counterpart rebuild it at most once per frame.

use glam::Mat4;

use super::core::{
    CameraTransform, CameraUniform, UNIFORM_ORTHOGRAPHIC, UNIFORM_PERSPECTIVE,
};
use super::pair::ProjectionMode;

// ── Perspective ─────────────────────────────────────────────────────────

/// Perspective camera with a vertical field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    transform: CameraTransform,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    zoom: f32,
    matrix: Mat4,
    dirty: bool,
}

impl PerspectiveCamera {
    /// Create a camera. `fov_degrees` is the vertical field of view.
    #[must_use]
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            transform: CameraTransform::default(),
            fov_y: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            zoom: 1.0,
            matrix: Mat4::IDENTITY,
            dirty: true,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Placement in world space.
    #[must_use]
    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    /// Move the camera. Does not touch the projection matrix.
    pub fn set_transform(&mut self, transform: CameraTransform) {
        self.transform = transform;
    }

    /// Vertical field of view in radians, before zoom.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clip distance.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Lens zoom; narrows the effective field of view.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Change the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.dirty = true;
    }

    /// Change the lens zoom.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.dirty = true;
    }

    /// Whether a parameter changed since the matrix was last rebuilt.
    #[must_use]
    pub fn is_projection_dirty(&self) -> bool {
        self.dirty
    }

    /// Vertical field of view in radians with zoom applied.
    #[must_use]
    pub fn effective_fov_y(&self) -> f32 {
        2.0 * ((self.fov_y * 0.5).tan() / self.zoom).atan()
    }

    /// Height of the view volume at `distance` from the eye.
    #[must_use]
    pub fn visible_height_at(&self, distance: f32) -> f32 {
        2.0 * distance * (self.fov_y * 0.5).tan() / self.zoom
    }

    /// Distance at which the view volume is `height` tall.
    #[must_use]
    pub fn distance_for_visible_height(&self, height: f32) -> f32 {
        height * self.zoom / (2.0 * (self.fov_y * 0.5).tan())
    }

    /// Distance at which a sphere of `radius` fits the narrower field of
    /// view.
    #[must_use]
    pub fn fit_distance(&self, radius: f32) -> f32 {
        let half_y = self.effective_fov_y() * 0.5;
        let half_x = (half_y.tan() * self.aspect).atan();
        radius / half_y.min(half_x).sin()
    }

    /// Rebuild the cached matrix if a parameter changed.
    pub fn update_projection_matrix(&mut self) {
        if !self.dirty {
            return;
        }
        // perspective_rh uses the [0, 1] depth range (wgpu/Vulkan convention)
        self.matrix = Mat4::perspective_rh(
            self.effective_fov_y(),
            self.aspect,
            self.near,
            self.far,
        );
        self.dirty = false;
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.matrix
    }
}

// ── Orthographic ────────────────────────────────────────────────────────

/// Orthographic camera whose view volume is `size` tall at zoom 1.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    transform: CameraTransform,
    size: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
    zoom: f32,
    matrix: Mat4,
    dirty: bool,
}

impl OrthographicCamera {
    /// Create a camera with extents derived from `size` and `aspect`.
    #[must_use]
    pub fn new(size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            transform: CameraTransform::default(),
            size,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near,
            far,
            zoom: 1.0,
            matrix: Mat4::IDENTITY,
            dirty: true,
        };
        camera.set_aspect(aspect);
        camera.update_projection_matrix();
        camera
    }

    /// Placement in world space.
    #[must_use]
    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    /// Move the camera. Does not touch the projection matrix.
    pub fn set_transform(&mut self, transform: CameraTransform) {
        self.transform = transform;
    }

    /// Vertical extent at zoom 1.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// `(left, right, top, bottom)` extents at zoom 1.
    #[must_use]
    pub fn extents(&self) -> (f32, f32, f32, f32) {
        (self.left, self.right, self.top, self.bottom)
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    /// Near clip distance.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Magnification factor; extents are divided by it.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Recompute the horizontal and vertical extents for `aspect`.
    pub fn set_aspect(&mut self, aspect: f32) {
        let half_h = self.size * 0.5;
        let half_w = half_h * aspect;
        self.left = -half_w;
        self.right = half_w;
        self.top = half_h;
        self.bottom = -half_h;
        self.dirty = true;
    }

    /// Change the magnification.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.dirty = true;
    }

    /// Whether a parameter changed since the matrix was last rebuilt.
    #[must_use]
    pub fn is_projection_dirty(&self) -> bool {
        self.dirty
    }

    /// Height of the view volume at the current zoom.
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        self.visible_height_for_zoom(self.zoom)
    }

    /// Height of the view volume at `zoom`.
    #[must_use]
    pub fn visible_height_for_zoom(&self, zoom: f32) -> f32 {
        (self.top - self.bottom) / zoom
    }

    /// Zoom at which the view volume is `height` tall.
    #[must_use]
    pub fn zoom_for_visible_height(&self, height: f32) -> f32 {
        (self.top - self.bottom) / height
    }

    /// Rebuild the cached matrix if a parameter changed.
    pub fn update_projection_matrix(&mut self) {
        if !self.dirty {
            return;
        }
        let inv = self.zoom.recip();
        self.matrix = Mat4::orthographic_rh(
            self.left * inv,
            self.right * inv,
            self.bottom * inv,
            self.top * inv,
            self.near,
            self.far,
        );
        self.dirty = false;
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.matrix
    }
}

// ── Active camera view ──────────────────────────────────────────────────

/// Borrowed view of whichever projection is currently live.
#[derive(Debug, Clone, Copy)]
pub enum ActiveCamera<'a> {
    /// The perspective camera is live.
    Perspective(&'a PerspectiveCamera),
    /// The orthographic camera is live.
    Orthographic(&'a OrthographicCamera),
}

impl ActiveCamera<'_> {
    /// Which projection this is.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Self::Perspective(_) => ProjectionMode::Perspective,
            Self::Orthographic(_) => ProjectionMode::Orthographic,
        }
    }

    /// Placement in world space.
    #[must_use]
    pub fn transform(&self) -> &CameraTransform {
        match self {
            Self::Perspective(camera) => camera.transform(),
            Self::Orthographic(camera) => camera.transform(),
        }
    }

    /// Projection zoom.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        match self {
            Self::Perspective(camera) => camera.zoom(),
            Self::Orthographic(camera) => camera.zoom(),
        }
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        match self {
            Self::Perspective(camera) => camera.aspect(),
            Self::Orthographic(camera) => camera.aspect(),
        }
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.transform().view_matrix()
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self {
            Self::Perspective(camera) => camera.projection_matrix(),
            Self::Orthographic(camera) => camera.projection_matrix(),
        }
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Pack the camera into a GPU uniform.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        let transform = self.transform();
        let (projection, fovy) = match self {
            Self::Perspective(camera) => {
                (UNIFORM_PERSPECTIVE, camera.effective_fov_y().to_degrees())
            }
            Self::Orthographic(_) => (UNIFORM_ORTHOGRAPHIC, 0.0),
        };
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: transform.position.to_array(),
            aspect: self.aspect(),
            forward: transform.forward().to_array(),
            zoom: self.zoom(),
            projection,
            fovy,
            ..CameraUniform::new()
        }
    }
}
