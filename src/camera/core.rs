use glam::{Mat4, Quat, Vec3};

/// World-space placement shared by both projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    /// Eye position in world space.
    pub position: Vec3,
    /// Camera orientation; the camera looks down its local -Z.
    pub rotation: Quat,
    /// Point the camera is looking at.
    pub target: Vec3,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::Z,
            rotation: Quat::IDENTITY,
            target: Vec3::ZERO,
        }
    }
}

impl CameraTransform {
    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Camera-space up in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Projection discriminant as written into [`CameraUniform::projection`].
pub const UNIFORM_PERSPECTIVE: u32 = 0;
/// Projection discriminant as written into [`CameraUniform::projection`].
pub const UNIFORM_ORTHOGRAPHIC: u32 = 1;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU-ready uniform holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Projection zoom factor.
    pub zoom: f32,
    /// [`UNIFORM_PERSPECTIVE`] or [`UNIFORM_ORTHOGRAPHIC`].
    pub projection: u32,
    /// Vertical field of view in degrees; 0 for orthographic.
    pub fovy: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            zoom: 1.0,
            projection: UNIFORM_PERSPECTIVE,
            fovy: 0.0,
            _pad: [0.0; 2],
        }
    }

    /// Raw bytes, ready for a buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
