//! Camera system: perspective and orthographic projections sharing one
//! orbit, and the rig that drives them.

/// Camera placement and GPU uniform types.
pub mod core;
/// Perspective/orthographic pair and the switch between them.
pub mod pair;
/// Perspective and orthographic cameras.
pub mod projection;
/// Facade tying input, orbit, projections and commands together.
pub mod rig;

pub use self::core::{
    CameraTransform, CameraUniform, UNIFORM_ORTHOGRAPHIC, UNIFORM_PERSPECTIVE,
};
pub use pair::{ProjectionCount, ProjectionMode, ProjectionPair};
pub use projection::{ActiveCamera, OrthographicCamera, PerspectiveCamera};
pub use rig::CameraRig;
