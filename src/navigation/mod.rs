//! Orbit navigation: spherical pose, bounds, smoothing and the per-frame
//! update that turns gestures into camera motion.

/// Closed-interval bounds and their validation.
pub mod constraint;
/// Raw/damped orbit state and its update step.
pub mod orbit;
/// Frame-rate independent exponential smoothing.
pub mod smoothing;
/// Spherical pose around a pivot.
pub mod spherical;

pub use constraint::{Bounds, Constraints, TargetBounds};
pub use orbit::{FrameInput, OrbitControls, ZoomModel};
pub use smoothing::{smoothing_factor, SmoothingRates};
pub use spherical::OrbitPose;
