//! Input handling: platform-agnostic events, the gesture sampler that
//! folds them into per-frame samples, and scoped callback registration.

/// Platform-agnostic input events.
pub mod event;
/// Per-frame gesture sample and wheel binding.
pub mod gesture;
/// Event → gesture state machine.
pub mod sampler;
/// Callback registry with release-on-drop handles.
pub mod subscription;
/// DOM surface binding.
#[cfg(feature = "web")]
pub mod web;

pub use event::{InputEvent, Modifiers, MouseButton, TouchPhase, WheelDelta};
pub use gesture::{GestureKind, GestureSample, WheelBinding};
pub use sampler::GestureSampler;
pub use subscription::{Registry, Subscription};
#[cfg(feature = "web")]
pub use web::DomSurface;
