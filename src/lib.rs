// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera navigation for 3D viewers.
//!
//! Vantage turns raw pointer, touch and wheel input into a smoothed orbit
//! around a target point, and keeps a perspective and an orthographic
//! projection in agreement so the view can switch between them without a
//! visible jump in scale.
//!
//! # Key entry points
//!
//! - [`CameraRig`] - the facade: feed it input, call `update` once per
//!   frame, read the live camera
//! - [`options::Options`] - navigation limits, tuning, projection and
//!   keybindings, loadable from TOML presets
//! - [`SettingsPanel`] - projection picker and view buttons driving the
//!   rig through its command queue
//! - [`Viewer`] (feature `viewer`) - a winit window around a rig and a
//!   user-supplied [`Renderer`]
//!
//! # Frame flow
//!
//! Input handlers only record events into the rig's
//! [`GestureSampler`](input::GestureSampler). Once per frame,
//! [`CameraRig::update`] runs queued [`ViewCommand`]s, drains the sampler
//! into one [`GestureSample`](input::GestureSample), moves the orbit
//! toward its new goal with frame-rate independent smoothing and places
//! the active camera.

pub mod camera;
pub mod command;
pub mod error;
pub mod gui;
pub mod input;
pub mod navigation;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::{ActiveCamera, CameraRig, CameraUniform, ProjectionMode};
pub use command::{ViewAction, ViewCommand};
pub use error::VantageError;
pub use gui::{PanelAction, SettingsPanel};
pub use input::{InputEvent, Modifiers, MouseButton, TouchPhase, WheelDelta};
pub use options::Options;
pub use scene::{Aabb, SceneNode};
pub use util::FrameClock;
#[cfg(feature = "viewer")]
pub use viewer::{Renderer, Viewer};
