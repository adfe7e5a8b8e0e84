//! GUI layer: the settings-panel model a front end renders.
//!
//! The panel talks to the camera only through the rig's command queue and
//! mode-change registry, and exchanges plain JSON with whatever draws it.

/// Projection picker and view buttons.
pub mod panel;

pub use panel::{PanelAction, SettingsPanel};
