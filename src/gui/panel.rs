//! Settings panel model: projection picker and view buttons.
//!
//! The panel is an ordinary owned value created once by the application
//! and wired to one [`CameraRig`]. It never touches the rig directly:
//! button presses become [`ViewCommand`]s on the rig's queue, and the
//! displayed mode follows the rig's mode-change notifications.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::camera::{CameraRig, ProjectionCount, ProjectionMode};
use crate::command::{CommandQueue, ViewCommand};
use crate::input::Subscription;

/// A user interaction with the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// A projection was picked.
    SelectProjection(ProjectionMode),
    /// The reset button was pressed.
    ResetView,
    /// The frame button was pressed.
    FrameScene,
    /// The panel's show/hide toggle was pressed.
    ToggleVisible,
}

impl PanelAction {
    /// Parse a JSON message such as
    /// `{"action": "select_projection", "mode": "orthographic"}`.
    #[must_use]
    pub fn from_json(msg: &Value) -> Option<Self> {
        let action = msg.get("action")?.as_str()?;
        match action {
            "select_projection" => {
                let mode = serde_json::from_value(msg.get("mode")?.clone()).ok()?;
                Some(Self::SelectProjection(mode))
            }
            "reset_view" => Some(Self::ResetView),
            "frame_scene" => Some(Self::FrameScene),
            "toggle_visible" => Some(Self::ToggleVisible),
            _ => None,
        }
    }
}

/// Owned settings-panel state bound to one rig.
#[derive(Debug)]
pub struct SettingsPanel {
    commands: CommandQueue,
    mode: Rc<Cell<ProjectionMode>>,
    count: ProjectionCount,
    visible: bool,
    _mode_changes: Subscription,
}

impl SettingsPanel {
    /// Bind a panel to `rig`. The panel stops following mode changes when
    /// it is dropped.
    #[must_use]
    pub fn new(rig: &CameraRig) -> Self {
        let mode = Rc::new(Cell::new(rig.mode()));
        let observed = Rc::clone(&mode);
        let subscription = rig.on_mode_change(move |m| observed.set(*m));
        Self {
            commands: rig.commands(),
            mode,
            count: rig.projection_count(),
            visible: true,
            _mode_changes: subscription,
        }
    }

    /// Mode the panel currently shows as selected.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        self.mode.get()
    }

    /// Modes the picker offers.
    #[must_use]
    pub fn available_modes(&self) -> &'static [ProjectionMode] {
        match self.count {
            ProjectionCount::One => &[ProjectionMode::Perspective],
            ProjectionCount::Two => {
                &[ProjectionMode::Perspective, ProjectionMode::Orthographic]
            }
        }
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Apply a user interaction. Returns `false` if it was refused (an
    /// unavailable projection).
    pub fn apply(&mut self, action: PanelAction) -> bool {
        match action {
            PanelAction::SelectProjection(mode) => {
                if !self.available_modes().contains(&mode) {
                    log::warn!("panel: {mode:?} projection is not available");
                    return false;
                }
                self.commands.push(ViewCommand::SwitchProjection(mode));
            }
            PanelAction::ResetView => self.commands.push(ViewCommand::ResetView),
            PanelAction::FrameScene => self.commands.push(ViewCommand::FrameScene),
            PanelAction::ToggleVisible => self.visible = !self.visible,
        }
        true
    }

    /// Parse and apply a JSON message. Unknown messages are ignored.
    pub fn handle_message(&mut self, msg: &Value) -> bool {
        match PanelAction::from_json(msg) {
            Some(action) => self.apply(action),
            None => {
                log::debug!("panel: ignoring message {msg}");
                false
            }
        }
    }

    /// Snapshot for a UI front end.
    #[must_use]
    pub fn state_json(&self) -> Value {
        json!({
            "projection": self.mode(),
            "available": self.available_modes(),
            "visible": self.visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn rig() -> CameraRig {
        let mut rig = CameraRig::new(640, 480, &Options::default()).unwrap();
        rig.attach_controls().unwrap();
        rig
    }

    #[test]
    fn selection_is_queued_until_update() {
        let mut rig = rig();
        let mut panel = SettingsPanel::new(&rig);
        assert!(panel.apply(PanelAction::SelectProjection(
            ProjectionMode::Orthographic
        )));
        assert_eq!(panel.mode(), ProjectionMode::Perspective);

        rig.update(16.0).unwrap();
        assert_eq!(rig.mode(), ProjectionMode::Orthographic);
        assert_eq!(panel.mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn panel_follows_changes_made_elsewhere() {
        let mut rig = rig();
        let panel = SettingsPanel::new(&rig);
        rig.toggle_projection().unwrap();
        assert_eq!(panel.mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn dropping_panel_releases_observer() {
        let mut rig = rig();
        let panel = SettingsPanel::new(&rig);
        assert_eq!(rig.mode_changes().len(), 1);
        drop(panel);
        assert!(rig.mode_changes().is_empty());
        rig.toggle_projection().unwrap();
    }

    #[test]
    fn single_projection_panel_refuses_orthographic() {
        let mut options = Options::default();
        options.projection.projection_count = ProjectionCount::One;
        let rig = CameraRig::new(640, 480, &options).unwrap();
        let mut panel = SettingsPanel::new(&rig);
        assert!(!panel.apply(PanelAction::SelectProjection(
            ProjectionMode::Orthographic
        )));
        assert!(rig.commands().is_empty());
    }

    #[test]
    fn json_messages_drive_the_panel() {
        let rig = rig();
        let mut panel = SettingsPanel::new(&rig);
        assert!(panel.handle_message(&json!({ "action": "reset_view" })));
        assert!(panel.handle_message(&json!({
            "action": "select_projection",
            "mode": "orthographic",
        })));
        assert!(!panel.handle_message(&json!({ "action": "explode" })));
        assert!(!panel.handle_message(&json!({
            "action": "select_projection",
            "mode": "fisheye",
        })));

        let queue = rig.commands();
        assert_eq!(queue.pop(), Some(ViewCommand::ResetView));
        assert_eq!(
            queue.pop(),
            Some(ViewCommand::SwitchProjection(ProjectionMode::Orthographic))
        );
    }

    #[test]
    fn state_snapshot_is_serializable() {
        let rig = rig();
        let mut panel = SettingsPanel::new(&rig);
        let _ = panel.apply(PanelAction::ToggleVisible);
        let state = panel.state_json();
        assert_eq!(state["projection"], "perspective");
        assert_eq!(state["available"][1], "orthographic");
        assert_eq!(state["visible"], false);
    }
}
