//! The rig's discrete vocabulary.
//!
//! Key presses, GUI buttons and programmatic calls all become a
//! [`ViewCommand`]. Commands go through a [`CommandQueue`] and are run at
//! the start of the next [`CameraRig::update`](crate::CameraRig::update),
//! so a button press never mutates camera state mid-frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::camera::ProjectionMode;

/// A discrete operation on the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    // ── Projection ──────────────────────────────────────────────────
    /// Make `mode` the live projection. A no-op if it already is.
    SwitchProjection(ProjectionMode),
    /// Flip between perspective and orthographic.
    ToggleProjection,

    // ── Pose ────────────────────────────────────────────────────────
    /// Glide back to the home pose.
    ResetView,
    /// Aim at the bounds of the current scene.
    FrameScene,
}

/// Serializable tag for the subset of [`ViewCommand`] that can be
/// key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAction {
    /// Flip between perspective and orthographic.
    ToggleProjection,
    /// Switch to perspective.
    UsePerspective,
    /// Switch to orthographic.
    UseOrthographic,
    /// Glide back to the home pose.
    ResetView,
    /// Aim at the scene bounds.
    FrameScene,
}

impl ViewAction {
    /// The command this action issues.
    #[must_use]
    pub fn command(self) -> ViewCommand {
        match self {
            Self::ToggleProjection => ViewCommand::ToggleProjection,
            Self::UsePerspective => {
                ViewCommand::SwitchProjection(ProjectionMode::Perspective)
            }
            Self::UseOrthographic => {
                ViewCommand::SwitchProjection(ProjectionMode::Orthographic)
            }
            Self::ResetView => ViewCommand::ResetView,
            Self::FrameScene => ViewCommand::FrameScene,
        }
    }
}

/// FIFO of pending commands. Clones share the same queue, so a GUI panel
/// can hold one while the rig drains it.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: Rc<RefCell<VecDeque<ViewCommand>>>,
}

impl CommandQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command.
    pub fn push(&self, command: ViewCommand) {
        log::trace!("queued {command:?}");
        self.pending.borrow_mut().push_back(command);
    }

    /// Dequeue the oldest command.
    #[must_use]
    pub fn pop(&self) -> Option<ViewCommand> {
        self.pending.borrow_mut().pop_front()
    }

    /// Number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Drop every pending command.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_fifo() {
        let queue = CommandQueue::new();
        let panel_side = queue.clone();
        panel_side.push(ViewCommand::ResetView);
        panel_side.push(ViewCommand::ToggleProjection);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(ViewCommand::ResetView));
        assert_eq!(queue.pop(), Some(ViewCommand::ToggleProjection));
        assert_eq!(queue.pop(), None);
        assert!(panel_side.is_empty());
    }

    #[test]
    fn actions_map_to_commands() {
        assert_eq!(
            ViewAction::UseOrthographic.command(),
            ViewCommand::SwitchProjection(ProjectionMode::Orthographic)
        );
        assert_eq!(ViewAction::ResetView.command(), ViewCommand::ResetView);
    }
}
