use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::command::ViewAction;
use crate::error::VantageError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format
/// (`"KeyP"`, `"Digit1"`, `"Home"`), which matches the DOM
/// `KeyboardEvent.code` values.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `ResetView` → `"KeyR"`).
    pub bindings: HashMap<ViewAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (ViewAction::ToggleProjection, "KeyP".into()),
            (ViewAction::UsePerspective, "Digit1".into()),
            (ViewAction::UseOrthographic, "Digit2".into()),
            (ViewAction::ResetView, "KeyR".into()),
            (ViewAction::FrameScene, "KeyF".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewAction> {
        self.bindings
            .iter()
            .find_map(|(action, bound)| (bound == key).then_some(*action))
    }

    /// Reject a key bound to more than one action.
    pub fn validate(&self) -> Result<(), VantageError> {
        let mut seen: HashMap<&str, ViewAction> = HashMap::new();
        for (action, key) in &self.bindings {
            if let Some(other) = seen.insert(key.as_str(), *action) {
                return Err(VantageError::InvalidOption {
                    name: "keybindings",
                    reason: format!("{key} is bound to both {other:?} and {action:?}"),
                });
            }
        }
        Ok(())
    }
}
