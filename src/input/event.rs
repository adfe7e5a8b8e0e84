/// Platform-agnostic input events.
///
/// These are fed into a [`GestureSampler`](super::GestureSampler), which
/// folds them into the per-frame [`GestureSample`](super::GestureSample).
///
/// # Example
///
/// ```ignore
/// rig.handle_input(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// rig.handle_input(InputEvent::Wheel {
///     delta: WheelDelta::Lines(1.0),
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute surface position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels (down is positive).
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel or trackpad scroll.
    Wheel {
        /// Scroll amount in platform units.
        delta: WheelDelta,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// The new modifier state.
        modifiers: Modifiers,
    },
    /// A touch point changed.
    Touch {
        /// Identifier stable for the lifetime of one touch.
        id: u64,
        /// Lifecycle phase of this touch.
        phase: TouchPhase,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// The platform cancelled the active pointer (e.g. `pointercancel`).
    PointerCancel,
    /// The surface lost focus; any in-flight drag is abandoned.
    FocusLost,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift is held.
    pub shift: bool,
    /// Control is held.
    pub ctrl: bool,
    /// Alt / Option is held.
    pub alt: bool,
    /// Meta / Command / Super is held.
    pub meta: bool,
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger touched the surface.
    Started,
    /// A finger moved.
    Moved,
    /// A finger lifted.
    Ended,
    /// The platform cancelled the touch.
    Cancelled,
}

/// Raw scroll amount in the unit the platform reported.
///
/// Positive values scroll content down, i.e. move the camera away
/// (the DOM `deltaY` convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Pixel-precise delta (trackpads, DOM `DOM_DELTA_PIXEL`).
    Pixels(f32),
    /// Line-based delta (notched wheels, DOM `DOM_DELTA_LINE`).
    Lines(f32),
    /// Page-based delta (DOM `DOM_DELTA_PAGE`).
    Pages(f32),
}

impl WheelDelta {
    /// Pixels per reported line.
    pub const LINE_HEIGHT: f32 = 40.0;
    /// Pixels per reported page.
    pub const PAGE_HEIGHT: f32 = 800.0;

    /// Convert to a signed pixel-equivalent scalar.
    #[must_use]
    pub fn normalized(self) -> f32 {
        match self {
            Self::Pixels(px) => px,
            Self::Lines(lines) => lines * Self::LINE_HEIGHT,
            Self::Pages(pages) => pages * Self::PAGE_HEIGHT,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Started,
            winit::event::TouchPhase::Moved => Self::Moved,
            winit::event::TouchPhase::Ended => Self::Ended,
            winit::event::TouchPhase::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for WheelDelta {
    /// winit reports positive `y` for scrolling up; flip it to the DOM
    /// convention.
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => Self::Lines(-y),
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                Self::Pixels(-pos.y as f32)
            }
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_units_normalize_to_pixels() {
        assert_eq!(WheelDelta::Pixels(12.0).normalized(), 12.0);
        assert_eq!(WheelDelta::Lines(-3.0).normalized(), -120.0);
        assert_eq!(WheelDelta::Pages(1.0).normalized(), 800.0);
    }
}
