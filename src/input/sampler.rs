//! Folds raw platform events into a [`GestureSample`].
//!
//! The sampler owns all transient input state (cursor position, the active
//! drag session, live touches, modifier keys). A drag session opens on
//! press/touch-start and closes on the matching release, on cancel, or on
//! focus loss; motion outside a session is only tracked, never accumulated.

use glam::Vec2;

use super::event::{InputEvent, Modifiers, MouseButton, TouchPhase};
use super::gesture::{GestureKind, GestureSample, WheelBinding};

/// Wheel-equivalent pixels per pixel of pinch spread change.
const PINCH_ZOOM_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragSource {
    Mouse(MouseButton),
    Touch,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    source: DragSource,
    kind: GestureKind,
    /// Last recorded position; `None` until the first position is known.
    last: Option<Vec2>,
    /// Distance between the first two touches, for pinch.
    spread: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
struct TouchPoint {
    id: u64,
    position: Vec2,
}

/// Normalizes pointer, touch and wheel events into a gesture stream.
#[derive(Debug, Default)]
pub struct GestureSampler {
    sample: GestureSample,
    binding: WheelBinding,
    modifiers: Modifiers,
    cursor: Option<Vec2>,
    session: Option<DragSession>,
    touches: Vec<TouchPoint>,
}

impl GestureSampler {
    /// Create an idle sampler with the dolly wheel binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a mouse drag by button and held modifiers.
    #[must_use]
    pub fn classify(button: MouseButton, modifiers: Modifiers) -> GestureKind {
        match button {
            MouseButton::Right | MouseButton::Middle => GestureKind::Pan,
            MouseButton::Left if modifiers.ctrl || modifiers.shift => {
                GestureKind::Pan
            }
            MouseButton::Left => GestureKind::Orbit,
        }
    }

    /// Accumulated, not yet drained input.
    #[must_use]
    pub fn sample(&self) -> &GestureSample {
        &self.sample
    }

    /// Drain the accumulated input (read-then-reset).
    pub fn take_sample(&mut self) -> GestureSample {
        self.sample.take()
    }

    /// Current wheel binding.
    #[must_use]
    pub fn wheel_binding(&self) -> WheelBinding {
        self.binding
    }

    /// Change how wheel and pinch input is signed.
    pub fn set_wheel_binding(&mut self, binding: WheelBinding) {
        self.binding = binding;
    }

    /// Whether a drag session is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Kind of the open drag session, if any.
    #[must_use]
    pub fn gesture_kind(&self) -> Option<GestureKind> {
        self.session.map(|s| s.kind)
    }

    /// Number of touches currently on the surface.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Current modifier state.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Feed one raw event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y));
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.handle_mouse_down(button);
                } else {
                    self.handle_mouse_up(button);
                }
            }
            InputEvent::Wheel { delta } => {
                let amount = self.binding.apply(delta.normalized());
                self.sample.add_zoom(amount);
            }
            InputEvent::ModifiersChanged { modifiers } => {
                self.modifiers = modifiers;
            }
            InputEvent::Touch { id, phase, x, y } => {
                self.handle_touch(id, phase, Vec2::new(x, y));
            }
            InputEvent::PointerCancel | InputEvent::FocusLost => {
                self.abandon();
            }
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) {
        if !position.is_finite() {
            return;
        }
        self.cursor = Some(position);

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.source, DragSource::Mouse(_)) {
            return;
        }
        if let Some(last) = session.last {
            self.sample.add_drag(position - last);
        }
        session.last = Some(position);
    }

    fn handle_mouse_down(&mut self, button: MouseButton) {
        if self.session.is_some() {
            log::trace!("ignoring {button:?} press during an active drag");
            return;
        }
        let kind = Self::classify(button, self.modifiers);
        log::trace!("drag start: {button:?} -> {kind:?}");
        self.begin(DragSession {
            source: DragSource::Mouse(button),
            kind,
            last: self.cursor,
            spread: None,
        });
    }

    fn handle_mouse_up(&mut self, button: MouseButton) {
        if self
            .session
            .is_some_and(|s| s.source == DragSource::Mouse(button))
        {
            self.session = None;
        }
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        if !position.is_finite() {
            return;
        }
        match phase {
            TouchPhase::Started => {
                if self
                    .session
                    .is_some_and(|s| matches!(s.source, DragSource::Mouse(_)))
                {
                    return;
                }
                if let Some(point) = self.touches.iter_mut().find(|t| t.id == id)
                {
                    point.position = position;
                } else {
                    self.touches.push(TouchPoint { id, position });
                }
                self.restart_touch_session();
            }
            TouchPhase::Moved => {
                let Some(point) = self.touches.iter_mut().find(|t| t.id == id)
                else {
                    return;
                };
                point.position = position;
                self.track_touches();
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let before = self.touches.len();
                self.touches.retain(|t| t.id != id);
                if self.touches.len() == before {
                    return;
                }
                if self.touches.is_empty() {
                    if self
                        .session
                        .is_some_and(|s| s.source == DragSource::Touch)
                    {
                        self.session = None;
                    }
                } else {
                    self.restart_touch_session();
                }
            }
        }
    }

    /// Accumulate centroid motion and pinch spread for the touch session.
    fn track_touches(&mut self) {
        let centroid = self.touch_centroid();
        let spread = self.touch_spread();
        let binding = self.binding;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.source != DragSource::Touch {
            return;
        }
        if let (Some(last), Some(centroid)) = (session.last, centroid) {
            self.sample.add_drag(centroid - last);
        }
        if let (Some(previous), Some(current)) = (session.spread, spread) {
            // Fingers moving apart close in, like scrolling up.
            self.sample
                .add_zoom(binding.apply((previous - current) * PINCH_ZOOM_SCALE));
        }
        session.last = centroid;
        session.spread = spread;
    }

    /// Rebase the touch session on the current set of touches so that a
    /// finger landing or lifting does not read as a jump.
    fn restart_touch_session(&mut self) {
        let kind = if self.touches.len() >= 2 {
            GestureKind::Pan
        } else {
            GestureKind::Orbit
        };
        self.begin(DragSession {
            source: DragSource::Touch,
            kind,
            last: self.touch_centroid(),
            spread: self.touch_spread(),
        });
    }

    fn begin(&mut self, session: DragSession) {
        self.sample.pan_mode = session.kind == GestureKind::Pan;
        self.session = Some(session);
    }

    /// End any drag and forget touches; used on cancel and focus loss.
    fn abandon(&mut self) {
        if self.session.take().is_some() {
            log::warn!("drag interrupted; releasing gesture state");
        }
        self.touches.clear();
    }

    fn touch_centroid(&self) -> Option<Vec2> {
        if self.touches.is_empty() {
            return None;
        }
        let sum: Vec2 = self.touches.iter().map(|t| t.position).sum();
        Some(sum / self.touches.len() as f32)
    }

    fn touch_spread(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b, ..] => Some(a.position.distance(b.position)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::WheelDelta;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: true,
        }
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: false,
        }
    }

    fn cursor(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch { id, phase, x, y }
    }

    #[test]
    fn left_drag_orbits_and_accumulates() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(cursor(10.0, 10.0));
        sampler.handle_event(press(MouseButton::Left));
        sampler.handle_event(cursor(15.0, 12.0));
        sampler.handle_event(cursor(25.0, 8.0));

        assert_eq!(sampler.gesture_kind(), Some(GestureKind::Orbit));
        assert_eq!(sampler.sample().orbit_delta, Vec2::new(15.0, -2.0));
        assert!(!sampler.sample().pan_mode);
    }

    #[test]
    fn motion_without_press_is_not_accumulated() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(cursor(0.0, 0.0));
        sampler.handle_event(cursor(50.0, 50.0));
        assert!(sampler.sample().is_idle());
    }

    #[test]
    fn release_ends_session() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(cursor(0.0, 0.0));
        sampler.handle_event(press(MouseButton::Left));
        sampler.handle_event(release(MouseButton::Left));
        sampler.handle_event(cursor(40.0, 0.0));
        assert!(!sampler.is_dragging());
        assert!(sampler.sample().is_idle());
    }

    #[test]
    fn secondary_button_and_modifiers_pan() {
        assert_eq!(
            GestureSampler::classify(MouseButton::Right, Modifiers::default()),
            GestureKind::Pan
        );
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(
            GestureSampler::classify(MouseButton::Left, ctrl),
            GestureKind::Pan
        );
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert_eq!(
            GestureSampler::classify(MouseButton::Left, shift),
            GestureKind::Pan
        );
        assert_eq!(
            GestureSampler::classify(MouseButton::Left, Modifiers::default()),
            GestureKind::Orbit
        );
    }

    #[test]
    fn shift_held_at_press_sets_pan_mode() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(InputEvent::ModifiersChanged {
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        });
        sampler.handle_event(press(MouseButton::Left));
        assert!(sampler.sample().pan_mode);
    }

    #[test]
    fn first_move_without_known_cursor_sets_origin_only() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(press(MouseButton::Left));
        sampler.handle_event(cursor(300.0, 300.0));
        assert!(sampler.sample().is_idle());
        sampler.handle_event(cursor(310.0, 300.0));
        assert_eq!(sampler.sample().orbit_delta, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn wheel_sign_follows_binding() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(InputEvent::Wheel {
            delta: WheelDelta::Pixels(50.0),
        });
        assert_eq!(sampler.take_sample().zoom_delta, 50.0);

        sampler.set_wheel_binding(WheelBinding::Zoom);
        sampler.handle_event(InputEvent::Wheel {
            delta: WheelDelta::Lines(1.0),
        });
        assert_eq!(sampler.take_sample().zoom_delta, -40.0);
    }

    #[test]
    fn two_touches_pan_and_pinch() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(touch(1, TouchPhase::Started, 100.0, 100.0));
        assert_eq!(sampler.gesture_kind(), Some(GestureKind::Orbit));
        sampler.handle_event(touch(2, TouchPhase::Started, 200.0, 100.0));
        assert_eq!(sampler.gesture_kind(), Some(GestureKind::Pan));
        assert!(sampler.sample().pan_mode);
        assert!(sampler.sample().is_idle(), "second finger must not jump");

        // Spread 100 -> 120 and centroid moves by (+10, 0).
        sampler.handle_event(touch(2, TouchPhase::Moved, 220.0, 100.0));
        let sample = sampler.take_sample();
        assert_eq!(sample.pan_delta, Vec2::new(10.0, 0.0));
        assert_eq!(sample.orbit_delta, Vec2::ZERO);
        assert_eq!(sample.zoom_delta, -20.0 * PINCH_ZOOM_SCALE);
    }

    #[test]
    fn second_finger_keeps_pending_orbit_motion() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(touch(1, TouchPhase::Started, 100.0, 100.0));
        sampler.handle_event(touch(1, TouchPhase::Moved, 160.0, 100.0));
        sampler.handle_event(touch(2, TouchPhase::Started, 260.0, 100.0));
        sampler.handle_event(touch(2, TouchPhase::Moved, 270.0, 100.0));

        let sample = sampler.take_sample();
        assert_eq!(sample.orbit_delta, Vec2::new(60.0, 0.0));
        assert_eq!(sample.pan_delta, Vec2::new(5.0, 0.0));
        assert!(sample.pan_mode);
    }

    #[test]
    fn lifting_a_finger_rebases_without_jump() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(touch(1, TouchPhase::Started, 0.0, 0.0));
        sampler.handle_event(touch(2, TouchPhase::Started, 100.0, 0.0));
        sampler.handle_event(touch(2, TouchPhase::Ended, 100.0, 0.0));
        assert_eq!(sampler.gesture_kind(), Some(GestureKind::Orbit));
        assert!(sampler.sample().is_idle());

        sampler.handle_event(touch(1, TouchPhase::Ended, 0.0, 0.0));
        assert!(!sampler.is_dragging());
        assert_eq!(sampler.active_touches(), 0);
    }

    #[test]
    fn move_for_unknown_touch_is_ignored() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(touch(9, TouchPhase::Moved, 10.0, 10.0));
        assert!(sampler.sample().is_idle());
        assert!(!sampler.is_dragging());
    }

    #[test]
    fn cancel_and_focus_loss_release_stuck_drags() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(cursor(0.0, 0.0));
        sampler.handle_event(press(MouseButton::Left));
        sampler.handle_event(InputEvent::PointerCancel);
        assert!(!sampler.is_dragging());

        sampler.handle_event(touch(1, TouchPhase::Started, 0.0, 0.0));
        sampler.handle_event(InputEvent::FocusLost);
        assert!(!sampler.is_dragging());
        assert_eq!(sampler.active_touches(), 0);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut sampler = GestureSampler::new();
        sampler.handle_event(cursor(0.0, 0.0));
        sampler.handle_event(press(MouseButton::Left));
        sampler.handle_event(cursor(f32::NAN, 3.0));
        sampler.handle_event(cursor(4.0, 3.0));
        assert_eq!(sampler.sample().orbit_delta, Vec2::new(4.0, 3.0));
    }
}
