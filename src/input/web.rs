//! Binds a DOM element's pointer, touch and wheel events to a
//! [`GestureSampler`].
//!
//! Down, wheel and context-menu listeners live as long as the
//! [`DomSurface`]. Move, up and cancel listeners are added when a drag
//! starts and removed when it ends, on every exit path: release, cancel
//! and window blur. Dropping the surface removes whatever is still
//! registered.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent,
    PointerEvent, TouchEvent, WheelEvent,
};

use super::event::{InputEvent, Modifiers, MouseButton, TouchPhase, WheelDelta};
use super::sampler::GestureSampler;
use super::subscription::Subscription;
use crate::error::VantageError;

const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;

type SharedSampler = Rc<RefCell<GestureSampler>>;
type Slot = Rc<RefCell<DragListeners>>;

/// Listeners that exist only while a drag is in progress.
#[derive(Default)]
struct DragListeners {
    active: Vec<Subscription>,
}

impl DragListeners {
    fn is_active(&self) -> bool {
        !self.active.is_empty()
    }
}

/// Register the drag's listeners unless a drag already holds them.
fn start_drag(
    slot: &Slot,
    register: impl FnOnce() -> Result<Vec<Subscription>, VantageError>,
) {
    if slot.borrow().is_active() {
        return;
    }
    match register() {
        Ok(listeners) => slot.borrow_mut().active = listeners,
        Err(e) => log::error!("{e}"),
    }
}

/// Remove the drag's listeners. Safe from inside one of them:
/// wasm-bindgen frees a running closure once it returns.
fn finish_drag(slot: &Slot) {
    let listeners = std::mem::take(&mut slot.borrow_mut().active);
    drop(listeners);
}

/// Register `handler` for `kind` on `target` as a non-passive listener,
/// so `preventDefault` works. The listener is removed when the returned
/// handle is dropped.
fn listen(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Subscription, VantageError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| VantageError::Surface(format!("{kind} listener: {e:?}")))?;

    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target
            .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
        drop(callback);
    }))
}

fn modifiers_of(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

fn button_of(event: &MouseEvent) -> Option<MouseButton> {
    match event.button() {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// Pointer events from touch screens are handled through touch events.
fn is_touch_pointer(event: &PointerEvent) -> bool {
    event.pointer_type() == "touch"
}

/// An element wired to a gesture sampler.
pub struct DomSurface {
    sampler: SharedSampler,
    listeners: Vec<Subscription>,
    pointer_drag: Slot,
    touch_drag: Slot,
}

impl DomSurface {
    /// Attach listeners to `element`.
    ///
    /// Also sets `touch-action: none` so the browser does not scroll or
    /// zoom the page under a touch gesture.
    pub fn attach(
        element: &HtmlElement,
        sampler: SharedSampler,
    ) -> Result<Self, VantageError> {
        element
            .style()
            .set_property("touch-action", "none")
            .map_err(|e| VantageError::Surface(format!("touch-action: {e:?}")))?;

        let mut surface = Self {
            sampler,
            listeners: Vec::new(),
            pointer_drag: Rc::default(),
            touch_drag: Rc::default(),
        };
        let target: &EventTarget = element.as_ref();

        let mut listeners = vec![
            surface.pointer_down(element)?,
            surface.touch_start(element)?,
            surface.wheel(target)?,
            listen(target, "contextmenu", |event| event.prevent_default())?,
        ];
        if let Some(window) = web_sys::window() {
            listeners.push(surface.blur(window.as_ref())?);
        }
        surface.listeners = listeners;

        log::debug!("surface attached with {} listeners", surface.listeners.len());
        Ok(surface)
    }

    /// [`attach`](Self::attach) to the element with the given `id`.
    ///
    /// Fails if the document has no such element or it is not an HTML
    /// element.
    pub fn attach_by_id(
        id: &str,
        sampler: SharedSampler,
    ) -> Result<Self, VantageError> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .ok_or_else(|| VantageError::Surface(format!("no element with id {id:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| VantageError::Surface(format!("#{id} is not an HTML element")))?;
        Self::attach(&element, sampler)
    }

    /// Whether a pointer or touch drag currently has listeners.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.pointer_drag.borrow().is_active() || self.touch_drag.borrow().is_active()
    }

    fn pointer_down(&self, element: &HtmlElement) -> Result<Subscription, VantageError> {
        let sampler = Rc::clone(&self.sampler);
        let drag = Rc::clone(&self.pointer_drag);
        let surface = element.clone();
        listen(element.as_ref(), "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if is_touch_pointer(event) {
                return;
            }
            let Some(button) = button_of(event) else {
                return;
            };
            event.prevent_default();
            let _ = surface.set_pointer_capture(event.pointer_id());

            {
                let mut sampler = sampler.borrow_mut();
                sampler.handle_event(InputEvent::ModifiersChanged {
                    modifiers: modifiers_of(event),
                });
                sampler.handle_event(InputEvent::CursorMoved {
                    x: event.offset_x() as f32,
                    y: event.offset_y() as f32,
                });
                sampler.handle_event(InputEvent::MouseButton {
                    button,
                    pressed: true,
                });
            }

            // Capture keeps up and cancel on this element even when the
            // pointer leaves it.
            start_drag(&drag, || {
                let target: &EventTarget = surface.as_ref();
                Ok(vec![
                    pointer_move(target, &sampler)?,
                    pointer_end(target, "pointerup", false, &sampler, &drag)?,
                    pointer_end(target, "pointercancel", true, &sampler, &drag)?,
                ])
            });
        })
    }

    fn touch_start(&self, element: &HtmlElement) -> Result<Subscription, VantageError> {
        let sampler = Rc::clone(&self.sampler);
        let drag = Rc::clone(&self.touch_drag);
        let surface = element.clone();
        listen(element.as_ref(), "touchstart", move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            event.prevent_default();
            feed_touches(&sampler, &surface, event, TouchPhase::Started);

            start_drag(&drag, || {
                Ok(vec![
                    touch_move(&surface, &sampler)?,
                    touch_end(&surface, "touchend", TouchPhase::Ended, &sampler, &drag)?,
                    touch_end(
                        &surface,
                        "touchcancel",
                        TouchPhase::Cancelled,
                        &sampler,
                        &drag,
                    )?,
                ])
            });
        })
    }

    fn wheel(&self, target: &EventTarget) -> Result<Subscription, VantageError> {
        let sampler = Rc::clone(&self.sampler);
        listen(target, "wheel", move |event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let amount = event.delta_y() as f32;
            let delta = match event.delta_mode() {
                DOM_DELTA_LINE => WheelDelta::Lines(amount),
                DOM_DELTA_PAGE => WheelDelta::Pages(amount),
                _ => WheelDelta::Pixels(amount),
            };
            sampler.borrow_mut().handle_event(InputEvent::Wheel { delta });
        })
    }

    fn blur(&self, target: &EventTarget) -> Result<Subscription, VantageError> {
        let sampler = Rc::clone(&self.sampler);
        let pointer_drag = Rc::clone(&self.pointer_drag);
        let touch_drag = Rc::clone(&self.touch_drag);
        listen(target, "blur", move |_| {
            sampler.borrow_mut().handle_event(InputEvent::FocusLost);
            finish_drag(&pointer_drag);
            finish_drag(&touch_drag);
        })
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        finish_drag(&self.pointer_drag);
        finish_drag(&self.touch_drag);
        log::debug!("surface detached");
    }
}

impl std::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomSurface")
            .field("listeners", &self.listeners.len())
            .field("tracking", &self.is_tracking())
            .finish_non_exhaustive()
    }
}

// ── Per-drag listeners ───────────────────────────────────────────────────

fn pointer_move(
    target: &EventTarget,
    sampler: &SharedSampler,
) -> Result<Subscription, VantageError> {
    let sampler = Rc::clone(sampler);
    listen(target, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        sampler.borrow_mut().handle_event(InputEvent::CursorMoved {
            x: event.offset_x() as f32,
            y: event.offset_y() as f32,
        });
    })
}

fn pointer_end(
    target: &EventTarget,
    kind: &'static str,
    cancelled: bool,
    sampler: &SharedSampler,
    drag: &Slot,
) -> Result<Subscription, VantageError> {
    let sampler = Rc::clone(sampler);
    let drag = Rc::clone(drag);
    listen(target, kind, move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        if is_touch_pointer(event) {
            return;
        }
        let input = if cancelled {
            InputEvent::PointerCancel
        } else if let Some(button) = button_of(event) {
            InputEvent::MouseButton {
                button,
                pressed: false,
            }
        } else {
            return;
        };
        let dragging = {
            let mut sampler = sampler.borrow_mut();
            sampler.handle_event(input);
            sampler.is_dragging()
        };
        if !dragging {
            finish_drag(&drag);
        }
    })
}

fn touch_move(
    element: &HtmlElement,
    sampler: &SharedSampler,
) -> Result<Subscription, VantageError> {
    let sampler = Rc::clone(sampler);
    let surface = element.clone();
    listen(element.as_ref(), "touchmove", move |event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        event.prevent_default();
        feed_touches(&sampler, &surface, event, TouchPhase::Moved);
    })
}

fn touch_end(
    element: &HtmlElement,
    kind: &'static str,
    phase: TouchPhase,
    sampler: &SharedSampler,
    drag: &Slot,
) -> Result<Subscription, VantageError> {
    let sampler = Rc::clone(sampler);
    let drag = Rc::clone(drag);
    let surface = element.clone();
    listen(element.as_ref(), kind, move |event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        feed_touches(&sampler, &surface, event, phase);
        if sampler.borrow().active_touches() == 0 {
            finish_drag(&drag);
        }
    })
}

/// Forward every changed touch of `event`, in element-local pixels.
fn feed_touches(
    sampler: &SharedSampler,
    element: &HtmlElement,
    event: &TouchEvent,
    phase: TouchPhase,
) {
    let rect = element.get_bounding_client_rect();
    let touches = event.changed_touches();
    let mut sampler = sampler.borrow_mut();
    for index in 0..touches.length() {
        let Some(touch) = touches.get(index) else {
            continue;
        };
        sampler.handle_event(InputEvent::Touch {
            id: u64::from(touch.identifier().unsigned_abs()),
            phase,
            x: (f64::from(touch.client_x()) - rect.left()) as f32,
            y: (f64::from(touch.client_y()) - rect.top()) as f32,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counted(released: &Rc<Cell<u32>>) -> Subscription {
        let released = Rc::clone(released);
        Subscription::new(move || released.set(released.get() + 1))
    }

    #[test]
    fn drag_listeners_live_for_one_drag() {
        let slot: Slot = Rc::default();
        let released = Rc::new(Cell::new(0));
        let registrations = Cell::new(0);
        let register = || {
            registrations.set(registrations.get() + 1);
            Ok(vec![counted(&released), counted(&released), counted(&released)])
        };

        start_drag(&slot, register);
        assert!(slot.borrow().is_active());

        // A second button during the drag keeps the first set.
        start_drag(&slot, register);
        assert_eq!(registrations.get(), 1);
        assert_eq!(released.get(), 0);

        finish_drag(&slot);
        assert_eq!(released.get(), 3);
        assert!(!slot.borrow().is_active());

        start_drag(&slot, register);
        assert_eq!(registrations.get(), 2);
    }

    #[test]
    fn failed_registration_leaves_no_listeners() {
        let slot: Slot = Rc::default();
        let released = Rc::new(Cell::new(0));
        start_drag(&slot, || {
            let _move = counted(&released);
            Err(VantageError::Surface("pointerup listener".into()))
        });
        assert_eq!(released.get(), 1);
        assert!(!slot.borrow().is_active());
    }
}
