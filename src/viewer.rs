//! Standalone navigation window backed by winit.
//!
//! The viewer owns a [`CameraRig`], forwards window input to it and hands
//! the live camera to a user-supplied [`Renderer`] every frame.
//!
//! ```no_run
//! # use vantage::{Aabb, SceneNode, Viewer};
//! # use glam::Vec3;
//! let scene = SceneNode::mesh("cube", Aabb::new(Vec3::splat(-1.0), Vec3::ONE));
//! Viewer::builder()
//!     .with_scene(scene)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    camera::{ActiveCamera, CameraRig},
    error::VantageError,
    input::{InputEvent, Subscription},
    options::Options,
    scene::SceneNode,
    util::FrameClock,
};

/// Draws the scene from the live camera.
pub trait Renderer {
    /// Called once per frame after the rig has been updated.
    fn render(&mut self, camera: &ActiveCamera<'_>, scene: &SceneNode);

    /// Called when the window's drawable size changes.
    fn resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    scene: Option<SceneNode>,
    renderer: Option<Box<dyn Renderer>>,
    target_fps: u32,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Vantage", empty
    /// scene, default options, no frame limit).
    fn new() -> Self {
        Self {
            options: None,
            title: "Vantage".into(),
            scene: None,
            renderer: None,
            target_fps: 0,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Scene to frame on startup and pass to the renderer.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneNode) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Renderer invoked every frame.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Cap the frame rate (0 = unlimited).
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            scene: self
                .scene
                .unwrap_or_else(|| SceneNode::group("scene", Vec::new())),
            renderer: self.renderer,
            target_fps: self.target_fps,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that orbits a scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    scene: SceneNode,
    renderer: Option<Box<dyn Renderer>>,
    target_fps: u32,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), VantageError> {
        self.options.validate()?;

        let event_loop =
            EventLoop::new().map_err(|e| VantageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            session: None,
            clock: FrameClock::new(self.target_fps),
            options: self.options,
            title: self.title,
            scene: self.scene,
            renderer: self.renderer,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VantageError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// A rig bound to an open window.
struct Session {
    rig: CameraRig,
    /// Keeps the title in step with the live projection.
    _title_updates: Subscription,
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    session: Option<Session>,
    clock: FrameClock,
    options: Options,
    title: String,
    scene: SceneNode,
    renderer: Option<Box<dyn Renderer>>,
}

impl ViewerApp {
    fn start_session(&mut self, window: &Arc<Window>) -> Result<Session, VantageError> {
        let inner = window.inner_size();
        let mut rig = CameraRig::new(inner.width, inner.height, &self.options)?;
        rig.attach_controls()?;
        rig.frame_scene(&self.scene)?;

        let title = self.title.clone();
        let handle = Arc::clone(window);
        let title_updates = rig.on_mode_change(move |mode| {
            handle.set_title(&format!("{title} ({mode:?})"));
        });

        if let Some(renderer) = &mut self.renderer {
            renderer.resize(inner.width, inner.height);
        }
        log::info!(
            "viewer ready: {}x{} {:?}, {} drawable node(s)",
            inner.width,
            inner.height,
            rig.mode(),
            self.scene.draw_count()
        );
        Ok(Session {
            rig,
            _title_updates: title_updates,
        })
    }

    fn redraw(&mut self) {
        let Some(Session { rig, .. }) = &mut self.session else {
            return;
        };
        if !self.clock.should_render() {
            return;
        }
        let elapsed_ms = self.clock.tick();
        if let Err(e) = rig.update(elapsed_ms) {
            log::error!("camera update failed: {e}");
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&rig.active_camera(), &self.scene);
        }
    }
}

/// Translate a winit window event into a rig input event.
fn input_event(event: &WindowEvent) -> Option<InputEvent> {
    let input = match event {
        WindowEvent::CursorMoved { position, .. } => InputEvent::CursorMoved {
            x: position.x as f32,
            y: position.y as f32,
        },
        WindowEvent::MouseInput { state, button, .. } => {
            if !matches!(
                button,
                winit::event::MouseButton::Left
                    | winit::event::MouseButton::Right
                    | winit::event::MouseButton::Middle
            ) {
                return None;
            }
            InputEvent::MouseButton {
                button: (*button).into(),
                pressed: *state == ElementState::Pressed,
            }
        }
        WindowEvent::MouseWheel { delta, .. } => InputEvent::Wheel {
            delta: (*delta).into(),
        },
        WindowEvent::ModifiersChanged(modifiers) => InputEvent::ModifiersChanged {
            modifiers: modifiers.state().into(),
        },
        WindowEvent::Touch(touch) => InputEvent::Touch {
            id: touch.id,
            phase: touch.phase.into(),
            x: touch.location.x as f32,
            y: touch.location.y as f32,
        },
        WindowEvent::Focused(false) => InputEvent::FocusLost,
        _ => return None,
    };
    Some(input)
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.start_session(&window) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::error!("Failed to initialize camera: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and rig must be initialised.
        let (Some(window), Some(Session { rig, .. })) =
            (&self.window, &mut self.session)
        else {
            return;
        };

        if let Some(input) = input_event(&event) {
            rig.handle_input(input);
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                rig.on_resize(size.width, size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = format!("{code:?}");
                    if let Some(action) = rig.handle_key(&key) {
                        log::debug!("{key} -> {action:?}");
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let window = Arc::clone(window);
                self.redraw();
                window.request_redraw();
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, WheelDelta};

    #[test]
    fn focus_loss_becomes_input() {
        assert_eq!(
            input_event(&WindowEvent::Focused(false)),
            Some(InputEvent::FocusLost)
        );
        assert_eq!(input_event(&WindowEvent::Focused(true)), None);
    }

    fn device_id() -> winit::event::DeviceId {
        // SAFETY: the id is only compared, never passed to the platform.
        unsafe { winit::event::DeviceId::dummy() }
    }

    #[test]
    fn extra_mouse_buttons_are_ignored() {
        let device_id = device_id();
        let back = WindowEvent::MouseInput {
            device_id,
            state: ElementState::Pressed,
            button: winit::event::MouseButton::Back,
        };
        assert_eq!(input_event(&back), None);

        let right = WindowEvent::MouseInput {
            device_id,
            state: ElementState::Released,
            button: winit::event::MouseButton::Right,
        };
        assert_eq!(
            input_event(&right),
            Some(InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: false,
            })
        );
    }

    #[test]
    fn wheel_up_moves_camera_in() {
        let wheel = WindowEvent::MouseWheel {
            device_id: device_id(),
            delta: winit::event::MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: winit::event::TouchPhase::Moved,
        };
        assert_eq!(
            input_event(&wheel),
            Some(InputEvent::Wheel {
                delta: WheelDelta::Lines(-1.0)
            })
        );
    }

    #[test]
    fn builder_defaults_to_empty_scene() {
        let viewer = Viewer::builder().with_title("t").build();
        assert_eq!(viewer.title, "t");
        assert_eq!(viewer.scene.draw_count(), 0);
        assert!(viewer.renderer.is_none());
    }
}
