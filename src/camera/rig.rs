//! The camera facade handed to the application.
//!
//! A [`CameraRig`] ties together the gesture sampler, the orbit controls,
//! the projection pair and the command queue. Everything runs on one
//! thread: input handlers only feed the sampler, and
//! [`CameraRig::update`] drains it once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::core::CameraUniform;
use super::pair::{ProjectionCount, ProjectionMode, ProjectionPair};
use super::projection::ActiveCamera;
use crate::command::{CommandQueue, ViewAction, ViewCommand};
use crate::error::VantageError;
use crate::input::{GestureSampler, InputEvent, Registry, Subscription};
use crate::navigation::{FrameInput, OrbitControls};
use crate::options::{KeybindingOptions, NavigationOptions, Options};
use crate::scene::{Aabb, SceneNode};

/// Extra room around framed bounds.
const FRAME_PADDING: f32 = 1.2;

/// Orbit navigation over a perspective/orthographic projection pair.
///
/// # Usage
///
/// ```ignore
/// let mut rig = CameraRig::new(1280, 720, &Options::default())?;
/// rig.attach_controls()?;
///
/// // In the event loop:
/// rig.handle_input(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
///
/// // Once per frame:
/// rig.update(clock.tick())?;
/// renderer.render(&rig.active_camera(), &scene);
/// ```
#[derive(Debug)]
pub struct CameraRig {
    projections: ProjectionPair,
    controls: Option<OrbitControls>,
    navigation: NavigationOptions,
    keybindings: KeybindingOptions,
    sampler: Rc<RefCell<GestureSampler>>,
    commands: CommandQueue,
    mode_changed: Registry<ProjectionMode>,
    scene_bounds: Option<Aabb>,
}

impl CameraRig {
    /// Validate `options` and build the projections for a `width` ×
    /// `height` viewport. Controls are attached separately.
    pub fn new(
        width: u32,
        height: u32,
        options: &Options,
    ) -> Result<Self, VantageError> {
        options.validate()?;
        let projections = ProjectionPair::new(width, height, &options.projection)?;

        let mut sampler = GestureSampler::new();
        sampler.set_wheel_binding(projections.mode().wheel_binding());

        Ok(Self {
            projections,
            controls: None,
            navigation: options.navigation.clone(),
            keybindings: options.keybindings.clone(),
            sampler: Rc::new(RefCell::new(sampler)),
            commands: CommandQueue::new(),
            mode_changed: Registry::new(),
            scene_bounds: None,
        })
    }

    /// Create the orbit controls and place the live camera at the home
    /// pose. Calling it again keeps the existing controls.
    pub fn attach_controls(&mut self) -> Result<(), VantageError> {
        if self.controls.is_some() {
            log::debug!("controls already attached");
            return Ok(());
        }
        let mut controls = OrbitControls::new(&self.navigation)?;
        controls.set_wheel_binding(self.projections.mode().wheel_binding());
        self.projections.apply_pose(controls.damped());
        self.controls = Some(controls);
        log::debug!("controls attached in {:?} mode", self.projections.mode());
        Ok(())
    }

    /// Whether [`attach_controls`](Self::attach_controls) has run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.controls.is_some()
    }

    /// The orbit controls, once attached.
    #[must_use]
    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    /// The projection pair.
    #[must_use]
    pub fn projections(&self) -> &ProjectionPair {
        &self.projections
    }

    /// Live projection mode.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        self.projections.mode()
    }

    /// Whether the orthographic camera exists.
    #[must_use]
    pub fn projection_count(&self) -> ProjectionCount {
        self.projections.count()
    }

    /// Borrow the live camera for rendering.
    #[must_use]
    pub fn active_camera(&self) -> ActiveCamera<'_> {
        self.projections.active()
    }

    /// GPU uniform for the live camera.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        self.projections.active().uniform()
    }

    /// Shared handle to the gesture sampler, for surfaces that feed it
    /// directly.
    #[must_use]
    pub fn sampler(&self) -> Rc<RefCell<GestureSampler>> {
        Rc::clone(&self.sampler)
    }

    /// Shared handle to the command queue.
    #[must_use]
    pub fn commands(&self) -> CommandQueue {
        self.commands.clone()
    }

    /// Registry notified after every projection change.
    #[must_use]
    pub fn mode_changes(&self) -> Registry<ProjectionMode> {
        self.mode_changed.clone()
    }

    /// Call `handler` with the new mode after every projection change.
    pub fn on_mode_change(
        &self,
        handler: impl FnMut(&ProjectionMode) + 'static,
    ) -> Subscription {
        self.mode_changed.subscribe(handler)
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Feed a raw input event to the sampler.
    pub fn handle_input(&self, event: InputEvent) {
        self.sampler.borrow_mut().handle_event(event);
    }

    /// Look up a key press and queue the bound command.
    #[must_use = "the bound action, if any"]
    pub fn handle_key(&self, key: &str) -> Option<ViewAction> {
        let action = self.keybindings.lookup(key)?;
        log::trace!("key {key} -> {action:?}");
        self.commands.push(action.command());
        Some(action)
    }

    // ── Frame ───────────────────────────────────────────────────────────

    /// Advance one frame.
    ///
    /// Runs queued commands, drains the gesture sample into the orbit,
    /// advances smoothing and places the live camera. A failed command
    /// does not stop the frame; the first failure is returned after it.
    pub fn update(&mut self, elapsed_ms: f32) -> Result<(), VantageError> {
        if self.controls.is_none() {
            return Err(VantageError::NotInitialized { operation: "update" });
        }
        let mut failed = None;
        while let Some(command) = self.commands.pop() {
            if let Err(e) = self.execute(command) {
                log::warn!("{command:?} failed: {e}");
                if failed.is_none() {
                    failed = Some(e);
                }
            }
        }

        let sample = self.sampler.borrow_mut().take_sample();
        let frame = FrameInput {
            elapsed_ms,
            normalizing_length: self.projections.normalizing_length(),
            zoom_model: self.projections.zoom_model(),
        };
        let controls = self
            .controls
            .as_mut()
            .ok_or(VantageError::NotInitialized { operation: "update" })?;
        let pose = controls.update(sample, &frame);
        self.projections.apply_pose(&pose);
        failed.map_or(Ok(()), Err)
    }

    /// Run one command immediately.
    pub fn execute(&mut self, command: ViewCommand) -> Result<(), VantageError> {
        match command {
            ViewCommand::SwitchProjection(mode) => self.switch_to(mode),
            ViewCommand::ToggleProjection => self.toggle_projection(),
            ViewCommand::ResetView => self.reset_view(),
            ViewCommand::FrameScene => {
                if let Some(bounds) = self.scene_bounds {
                    self.frame_bounds(&bounds)
                } else {
                    log::debug!("frame requested with no scene bounds");
                    Ok(())
                }
            }
        }
    }

    /// Resize the viewport. Zero-sized viewports (minimized windows) are
    /// ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.projections.resize(width, height) {
            log::debug!("viewport resized to {width}x{height}");
        } else {
            log::warn!("ignoring resize to {width}x{height}");
        }
    }

    // ── Projection ──────────────────────────────────────────────────────

    /// Make `mode` the live projection, carrying the framing across.
    ///
    /// A no-op if `mode` is already live.
    pub fn switch_to(&mut self, mode: ProjectionMode) -> Result<(), VantageError> {
        let controls = self.controls.as_mut().ok_or(
            VantageError::NotInitialized {
                operation: "switch_to",
            },
        )?;
        let previous = self.projections.mode();
        if previous == mode {
            return Ok(());
        }

        let radius = controls.damped().radius;
        if let Some(distance) = self.projections.switch_to(mode, radius)? {
            controls.set_damped_radius(distance);
        }
        let binding = mode.wheel_binding();
        controls.set_wheel_binding(binding);
        self.sampler.borrow_mut().set_wheel_binding(binding);
        self.projections.apply_pose(controls.damped());

        log::debug!("projection {previous:?} -> {mode:?}");
        self.mode_changed.emit(&mode);
        Ok(())
    }

    /// Flip between perspective and orthographic.
    pub fn toggle_projection(&mut self) -> Result<(), VantageError> {
        self.switch_to(self.projections.mode().toggled())
    }

    // ── Pose ────────────────────────────────────────────────────────────

    /// Glide back to the configured home pose.
    pub fn reset_view(&mut self) -> Result<(), VantageError> {
        let controls = self.controls.as_mut().ok_or(
            VantageError::NotInitialized {
                operation: "reset_view",
            },
        )?;
        controls.reset();
        log::debug!("view reset");
        Ok(())
    }

    /// Remember the scene's bounds for [`ViewCommand::FrameScene`] and
    /// aim at them.
    pub fn frame_scene(&mut self, scene: &SceneNode) -> Result<(), VantageError> {
        self.scene_bounds = scene.world_bounds();
        match self.scene_bounds {
            Some(bounds) => self.frame_bounds(&bounds),
            None => {
                log::debug!("scene {:?} has nothing to frame", scene.name());
                Ok(())
            }
        }
    }

    /// Aim at the centroid of `points` from far enough to see them all.
    pub fn frame_points(&mut self, points: &[Vec3]) -> Result<(), VantageError> {
        match Aabb::from_points(points) {
            Some(bounds) => self.frame_bounds(&bounds),
            None => Ok(()),
        }
    }

    fn frame_bounds(&mut self, bounds: &Aabb) -> Result<(), VantageError> {
        let controls = self.controls.as_mut().ok_or(
            VantageError::NotInitialized {
                operation: "frame_scene",
            },
        )?;
        let distance =
            self.projections.perspective().fit_distance(bounds.bounding_radius())
                * FRAME_PADDING;
        controls.look_at(bounds.center(), distance);
        log::debug!("framing {bounds:?} from {distance:.2}");
        Ok(())
    }
}
