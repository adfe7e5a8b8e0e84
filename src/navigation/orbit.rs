//! Raw and damped orbit state and the per-frame update.
//!
//! Input only ever moves the *raw* pose, and every such move is clamped
//! on the spot. The *damped* pose trails it through
//! [`SmoothingRates::advance`] and is what the camera actually uses.

use glam::{Vec2, Vec3};

use super::constraint::Constraints;
use super::smoothing::SmoothingRates;
use super::spherical::OrbitPose;
use crate::error::VantageError;
use crate::input::{GestureSample, WheelBinding};
use crate::options::NavigationOptions;

/// Scale from pixels of drag to pan distance, before the zoom adjustment.
const PAN_PIXEL_SCALE: f32 = 0.01;
/// Perspective pan speed per unit of radius.
const PERSPECTIVE_PAN_FACTOR: f32 = 0.1;
/// Orthographic pan speed per unit of inverse zoom.
const ORTHOGRAPHIC_PAN_FACTOR: f32 = 0.5;

/// How the live projection turns orbit radius into on-screen scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomModel {
    /// Perspective: apparent size falls off with distance.
    Distance,
    /// Orthographic: apparent size follows a magnification factor.
    FixedScale {
        /// The projection's current zoom.
        zoom: f32,
    },
}

/// Per-frame parameters for [`OrbitControls::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Time since the previous frame, in milliseconds.
    pub elapsed_ms: f32,
    /// Shorter viewport side in pixels; normalizes drag into angles.
    pub normalizing_length: f32,
    /// Scale model of the projection being driven.
    pub zoom_model: ZoomModel,
}

/// Orbit navigation state: raw pose, damped pose, bounds and tuning.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    raw: OrbitPose,
    damped: OrbitPose,
    home: OrbitPose,
    constraints: Constraints,
    rates: SmoothingRates,
    drag_sensitivity: f32,
    zoom_sensitivity: f32,
    binding: WheelBinding,
}

impl OrbitControls {
    /// Validate `options` and start at the configured initial pose.
    pub fn new(options: &NavigationOptions) -> Result<Self, VantageError> {
        options.validate()?;
        let constraints = Constraints::new(options)?;

        let mut home = OrbitPose {
            radius: options.initial_radius,
            polar: options.initial_polar,
            azimuth: options.initial_azimuth,
            target: Vec3::from_array(options.initial_target),
        };
        constraints.clamp_pose(&mut home);

        Ok(Self {
            raw: home,
            damped: home,
            home,
            constraints,
            rates: SmoothingRates {
                orbit: options.orbit_smoothing_rate,
                pan: options.pan_smoothing_rate,
            },
            drag_sensitivity: options.drag_sensitivity,
            zoom_sensitivity: options.zoom_sensitivity,
            binding: WheelBinding::Dolly,
        })
    }

    /// Where input wants the camera.
    #[must_use]
    pub fn raw(&self) -> &OrbitPose {
        &self.raw
    }

    /// Where the camera actually is.
    #[must_use]
    pub fn damped(&self) -> &OrbitPose {
        &self.damped
    }

    /// The pose [`reset`](Self::reset) returns to.
    #[must_use]
    pub fn home(&self) -> &OrbitPose {
        &self.home
    }

    /// Active bounds.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Current wheel binding.
    #[must_use]
    pub fn wheel_binding(&self) -> WheelBinding {
        self.binding
    }

    /// Switch between dolly and zoom semantics for `zoom_delta`.
    pub fn set_wheel_binding(&mut self, binding: WheelBinding) {
        self.binding = binding;
    }

    /// Whether the damped pose has caught up with the raw pose.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.damped.max_difference(&self.raw) <= epsilon
    }

    /// Pan speed multiplier for the given projection.
    ///
    /// Keeps a pixel of drag moving the pivot by a similar on-screen amount
    /// however far the view is zoomed.
    #[must_use]
    pub fn pan_scale(&self, model: ZoomModel) -> f32 {
        match model {
            ZoomModel::Distance => self.raw.radius * PERSPECTIVE_PAN_FACTOR,
            ZoomModel::FixedScale { zoom } if zoom > 0.0 => {
                zoom.recip() * ORTHOGRAPHIC_PAN_FACTOR
            }
            ZoomModel::FixedScale { .. } => 0.0,
        }
    }

    /// Apply one drained gesture sample and advance smoothing.
    ///
    /// Returns the damped pose the camera should use this frame.
    pub fn update(&mut self, sample: GestureSample, frame: &FrameInput) -> OrbitPose {
        self.apply_zoom(sample.zoom_delta);

        if sample.orbit_delta != Vec2::ZERO {
            self.apply_orbit(sample.orbit_delta, frame.normalizing_length);
        }
        if sample.pan_delta != Vec2::ZERO {
            let scale = self.pan_scale(frame.zoom_model);
            self.apply_pan(sample.pan_delta, scale);
        }

        self.rates
            .advance(&mut self.damped, &self.raw, frame.elapsed_ms);
        self.damped
    }

    fn apply_zoom(&mut self, zoom_delta: f32) {
        if zoom_delta == 0.0 {
            return;
        }
        let amount = zoom_delta * self.zoom_sensitivity;
        let radius = match self.binding {
            WheelBinding::Dolly => self.raw.radius + amount,
            // Orthographic zoom is inversely proportional to radius, so
            // scaling zoom by e^amount scales radius by e^-amount.
            WheelBinding::Zoom => self.raw.radius * (-amount).exp(),
        };
        if radius.is_finite() {
            self.raw.radius = self.constraints.clamp_radius(radius);
        }
    }

    fn apply_pan(&mut self, delta: Vec2, scale: f32) {
        let orientation = self.damped.orientation();
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;

        // Screen y grows downward; dragging moves the scene with the
        // pointer, so the pivot moves the other way.
        let offset =
            (right * -delta.x + up * delta.y) * PAN_PIXEL_SCALE * scale;
        if offset.is_finite() {
            self.raw.target = self.constraints.clamp_target(self.raw.target + offset);
        }
    }

    fn apply_orbit(&mut self, delta: Vec2, normalizing_length: f32) {
        if !normalizing_length.is_finite() || normalizing_length <= 0.0 {
            return;
        }
        let scale = self.drag_sensitivity / normalizing_length;
        self.raw.azimuth = self
            .constraints
            .clamp_azimuth(self.raw.azimuth - delta.x * scale);
        self.raw.polar =
            self.constraints.clamp_polar(self.raw.polar - delta.y * scale);
    }

    /// Send the raw pose back home; the damped pose glides after it.
    pub fn reset(&mut self) {
        self.raw = self.home;
    }

    /// Aim the raw pose at `target` from `radius`, keeping the angles.
    pub fn look_at(&mut self, target: Vec3, radius: f32) {
        self.raw.target = self.constraints.clamp_target(target);
        if radius.is_finite() {
            self.raw.radius = self.constraints.clamp_radius(radius);
        }
    }

    /// Set the damped radius, bypassing smoothing. The raw radius keeps
    /// any zoom still in flight.
    ///
    /// Used when the projection changes so the new camera starts exactly
    /// at the equivalent distance.
    pub fn set_damped_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.damped.radius = self.constraints.clamp_radius(radius);
        }
    }

    /// Move both poses to `pose` (clamped), bypassing smoothing.
    pub fn jump_to(&mut self, mut pose: OrbitPose) {
        self.constraints.clamp_pose(&mut pose);
        self.raw = pose;
        self.damped = pose;
    }
}
