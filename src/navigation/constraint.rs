//! Closed-interval bounds on the orbit pose.
//!
//! Bounds are validated once, when [`Constraints`] is built from
//! [`NavigationOptions`]. An inverted or non-finite interval is rejected
//! there; after that every clamp is infallible.

use std::f32::consts::PI;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::spherical::OrbitPose;
use crate::error::VantageError;
use crate::options::NavigationOptions;

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    /// Inclusive lower bound.
    pub min: f32,
    /// Inclusive upper bound.
    pub max: f32,
}

impl Bounds {
    /// Create a new interval. Not validated; see [`Bounds::validate`].
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Reject inverted or non-finite intervals.
    pub fn validate(self, name: &'static str) -> Result<Self, VantageError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max
        {
            return Err(VantageError::InvalidBounds {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }

    /// Clamp `value` into the interval.
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Whether `value` lies inside the interval.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Independent per-axis bounds for the orbit pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TargetBounds {
    /// Bounds on the pivot's x coordinate.
    pub x: Bounds,
    /// Bounds on the pivot's y coordinate.
    pub y: Bounds,
    /// Bounds on the pivot's z coordinate.
    pub z: Bounds,
}

impl TargetBounds {
    /// The same interval on all three axes.
    #[must_use]
    pub const fn uniform(bounds: Bounds) -> Self {
        Self {
            x: bounds,
            y: bounds,
            z: bounds,
        }
    }

    /// Clamp each axis of `point` independently.
    #[must_use]
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            self.x.clamp(point.x),
            self.y.clamp(point.y),
            self.z.clamp(point.z),
        )
    }

    /// Whether every axis of `point` is in bounds.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        self.x.contains(point.x)
            && self.y.contains(point.y)
            && self.z.contains(point.z)
    }
}

/// Validated bounds for every clamped quantity of an [`OrbitPose`].
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    radius: Bounds,
    polar: Bounds,
    /// `None` means a free full turn.
    azimuth: Option<Bounds>,
    target: TargetBounds,
}

impl Constraints {
    /// Validate the ranges in `options`.
    ///
    /// Fails on any inverted interval, a radius minimum that is not
    /// strictly positive, or a polar range reaching outside `[0, π]`.
    pub fn new(options: &NavigationOptions) -> Result<Self, VantageError> {
        let radius = options.radius_range.validate("radius_range")?;
        if radius.min <= 0.0 {
            return Err(VantageError::InvalidOption {
                name: "radius_range",
                reason: format!("minimum must be positive, got {}", radius.min),
            });
        }

        let polar = options.polar_range.validate("polar_range")?;
        if polar.min < 0.0 || polar.max > PI {
            return Err(VantageError::InvalidOption {
                name: "polar_range",
                reason: format!(
                    "[{}, {}] reaches outside [0, π]",
                    polar.min, polar.max
                ),
            });
        }

        let azimuth = options
            .azimuth_range
            .map(|b| b.validate("azimuth_range"))
            .transpose()?;

        let target = TargetBounds {
            x: options.target_range.x.validate("target_range.x")?,
            y: options.target_range.y.validate("target_range.y")?,
            z: options.target_range.z.validate("target_range.z")?,
        };

        Ok(Self {
            radius,
            polar,
            azimuth,
            target,
        })
    }

    /// Radius interval.
    #[must_use]
    pub fn radius(&self) -> Bounds {
        self.radius
    }

    /// Polar-angle interval.
    #[must_use]
    pub fn polar(&self) -> Bounds {
        self.polar
    }

    /// Azimuth interval, if azimuth is constrained.
    #[must_use]
    pub fn azimuth(&self) -> Option<Bounds> {
        self.azimuth
    }

    /// Pivot bounds.
    #[must_use]
    pub fn target(&self) -> TargetBounds {
        self.target
    }

    /// Clamp a radius.
    #[must_use]
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        self.radius.clamp(radius)
    }

    /// Clamp a polar angle.
    #[must_use]
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        self.polar.clamp(polar)
    }

    /// Clamp an azimuth angle. Unconstrained azimuth passes through.
    #[must_use]
    pub fn clamp_azimuth(&self, azimuth: f32) -> f32 {
        self.azimuth.map_or(azimuth, |b| b.clamp(azimuth))
    }

    /// Clamp a pivot position.
    #[must_use]
    pub fn clamp_target(&self, target: Vec3) -> Vec3 {
        self.target.clamp(target)
    }

    /// Clamp every component of `pose` in place.
    pub fn clamp_pose(&self, pose: &mut OrbitPose) {
        pose.radius = self.clamp_radius(pose.radius);
        pose.polar = self.clamp_polar(pose.polar);
        pose.azimuth = self.clamp_azimuth(pose.azimuth);
        pose.target = self.clamp_target(pose.target);
    }

    /// Whether every component of `pose` is within bounds.
    #[must_use]
    pub fn admits(&self, pose: &OrbitPose) -> bool {
        self.radius.contains(pose.radius)
            && self.polar.contains(pose.polar)
            && self.azimuth.is_none_or(|b| b.contains(pose.azimuth))
            && self.target.contains(pose.target)
    }
}
