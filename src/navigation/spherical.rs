use glam::{Mat3, Quat, Vec3};

/// Camera placement relative to a pivot, in spherical coordinates.
///
/// Y is up. `polar` is measured from +Y, `azimuth` around +Y starting at
/// +Z, matching the usual right-handed viewer convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    /// Distance from pivot to camera.
    pub radius: f32,
    /// Angle from the vertical axis, in radians.
    pub polar: f32,
    /// Angle around the vertical axis, in radians.
    pub azimuth: f32,
    /// The pivot the camera looks at.
    pub target: Vec3,
}

impl OrbitPose {
    /// Offset of the camera from the pivot.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_azimuth,
        )
    }

    /// Camera position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// Rotation that points the camera's -Z axis at the pivot with +Y up.
    ///
    /// At the poles, where the view direction is parallel to +Y, the right
    /// vector falls back to the one implied by the azimuth so the camera
    /// does not spin.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        let forward = (-self.offset()).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Quat::IDENTITY;
        }

        let mut right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-12 {
            let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
            right = Vec3::new(cos_azimuth, 0.0, -sin_azimuth);
        }
        let right = right.normalize();
        let up = right.cross(forward);

        Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
    }

    /// Largest absolute component difference between two poses.
    ///
    /// Used as the convergence metric for smoothing.
    #[must_use]
    pub fn max_difference(&self, other: &Self) -> f32 {
        let target = (self.target - other.target).abs().max_element();
        (self.radius - other.radius)
            .abs()
            .max((self.polar - other.polar).abs())
            .max((self.azimuth - other.azimuth).abs())
            .max(target)
    }
}

impl Default for OrbitPose {
    fn default() -> Self {
        Self {
            radius: 1.0,
            polar: std::f32::consts::FRAC_PI_2,
            azimuth: 0.0,
            target: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn equator_at_zero_azimuth_lies_on_positive_z() {
        let pose = OrbitPose {
            radius: 3.0,
            polar: FRAC_PI_2,
            azimuth: 0.0,
            target: Vec3::new(1.0, 2.0, 3.0),
        };
        let eye = pose.eye();
        assert!((eye - Vec3::new(1.0, 2.0, 6.0)).length() < EPS, "{eye}");
    }

    #[test]
    fn orientation_looks_at_target() {
        let pose = OrbitPose {
            radius: 4.0,
            polar: FRAC_PI_4,
            azimuth: 0.7,
            target: Vec3::new(0.5, -1.0, 2.0),
        };
        let forward = pose.orientation() * Vec3::NEG_Z;
        let expected = (pose.target - pose.eye()).normalize();
        assert!((forward - expected).length() < EPS);
    }

    #[test]
    fn orientation_keeps_world_up_on_the_upper_side() {
        let pose = OrbitPose {
            radius: 4.0,
            polar: 1.0,
            azimuth: 2.0,
            target: Vec3::ZERO,
        };
        let up = pose.orientation() * Vec3::Y;
        assert!(up.y > 0.0);
    }

    #[test]
    fn orientation_at_pole_is_finite() {
        let pose = OrbitPose {
            radius: 2.0,
            polar: 0.0,
            azimuth: 0.3,
            target: Vec3::ZERO,
        };
        let q = pose.orientation();
        assert!(q.is_finite());
        let forward = q * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Y).length() < EPS);
    }
}
