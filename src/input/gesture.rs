use glam::Vec2;

/// What a drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureKind {
    /// Rotate around the pivot.
    #[default]
    Orbit,
    /// Translate the pivot (truck).
    Pan,
}

/// How wheel and pinch input maps onto the orbit radius.
///
/// Perspective views dolly (additive distance change). Orthographic views
/// zoom: the sampler flips the sign because zoom grows as the view closes
/// in, and the orbit applies the delta multiplicatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelBinding {
    /// Additive distance change.
    #[default]
    Dolly,
    /// Multiplicative magnification change.
    Zoom,
}

impl WheelBinding {
    /// Signed contribution of a normalized wheel amount to `zoom_delta`.
    #[inline]
    #[must_use]
    pub fn apply(self, amount: f32) -> f32 {
        match self {
            Self::Dolly => amount,
            Self::Zoom => -amount,
        }
    }
}

/// Input accumulated since the last frame.
///
/// Input handlers only add to it; the orbit drains it once per frame with
/// [`GestureSample::take`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Orbit-drag motion in pixels since the last drain.
    pub orbit_delta: Vec2,
    /// Pan-drag motion in pixels since the last drain.
    pub pan_delta: Vec2,
    /// Wheel/pinch amount since the last drain.
    pub zoom_delta: f32,
    /// Whether the current drag translates the pivot. Routes new motion
    /// into `pan_delta` instead of `orbit_delta`.
    pub pan_mode: bool,
}

impl GestureSample {
    /// Add pointer motion to the bucket of the current drag kind.
    pub fn add_drag(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        if self.pan_mode {
            self.pan_delta += delta;
        } else {
            self.orbit_delta += delta;
        }
    }

    /// Add wheel or pinch amount.
    pub fn add_zoom(&mut self, amount: f32) {
        if amount.is_finite() {
            self.zoom_delta += amount;
        }
    }

    /// Whether there is nothing to apply.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.orbit_delta == Vec2::ZERO
            && self.pan_delta == Vec2::ZERO
            && self.zoom_delta == 0.0
    }

    /// Read-then-reset: return the accumulated sample and zero every delta.
    ///
    /// `pan_mode` is left alone; it belongs to the drag, not the frame.
    pub fn take(&mut self) -> Self {
        let taken = *self;
        self.orbit_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.zoom_delta = 0.0;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_zeroes_deltas_but_keeps_mode() {
        let mut sample = GestureSample {
            pan_delta: Vec2::new(3.0, -4.0),
            zoom_delta: 12.5,
            pan_mode: true,
            ..GestureSample::default()
        };
        let taken = sample.take();
        assert_eq!(taken.pan_delta, Vec2::new(3.0, -4.0));
        assert_eq!(taken.zoom_delta, 12.5);
        assert_eq!(sample.pan_delta, Vec2::ZERO);
        assert_eq!(sample.zoom_delta, 0.0);
        assert!(sample.pan_mode);
        assert!(sample.is_idle());
    }

    #[test]
    fn motion_keeps_its_kind_across_a_mode_change() {
        let mut sample = GestureSample::default();
        sample.add_drag(Vec2::new(300.0, 0.0));
        sample.pan_mode = true;
        sample.add_drag(Vec2::new(1.0, 0.0));
        assert_eq!(sample.orbit_delta, Vec2::new(300.0, 0.0));
        assert_eq!(sample.pan_delta, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut sample = GestureSample::default();
        sample.add_drag(Vec2::new(f32::NAN, 1.0));
        sample.add_zoom(f32::INFINITY);
        assert!(sample.is_idle());
    }

    #[test]
    fn zoom_binding_flips_sign() {
        assert_eq!(WheelBinding::Dolly.apply(10.0), 10.0);
        assert_eq!(WheelBinding::Zoom.apply(10.0), -10.0);
    }
}
