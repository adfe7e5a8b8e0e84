use web_time::{Duration, Instant};

/// Longest frame step handed to the rig, in milliseconds.
pub const DEFAULT_MAX_STEP_MS: f32 = 250.0;

/// Frame clock: elapsed time per repaint, smoothed FPS and optional frame
/// limiting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Upper bound on a reported step; a backgrounded tab resumes with one
    /// bounded step instead of a jump.
    max_step_ms: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a new frame clock with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    /// Like [`new`](Self::new), with an explicit start time.
    #[must_use]
    pub fn starting_at(target_fps: u32, start: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: start,
            max_step_ms: DEFAULT_MAX_STEP_MS,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Replace the step bound (milliseconds, clamped to be non-negative).
    #[must_use]
    pub fn with_max_step_ms(mut self, max_step_ms: f32) -> Self {
        self.max_step_ms = max_step_ms.max(0.0);
        self
    }

    /// Whether enough time has passed since the last tick to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Start a frame: returns milliseconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        let ms = frame_time * 1000.0;
        if ms > self.max_step_ms {
            log::debug!("frame step {ms:.0} ms capped to {} ms", self.max_step_ms);
            self.max_step_ms
        } else {
            ms
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_milliseconds() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(0, start);
        let ms = clock.tick_at(start + Duration::from_millis(16));
        assert!((ms - 16.0).abs() < 1e-3);
    }

    #[test]
    fn long_pause_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(0, start).with_max_step_ms(100.0);
        let ms = clock.tick_at(start + Duration::from_secs(30));
        assert_eq!(ms, 100.0);
    }

    #[test]
    fn clock_going_backwards_reports_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(0, start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(5)), 0.0);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(0, start);
        let mut now = start;
        for _ in 0..500 {
            now += Duration::from_millis(10);
            let _ = clock.tick_at(now);
        }
        assert!((clock.fps() - 100.0).abs() < 1.0, "{}", clock.fps());
    }

    #[test]
    fn unlimited_clock_always_renders() {
        assert!(FrameClock::new(0).should_render());
    }
}
