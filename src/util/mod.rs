//! Shared utilities.

/// Per-frame elapsed time and FPS.
pub mod frame_timing;

pub use frame_timing::FrameClock;
