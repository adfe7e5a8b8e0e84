//! Crate-level error types.

use std::fmt;

use crate::camera::ProjectionMode;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// A configured interval is inverted or not finite.
    InvalidBounds {
        /// Option the interval belongs to (e.g. `radius_range`).
        name: &'static str,
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// Any other rejected configuration value.
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A control method was called before controls were attached.
    NotInitialized {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The requested projection does not exist on this rig.
    ProjectionUnavailable(ProjectionMode),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Binding input listeners to a surface failed.
    Surface(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { name, min, max } => {
                write!(f, "invalid bounds for {name}: [{min}, {max}]")
            }
            Self::InvalidOption { name, reason } => {
                write!(f, "invalid option {name}: {reason}")
            }
            Self::NotInitialized { operation } => {
                write!(f, "{operation} called before controls were attached")
            }
            Self::ProjectionUnavailable(mode) => {
                write!(f, "{mode:?} projection is not available on this rig")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
