//! Error types for the visibility engine
//!
//! Culling anomalies (missing render targets, budget overruns, redundant
//! start/stop) degrade gracefully and are never surfaced as errors.
//! Only invalid inputs handed to the engine produce an `Error`.

use std::fmt;

/// Result type for visibility engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Visibility engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid argument (non-finite bounds, inverted AABB, etc.)
    InvalidArgument(String),

    /// Rejected culling settings (negative thresholds, NaN, etc.)
    InvalidSettings(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidSettings(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an `Error::InvalidArgument`, logging it through `engine_error!`.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("visibility::ObjectsTracker", "bounds are not finite"));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::visibility::Error::InvalidArgument(message)
    }};
}

/// Return early with an `Error::InvalidArgument`, logging it first.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
