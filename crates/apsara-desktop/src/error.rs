//! Error types for the desktop window manager
//!
//! Every fallible operation returns [`DesktopResult`]. None of these errors is
//! fatal: the session keeps its previous state whenever one is returned.

use thiserror::Error;

use crate::window::WindowId;

/// Errors that can occur in desktop operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesktopError {
    /// Geometry input was NaN, infinite, or had a non-positive size
    #[error("invalid geometry for '{op}': {reason}")]
    InvalidGeometry {
        /// The operation that received the input
        op: &'static str,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Window with the given ID was not found
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),

    /// No application is registered under the given id
    #[error("unknown app: {0}")]
    UnknownApp(String),

    /// An operation was attempted that is not valid in the current state
    #[error("invalid operation '{op}': {reason}")]
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// Layout snapshot could not be read or written
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Configuration could not be parsed or held invalid values
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DesktopError {
    fn from(e: serde_json::Error) -> Self {
        DesktopError::Persistence(e.to_string())
    }
}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DesktopError::WindowNotFound(42);
        assert_eq!(err.to_string(), "window not found: 42");

        let err = DesktopError::UnknownApp("maps".to_string());
        assert_eq!(err.to_string(), "unknown app: maps");

        let err = DesktopError::InvalidGeometry {
            op: "move_window",
            reason: "position is not finite",
        };
        assert_eq!(
            err.to_string(),
            "invalid geometry for 'move_window': position is not finite"
        );

        let err = DesktopError::InvalidOperation {
            op: "begin_drag",
            reason: "window is maximized",
        };
        assert_eq!(
            err.to_string(),
            "invalid operation 'begin_drag': window is maximized"
        );
    }

    #[test]
    fn test_error_from_json() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: DesktopError = parse.unwrap_err().into();
        assert!(matches!(err, DesktopError::Persistence(_)));
    }
}
