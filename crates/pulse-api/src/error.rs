//! Error types for pulse timers

use thiserror::Error;

/// Errors raised by the timing layer itself
#[derive(Error, Debug)]
pub enum PulseError {
    // Construction errors
    #[error("composite timer needs at least 2 delegates, got {0}")]
    NotEnoughDelegates(usize),

    // Delegate errors - not expected in normal operation, backends that
    // cannot fail simply never produce them
    #[error("timer `{timer}` failed to start: {reason}")]
    StartFailed { timer: String, reason: String },

    #[error("timer `{timer}` failed to stop: {reason}")]
    StopFailed { timer: String, reason: String },

    #[error("timer `{timer}` failed to update: {reason}")]
    UpdateFailed { timer: String, reason: String },

    // Async errors
    #[error("timing continuation was dropped before it ran")]
    CompletionDropped,
}

/// Result type for timing-layer operations
pub type PulseResult<T> = Result<T, PulseError>;

/// Any error raised by a timed user operation.
///
/// Timed operations report failure through this boxed channel so the timing
/// layer can pass the caller's error through with its identity intact.
/// `PulseError` converts into it via the std blanket `From`, which is what
/// lets the timing operations use `?` on their own plumbing.
pub type OpError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for timed user operations
pub type OpResult<T> = Result<T, OpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulseError::NotEnoughDelegates(1);
        assert!(format!("{}", err).contains("at least 2"));

        let err = PulseError::StopFailed {
            timer: "requests".to_string(),
            reason: "backend gone".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("requests"));
        assert!(display.contains("backend gone"));
    }

    #[test]
    fn test_pulse_error_converts_to_op_error() {
        let boxed: OpError = PulseError::CompletionDropped.into();
        assert!(boxed.downcast_ref::<PulseError>().is_some());
    }
}
