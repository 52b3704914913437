//! Error types for mimo2x2 operations.
//!
//! The solver kernels never fail: numerical degeneracy surfaces as IEEE
//! special values. Errors only exist on the surfaces around them, where
//! caller-provided buffers are packed, converted, batched or dispatched.

use std::fmt;

/// Errors that can occur outside the numeric kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimoError {
    /// Input validation error (lengths, shapes, lane counts).
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
    /// The requested backend is not supported by the running CPU.
    UnsupportedBackend {
        /// Name of the backend that was requested.
        backend: String,
    },
    /// A backend name could not be parsed.
    UnknownBackend {
        /// The string that failed to parse.
        name: String,
    },
}

impl fmt::Display for MimoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MimoError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            MimoError::UnsupportedBackend { backend } => {
                write!(f, "Backend '{}' is not supported on this CPU", backend)
            }
            MimoError::UnknownBackend { name } => write!(
                f,
                "Unknown backend '{}' (expected one of: generic, sse, avx, neon)",
                name
            ),
        }
    }
}

impl std::error::Error for MimoError {}

/// Result type alias for mimo2x2 operations.
pub type Result<T> = std::result::Result<T, MimoError>;

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> MimoError {
    MimoError::ValidationError {
        message: message.into(),
    }
}

/// Creates an unsupported-backend error.
pub fn unsupported_backend(backend: impl Into<String>) -> MimoError {
    MimoError::UnsupportedBackend {
        backend: backend.into(),
    }
}

/// Creates an unknown-backend error.
pub fn unknown_backend(name: impl Into<String>) -> MimoError {
    MimoError::UnknownBackend { name: name.into() }
}
