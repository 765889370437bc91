//! Structured error handling for the Footo dispatcher
//!
//! Every user-facing failure maps to one variant here, and every variant maps
//! to a stable non-zero exit code. The shell wrapper only depends on
//! zero-vs-nonzero for its evaluate/display branch, but distinct codes keep
//! failures diagnosable from scripts.

use crate::dialect::Dialect;
use thiserror::Error;

/// Main error type for the Footo dispatcher.
#[derive(Error, Debug)]
pub enum FootoError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid module metadata for '{module}': {reason}")]
    MetadataInvalid { module: String, reason: String },

    #[error("Module '{name}' not found in local or bundled scope")]
    ModuleNotFound { name: String },

    #[error("Module '{module}' is written for {declared}, but the active shell is {active}")]
    DialectMismatch {
        module: String,
        declared: Dialect,
        active: Dialect,
    },

    #[error("Failed to launch interpreter '{program}': {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Result with FootoError.
pub type FootoResult<T> = Result<T, FootoError>;

impl FootoError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a metadata validation error for one module
    pub fn metadata_invalid(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataInvalid {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Create a module-not-found error
    pub fn module_not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }

    /// Create a dialect mismatch error
    pub fn dialect_mismatch(module: impl Into<String>, declared: Dialect, active: Dialect) -> Self {
        Self::DialectMismatch {
            module: module.into(),
            declared,
            active,
        }
    }

    /// Create a spawn failure error
    pub fn spawn_failure(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailure {
            program: program.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Process exit code for this failure.
    ///
    /// A module's own non-zero exit status is not an error variant at all:
    /// it travels as `ExecutionResult` with `ResultKind::ScriptFailed`, whose
    /// `exit_code` propagates the child's status.
    pub fn exit_code(&self) -> i32 {
        match self {
            FootoError::ModuleNotFound { .. } => 3,
            FootoError::DialectMismatch { .. } => 4,
            FootoError::MetadataInvalid { .. } => 5,
            FootoError::SpawnFailure { .. } => 6,
            FootoError::Config { .. } | FootoError::Validation { .. } | FootoError::Io { .. } => 1,
        }
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for FootoError {
    fn from(err: std::io::Error) -> Self {
        FootoError::io("io_operation", err)
    }
}
