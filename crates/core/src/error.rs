//! Error types for the trace engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::StructureKind;
use thiserror::Error;

/// Result type alias for trace engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the trace engine
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A snapshot does not conform to its structure kind's schema
    #[error("schema violation in field `{field}`: {reason}")]
    SchemaViolation {
        /// The offending snapshot field
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// Invalid operation for the structure's current state
    #[error("invalid `{operation}` on {kind}: {reason}")]
    StructureOperationError {
        /// Name of the attempted operation
        operation: String,
        /// Kind of the structure it was attempted on
        kind: StructureKind,
        /// Why the operation is invalid in the current state
        reason: String,
    },

    /// Attempt to append to a recorder after it was sealed
    #[error("recorder is sealed; no further snapshots may be appended")]
    RecorderSealed,

    /// A completed snapshot sequence failed validation
    #[error("trace validation failed at snapshot {index}: {reason}")]
    TraceValidationError {
        /// Index of the first offending snapshot
        index: u64,
        /// Why the sequence is invalid
        reason: String,
    },
}

impl Error {
    /// Build a usage error for an operation invalid in the current state
    pub fn invalid_operation(
        operation: &str,
        kind: StructureKind,
        reason: impl Into<String>,
    ) -> Self {
        Error::StructureOperationError {
            operation: operation.to_string(),
            kind,
            reason: reason.into(),
        }
    }

    /// Build a schema violation for a snapshot field
    pub fn schema_violation(field: &str, reason: impl Into<String>) -> Self {
        Error::SchemaViolation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
