//! Trace validation
//!
//! The gate before a trace may be handed to the upload/render
//! collaborator: partial or malformed sequences must never reach the
//! renderer. Validation walks the sequence from index 0 and reports the
//! first offending snapshot with its index and reason; it never mutates
//! the recorded sequence.

use statetrace_core::{Error, Result, Schema, SchemaVersion, Snapshot, StructureId, StructureKind};
use std::collections::HashMap;
use tracing::debug;

/// Validates a completed snapshot sequence against the snapshot schema
/// and the sequence-level invariants
///
/// Checks, in order per snapshot:
/// - index contiguity starting at 0
/// - per-snapshot schema conformance for the declared kind
/// - every structure id is introduced by a `declare` snapshot before any
///   other operation references it, and its kind never changes
#[derive(Debug)]
pub struct TraceValidator {
    schema: &'static Schema,
}

impl TraceValidator {
    /// Validator for the current schema version
    pub fn new() -> Self {
        Self {
            schema: Schema::current(),
        }
    }

    /// Validator for a specific schema version
    ///
    /// Returns None when the version is unknown; the caller must not fall
    /// back to shape inference.
    pub fn for_version(version: SchemaVersion) -> Option<Self> {
        Schema::for_version(version).map(|schema| Self { schema })
    }

    /// The schema version this validator checks against
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema.version()
    }

    /// Validate a completed snapshot sequence
    ///
    /// # Errors
    /// Fails with `TraceValidationError` carrying the first offending
    /// index and reason.
    pub fn validate(&self, snapshots: &[Snapshot]) -> Result<()> {
        let mut kinds: HashMap<StructureId, StructureKind> = HashMap::new();

        for (position, snapshot) in snapshots.iter().enumerate() {
            let position = position as u64;
            if snapshot.index != position {
                return Err(Error::TraceValidationError {
                    index: position,
                    reason: format!("expected index {}, found {}", position, snapshot.index),
                });
            }

            self.schema
                .validate_snapshot(snapshot)
                .map_err(|e| Error::TraceValidationError {
                    index: position,
                    reason: e.to_string(),
                })?;

            match kinds.get(&snapshot.structure_id) {
                None => {
                    if !snapshot.is_declare() {
                        return Err(Error::TraceValidationError {
                            index: position,
                            reason: format!(
                                "structure {} used by `{}` before being declared",
                                snapshot.structure_id, snapshot.operation
                            ),
                        });
                    }
                    kinds.insert(snapshot.structure_id, snapshot.kind);
                }
                Some(kind) if *kind != snapshot.kind => {
                    return Err(Error::TraceValidationError {
                        index: position,
                        reason: format!(
                            "structure {} changed kind from {} to {}",
                            snapshot.structure_id, kind, snapshot.kind
                        ),
                    });
                }
                Some(_) => {}
            }
        }

        debug!(
            snapshots = snapshots.len(),
            structures = kinds.len(),
            schema = %self.schema.version(),
            "trace validated"
        );
        Ok(())
    }
}

impl Default for TraceValidator {
    fn default() -> Self {
        Self::new()
    }
}
