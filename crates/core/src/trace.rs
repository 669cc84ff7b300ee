//! Validated trace artifact
//!
//! A Trace is the exportable result of one algorithm run: the full ordered
//! snapshot sequence, stamped with the schema version it was validated
//! against and the run it belongs to. The wire encoding is owned by the
//! upload collaborator; this type only guarantees serde-serializable,
//! validator-accepted content.

use crate::schema::SchemaVersion;
use crate::snapshot::Snapshot;
use crate::types::RunId;
use serde::{Deserialize, Serialize};

/// The full ordered sequence of snapshots produced by one algorithm run
///
/// Only the trace validator constructs these; holding a Trace means the
/// snapshot sequence passed schema and sequence-level validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Schema version the snapshots were validated against
    pub schema_version: SchemaVersion,
    /// The run that produced this trace
    pub run_id: RunId,
    /// When the run began (microseconds since epoch)
    pub started_at: u64,
    /// When the run ended (microseconds since epoch)
    pub ended_at: u64,
    /// Snapshots in index order, contiguous from 0
    pub snapshots: Vec<Snapshot>,
}

impl Trace {
    /// Number of snapshots in the trace
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the trace recorded nothing
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate snapshots in index order
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Run duration in microseconds
    pub fn duration_micros(&self) -> u64 {
        self.ended_at.saturating_sub(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ops, Content};
    use crate::types::{StructureId, StructureKind};
    use crate::value::Value;

    fn sample_trace() -> Trace {
        let id = StructureId::new();
        let mut snapshots = Vec::new();
        for (i, op) in [ops::DECLARE, ops::PUSH].iter().enumerate() {
            let mut snap = Snapshot::new(
                id,
                StructureKind::Stack,
                op,
                Content::Linear(vec![Value::Int(3); i]),
            );
            snap.index = i as u64;
            snapshots.push(snap);
        }
        Trace {
            schema_version: SchemaVersion(1),
            run_id: RunId::new(),
            started_at: 1_000,
            ended_at: 4_500,
            snapshots,
        }
    }

    #[test]
    fn test_len_and_iter() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 2);
        assert!(!trace.is_empty());
        let ops_seen: Vec<&str> = trace.iter().map(|s| s.operation.as_str()).collect();
        assert_eq!(ops_seen, vec!["declare", "push"]);
    }

    #[test]
    fn test_duration() {
        assert_eq!(sample_trace().duration_micros(), 3_500);
    }

    #[test]
    fn test_serde_roundtrip() {
        let trace = sample_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let restored: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, restored);
    }
}
