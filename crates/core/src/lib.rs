//! Core types for the statetrace engine
//!
//! This crate defines the foundational types used throughout the system:
//! - RunId / StructureId / NodeId: identity types
//! - StructureKind: discriminator over the six structure variants
//! - Value: unified element value enum
//! - Snapshot / Content / HighlightMark: the recorded state records
//! - Schema / SchemaVersion: versioned declarative snapshot schema
//! - Trace: the validated, exportable snapshot sequence
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod schema;
pub mod snapshot;
pub mod trace;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use schema::{Schema, SchemaVersion};
pub use snapshot::{ops, Content, DoublyNode, HighlightMark, PriorityEntry, SinglyNode, Snapshot};
pub use trace::Trace;
pub use types::{NodeId, RunId, StructureId, StructureKind};
pub use value::Value;
