//! Integration Tests
//!
//! Cross-crate tests organized by dimension:
//! - Scenarios: end-to-end algorithm runs and the traces they produce
//! - Isolation: run and structure identity guarantees
//! - Validation: the exportability gate for completed traces
//! - Properties: randomized invariant checks (index contiguity, link
//!   integrity)

mod isolation;
mod properties;
mod scenarios;
mod validation;
