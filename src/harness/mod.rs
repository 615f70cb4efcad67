//! Conformance harness
//!
//! Matches inbound callable requests against named, immutable scenarios and
//! emits each scenario's fixed outcome.

pub mod conformance;
pub mod fixtures;
pub mod scenario;

pub use scenario::{Outcome, Scenario, ScenarioTable};
