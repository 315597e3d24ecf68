//! Core data model for the shakedown scenario generator.
//!
//! Defines candidate values, override maps, and the scenario descriptor.
//! All other crates depend on these types.

pub mod overrides;
pub mod scenario;

pub use overrides::{Candidate, OverrideMap};
pub use scenario::{ScenarioDescriptor, scenario_identifier};
