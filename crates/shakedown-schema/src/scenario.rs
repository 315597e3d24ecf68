//! Scenario descriptors and identifier derivation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One fully materialized, independently executable test configuration.
///
/// Created once per generated scenario, immutable after creation. The
/// descriptor only lives for the generation run; the staged files are the
/// durable output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    pub identifier: String,
    /// Staging directory holding the copied application and rendered configs.
    pub folder: PathBuf,
    /// Container image reference the scenario runs under.
    pub image: String,
    pub installation_method: String,
}

/// Deterministic scenario identifier from seed and sampled platform axes.
///
/// The format is load-bearing: operators grep old run logs for these, and
/// the manifests key services by it.
pub fn scenario_identifier(seed: u32, os: &str, version: &str) -> String {
    format!("randomized-{seed}-{os}-{version}")
}
