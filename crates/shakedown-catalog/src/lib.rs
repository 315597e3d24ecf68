//! Option catalogs: the axes a scenario is sampled from.
//!
//! A catalog is immutable once constructed and injected into the assembler,
//! so tests can substitute alternate catalogs without touching the sampler.
//! Axis lists are ordered (`Vec`), because sampling determinism depends on
//! stable ordering.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shakedown_schema::Candidate;
use std::path::Path;

/// One operating system and the runtime versions it can host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsEntry {
    pub name: String,
    pub runtimes: Vec<String>,
}

/// One environment variable and its candidate values.
///
/// Candidates may include [`Candidate::Unset`], which removes the variable
/// instead of overriding it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvAxis {
    pub name: String,
    pub candidates: Vec<Candidate>,
}

/// One configuration setting and its candidate values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IniAxis {
    pub name: String,
    pub candidates: Vec<String>,
}

/// Container image reference template: `<repository>:<tag_prefix>-<os>-<version>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub repository: String,
    pub tag_prefix: String,
}

impl ImageSpec {
    pub fn reference(&self, os: &str, version: &str) -> String {
        format!("{}:{}-{}-{}", self.repository, self.tag_prefix, os, version)
    }
}

/// The full set of axes one run samples from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub oses: Vec<OsEntry>,
    pub installation_methods: Vec<String>,
    /// Overlay always applied before randomized env modifications.
    #[serde(default)]
    pub default_env: Vec<(String, String)>,
    pub env: Vec<EnvAxis>,
    pub ini: Vec<IniAxis>,
    pub image: ImageSpec,
    #[serde(default = "default_max_modifications")]
    pub max_env_modifications: usize,
    #[serde(default = "default_max_modifications")]
    pub max_ini_modifications: usize,
}

fn default_max_modifications() -> usize {
    5
}

impl Catalog {
    /// The compiled-in axes used when no catalog file is given.
    pub fn builtin() -> Self {
        Self {
            oses: vec![
                os("centos7", &["7.0", "7.1", "7.2", "7.3", "7.4"]),
                os("buster", &["7.2", "7.3", "7.4", "8.0"]),
                os("bullseye", &["7.4", "8.0", "8.1", "8.2"]),
            ],
            installation_methods: vec![
                "package".to_string(),
                "pecl".to_string(),
                "source".to_string(),
            ],
            default_env: vec![
                ("APP_ENV".to_string(), "prod".to_string()),
                ("TRACE_ENABLED".to_string(), "1".to_string()),
            ],
            env: vec![
                env("APP_ENV", &[Some("prod"), Some("dev"), None]),
                env("LOG_LEVEL", &[Some("debug"), Some("info"), Some("warn"), None]),
                env("TRACE_ENABLED", &[Some("0"), Some("1"), None]),
                env("TRACE_AGENT_HOST", &[Some("agent"), Some("localhost"), None]),
                env(
                    "TRACE_SAMPLE_RATE",
                    &[Some("0.0"), Some("0.5"), Some("1.0"), None],
                ),
                env("WORKER_COUNT", &[Some("1"), Some("4"), Some("8")]),
            ],
            ini: vec![
                ini("memory_limit", &["128M", "256M", "512M"]),
                ini("max_execution_time", &["0", "30", "60"]),
                ini("opcache.enable", &["0", "1"]),
                ini("opcache.enable_cli", &["0", "1"]),
                ini("display_errors", &["On", "Off"]),
                ini("error_reporting", &["E_ALL", "E_ALL & ~E_DEPRECATED"]),
                ini("zend.assertions", &["-1", "1"]),
            ],
            image: ImageSpec {
                repository: "effortlessmetrics/shakedown-ci".to_string(),
                tag_prefix: "php-randomized".to_string(),
            },
            max_env_modifications: default_max_modifications(),
            max_ini_modifications: default_max_modifications(),
        }
    }

    /// Load an alternate catalog from a YAML or JSON file.
    ///
    /// Format is detected from the extension; anything that is not `.json`
    /// is parsed as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;

        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("parse JSON catalog {}", path.display()))?,
            _ => serde_yaml::from_str(&contents)
                .with_context(|| format!("parse YAML catalog {}", path.display()))?,
        };
        Ok(catalog)
    }
}

fn os(name: &str, runtimes: &[&str]) -> OsEntry {
    OsEntry {
        name: name.to_string(),
        runtimes: runtimes.iter().map(|v| v.to_string()).collect(),
    }
}

fn env(name: &str, candidates: &[Option<&str>]) -> EnvAxis {
    EnvAxis {
        name: name.to_string(),
        candidates: candidates
            .iter()
            .map(|c| Candidate::from(c.map(|v| v.to_string())))
            .collect(),
    }
}

fn ini(name: &str, candidates: &[&str]) -> IniAxis {
    IniAxis {
        name: name.to_string(),
        candidates: candidates.iter().map(|v| v.to_string()).collect(),
    }
}
