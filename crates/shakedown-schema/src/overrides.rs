//! Candidate values and resolved override maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate value for a randomized setting.
///
/// `Unset` is the "no override" sentinel: sampling it removes the setting
/// from the scenario instead of overriding it, even if a default overlay put
/// it there. In catalog files it is spelled as `null`; the sentinel never
/// leaks into the in-memory model as a magic empty value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Candidate {
    Value(String),
    Unset,
}

impl From<Option<String>> for Candidate {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Candidate::Value(v),
            None => Candidate::Unset,
        }
    }
}

impl From<Candidate> for Option<String> {
    fn from(candidate: Candidate) -> Self {
        match candidate {
            Candidate::Value(v) => Some(v),
            Candidate::Unset => None,
        }
    }
}

/// Resolved key -> value settings for one scenario.
///
/// Keys are unique; a missing key means "use default" or "omit". Iteration
/// is in key order, so rendered artifacts are stable for a fixed map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideMap(BTreeMap<String, String>);

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a default overlay applied before randomized modifications.
    pub fn from_defaults(defaults: &[(String, String)]) -> Self {
        Self(defaults.iter().cloned().collect())
    }

    /// Apply one sampled candidate: `Value` overrides (last draw wins),
    /// `Unset` removes the key entirely.
    pub fn apply(&mut self, name: &str, candidate: &Candidate) {
        match candidate {
            Candidate::Value(v) => {
                self.0.insert(name.to_string(), v.clone());
            }
            Candidate::Unset => {
                self.0.remove(name);
            }
        }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
