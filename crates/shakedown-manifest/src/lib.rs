//! Run manifest emitters: the task-runner file and the compose file.
//!
//! Both are written once at the end of a run, over the full accumulated
//! scenario set. Both overwrite their target unconditionally and require the
//! target directory to pre-exist.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use shakedown_layout::{FILE_ENV_OVERLAY, FILE_PROCESS_MANAGER_CONF, FILE_WEB_SERVER_CONF};
use shakedown_schema::ScenarioDescriptor;
use std::collections::BTreeMap;
use std::path::Path;

/// Task-runner file: one phony target per scenario identifier, in
/// generation order, plus `all` and `clean`.
pub fn makefile(identifiers: &[String]) -> String {
    let mut out = String::new();
    out.push_str("# Generated by shakedown. Do not edit by hand.\n\n");
    out.push_str(&format!(
        ".PHONY: all clean {}\n\n",
        identifiers.join(" ")
    ));
    out.push_str(&format!("all: {}\n\n", identifiers.join(" ")));

    for identifier in identifiers {
        out.push_str(&format!("{identifier}:\n"));
        out.push_str(&format!("\tdocker compose run --rm {identifier}\n\n"));
    }

    out.push_str("clean:\n");
    out.push_str("\tdocker compose down --volumes --remove-orphans\n");
    out
}

pub fn write_makefile(path: &Path, identifiers: &[String]) -> Result<()> {
    std::fs::write(path, makefile(identifiers))
        .with_context(|| format!("write {}", path.display()))
}

#[derive(Serialize)]
struct ComposeService {
    image: String,
    volumes: Vec<String>,
    env_file: Vec<String>,
    environment: BTreeMap<String, String>,
}

impl ComposeService {
    fn for_scenario(scenario: &ScenarioDescriptor) -> Self {
        let id = &scenario.identifier;
        Self {
            image: scenario.image.clone(),
            volumes: vec![
                format!("./{id}/app:/var/www/html"),
                format!("./{id}/{FILE_WEB_SERVER_CONF}:/etc/httpd/conf.d/www.conf"),
                format!("./{id}/{FILE_PROCESS_MANAGER_CONF}:/etc/php-fpm.d/www.conf"),
            ],
            env_file: vec![format!("./{id}/{FILE_ENV_OVERLAY}")],
            environment: BTreeMap::from([(
                "INSTALLATION_METHOD".to_string(),
                scenario.installation_method.clone(),
            )]),
        }
    }
}

/// Compose file: one isolated service per scenario, keyed by identifier in
/// generation order, staging folder bind-mounted in.
pub fn compose_file(scenarios: &[ScenarioDescriptor]) -> Result<String> {
    let mut services = Mapping::new();
    for scenario in scenarios {
        let service = serde_yaml::to_value(ComposeService::for_scenario(scenario))
            .with_context(|| format!("serialize service {}", scenario.identifier))?;
        services.insert(Value::String(scenario.identifier.clone()), service);
    }

    let mut root = Mapping::new();
    root.insert(
        Value::String("services".to_string()),
        Value::Mapping(services),
    );
    serde_yaml::to_string(&Value::Mapping(root)).context("serialize compose file")
}

pub fn write_compose_file(path: &Path, scenarios: &[ScenarioDescriptor]) -> Result<()> {
    std::fs::write(path, compose_file(scenarios)?)
        .with_context(|| format!("write {}", path.display()))
}
