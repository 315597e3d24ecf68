//! Config file generators for shakedown scenarios.
//!
//! Four generators, one text artifact each: web-server config,
//! process-manager config, request-target list, environment overlay.
//! Renderers are pure (input in, string out); the `write_*` wrappers perform
//! exactly one file write and surface a missing or unwritable parent
//! directory as an error instead of swallowing it. Parent directories are
//! never created here.

use anyhow::{Context, Result};
use shakedown_schema::OverrideMap;
use std::path::Path;

/// Synthetic endpoints cycled through the request-target list.
const REQUEST_ENDPOINTS: &[&str] = &[
    "/",
    "/simple",
    "/simple_view",
    "/error",
    "/db/select",
    "/cache/read",
    "/queue/publish",
    "/slow",
];

/// Apache-style vhost with one `SetEnv` per env override and one
/// `php_admin_value` per ini override.
pub fn web_server_config(env: &OverrideMap, ini: &OverrideMap) -> String {
    let mut out = String::new();
    out.push_str("# Generated by shakedown. Do not edit by hand.\n");
    out.push_str("Listen 80\n\n");
    out.push_str("<VirtualHost *:80>\n");
    out.push_str("    ServerName localhost\n");
    out.push_str("    DocumentRoot /var/www/html\n");
    out.push_str("    DirectoryIndex index.php\n\n");
    out.push_str("    <Directory /var/www/html>\n");
    out.push_str("        AllowOverride None\n");
    out.push_str("        Require all granted\n");
    out.push_str("    </Directory>\n");

    if !env.is_empty() {
        out.push('\n');
        for (name, value) in env.iter() {
            out.push_str(&format!("    SetEnv {name} \"{value}\"\n"));
        }
    }
    if !ini.is_empty() {
        out.push('\n');
        for (name, value) in ini.iter() {
            out.push_str(&format!("    php_admin_value {name} \"{value}\"\n"));
        }
    }

    out.push_str("</VirtualHost>\n");
    out
}

pub fn write_web_server_config(path: &Path, env: &OverrideMap, ini: &OverrideMap) -> Result<()> {
    write_artifact(path, &web_server_config(env, ini))
}

/// FPM-style pool config with `env[...]` and `php_admin_value[...]` lines.
pub fn process_manager_config(env: &OverrideMap, ini: &OverrideMap) -> String {
    let mut out = String::new();
    out.push_str("; Generated by shakedown. Do not edit by hand.\n");
    out.push_str("[global]\n");
    out.push_str("error_log = /proc/self/fd/2\n\n");
    out.push_str("[www]\n");
    out.push_str("user = www-data\n");
    out.push_str("group = www-data\n");
    out.push_str("listen = 9000\n");
    out.push_str("pm = dynamic\n");
    out.push_str("pm.max_children = 5\n");
    out.push_str("pm.start_servers = 2\n");
    out.push_str("pm.min_spare_servers = 1\n");
    out.push_str("pm.max_spare_servers = 3\n");
    out.push_str("clear_env = no\n");

    if !env.is_empty() {
        out.push('\n');
        for (name, value) in env.iter() {
            out.push_str(&format!("env[{name}] = \"{value}\"\n"));
        }
    }
    if !ini.is_empty() {
        out.push('\n');
        for (name, value) in ini.iter() {
            out.push_str(&format!("php_admin_value[{name}] = {value}\n"));
        }
    }

    out
}

pub fn write_process_manager_config(
    path: &Path,
    env: &OverrideMap,
    ini: &OverrideMap,
) -> Result<()> {
    write_artifact(path, &process_manager_config(env, ini))
}

/// `count` synthetic request-target lines, cycling the fixed endpoint list.
pub fn request_targets(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        let endpoint = REQUEST_ENDPOINTS[i % REQUEST_ENDPOINTS.len()];
        out.push_str(&format!("GET http://localhost:80{endpoint}\n"));
    }
    out
}

pub fn write_request_targets(path: &Path, count: usize) -> Result<()> {
    write_artifact(path, &request_targets(count))
}

/// Environment overlay as `KEY=VALUE` lines, consumed via `env_file`.
pub fn env_overlay(env: &OverrideMap) -> String {
    let mut out = String::new();
    for (name, value) in env.iter() {
        out.push_str(&format!("{name}={value}\n"));
    }
    out
}

pub fn write_env_overlay(path: &Path, env: &OverrideMap) -> Result<()> {
    write_artifact(path, &env_overlay(env))
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
