//! Scenario staging: copy the application template into the scenario folder
//! and promote the runtime-specific dependency manifest to the generic name.
//!
//! Staging failures propagate and abort the scenario. No partial-scenario
//! cleanup: the output is ephemeral and regenerated on every run.

use anyhow::{Context, Result};
use shakedown_layout::ScenarioPaths;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Materialize one scenario's staging folder.
///
/// A stale folder from a previous run is cleared first, so regenerating at
/// the same seed never mixes artifacts from different catalog versions.
pub fn stage_scenario(
    app_template: &Path,
    paths: &ScenarioPaths,
    runtime_version: &str,
) -> Result<()> {
    let folder = paths.folder();
    if folder.exists() {
        fs::remove_dir_all(&folder)
            .with_context(|| format!("clear stale scenario folder {}", folder.display()))?;
    }
    fs::create_dir_all(&folder)
        .with_context(|| format!("create scenario folder {}", folder.display()))?;

    copy_dir(app_template, &paths.app_dir())?;
    promote_dependency_manifest(paths, runtime_version)
}

/// Recursive copy of `src` into `dst` (created if absent).
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("strip prefix {}", src.display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}

/// `composer-<version>.json` -> `composer.json` inside the staged app.
fn promote_dependency_manifest(paths: &ScenarioPaths, runtime_version: &str) -> Result<()> {
    let variant = paths.versioned_dependency_manifest(runtime_version);
    let generic = paths.dependency_manifest();
    fs::copy(&variant, &generic).with_context(|| {
        format!(
            "promote dependency manifest {} to {}",
            variant.display(),
            generic.display()
        )
    })?;
    Ok(())
}
