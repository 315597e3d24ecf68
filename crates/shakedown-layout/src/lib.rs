//! Canonical staging layout for shakedown scenario artifacts.

use std::path::{Path, PathBuf};

/// Run-level manifests, written at the scenario root.
pub const FILE_MAKEFILE: &str = "Makefile";
pub const FILE_COMPOSE: &str = "docker-compose.yml";

/// Per-scenario artifact filenames.
pub const FILE_WEB_SERVER_CONF: &str = "www.apache.conf";
pub const FILE_PROCESS_MANAGER_CONF: &str = "www.php-fpm.conf";
pub const FILE_REQUEST_TARGETS: &str = "vegeta-request-targets.txt";
pub const FILE_ENV_OVERLAY: &str = "scenario.env";

/// The copied application directory inside each scenario folder.
pub const DIR_APP: &str = "app";

/// The generic dependency manifest the runtime-specific variant is promoted to.
pub const FILE_DEPENDENCY_MANIFEST: &str = "composer.json";

/// `composer-<version>.json`
pub fn versioned_dependency_manifest(version: &str) -> String {
    format!("composer-{version}.json")
}

/// `<root>/Makefile`
pub fn makefile_path(root: &Path) -> PathBuf {
    root.join(FILE_MAKEFILE)
}

/// `<root>/docker-compose.yml`
pub fn compose_path(root: &Path) -> PathBuf {
    root.join(FILE_COMPOSE)
}

/// Paths for one scenario's staging folder.
#[derive(Debug, Clone)]
pub struct ScenarioPaths {
    root: PathBuf,
    identifier: String,
}

impl ScenarioPaths {
    pub fn new(root: impl Into<PathBuf>, identifier: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            identifier: identifier.into(),
        }
    }

    /// `<root>/<identifier>`
    pub fn folder(&self) -> PathBuf {
        self.root.join(&self.identifier)
    }

    /// `<root>/<identifier>/app`
    pub fn app_dir(&self) -> PathBuf {
        self.folder().join(DIR_APP)
    }

    /// `<root>/<identifier>/www.apache.conf`
    pub fn web_server_conf(&self) -> PathBuf {
        self.folder().join(FILE_WEB_SERVER_CONF)
    }

    /// `<root>/<identifier>/www.php-fpm.conf`
    pub fn process_manager_conf(&self) -> PathBuf {
        self.folder().join(FILE_PROCESS_MANAGER_CONF)
    }

    /// `<root>/<identifier>/vegeta-request-targets.txt`
    pub fn request_targets(&self) -> PathBuf {
        self.folder().join(FILE_REQUEST_TARGETS)
    }

    /// `<root>/<identifier>/scenario.env`
    pub fn env_overlay(&self) -> PathBuf {
        self.folder().join(FILE_ENV_OVERLAY)
    }

    /// `<root>/<identifier>/app/composer.json`
    pub fn dependency_manifest(&self) -> PathBuf {
        self.app_dir().join(FILE_DEPENDENCY_MANIFEST)
    }

    /// `<root>/<identifier>/app/composer-<version>.json`
    pub fn versioned_dependency_manifest(&self, version: &str) -> PathBuf {
        self.app_dir().join(versioned_dependency_manifest(version))
    }
}
