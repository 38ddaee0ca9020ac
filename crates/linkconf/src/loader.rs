//! Config file discovery, loading, and environment variable overlay.

use std::env;
use std::path::{Path, PathBuf};

use crate::{ClientSettings, ConfigError};

/// Information about where config values came from, for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded, in load order.
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode a loaded value.
    pub env_overrides: Vec<String>,
}

/// Discover config files, optionally with a CLI-supplied override path
/// that takes precedence over the local `./linkcore.toml`.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/linkcore/config.toml");
    if system.exists() {
        files.push(system);
    }

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("linkcore/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("linkcore.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load settings from a TOML file.
pub fn load_from_file(path: &Path) -> Result<ClientSettings, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge two settings, with `overlay` winning wherever it differs from the
/// compiled default (so an unset overlay field doesn't blank out `base`).
pub fn merge_settings(base: ClientSettings, overlay: ClientSettings) -> ClientSettings {
    let default = ClientSettings::default();

    ClientSettings {
        hosts: if overlay.hosts != default.hosts {
            overlay.hosts
        } else {
            base.hosts
        },
        connection_timeout_secs: if overlay.connection_timeout_secs
            != default.connection_timeout_secs
        {
            overlay.connection_timeout_secs
        } else {
            base.connection_timeout_secs
        },
        log_filter: if overlay.log_filter != default.log_filter {
            overlay.log_filter
        } else {
            base.log_filter
        },
    }
}

/// Apply environment variable overrides to settings.
pub fn apply_env_overrides(settings: &mut ClientSettings, sources: &mut ConfigSources) {
    if let Ok(v) = env::var("LINKCORE_HOSTS") {
        settings.hosts = v.split(',').map(|h| h.trim().to_string()).collect();
        sources.env_overrides.push("LINKCORE_HOSTS".to_string());
    }

    if let Ok(v) = env::var("LINKCORE_CONNECTION_TIMEOUT_SECS") {
        if let Ok(secs) = v.parse() {
            settings.connection_timeout_secs = secs;
            sources
                .env_overrides
                .push("LINKCORE_CONNECTION_TIMEOUT_SECS".to_string());
        }
    }

    if let Ok(v) = env::var("LINKCORE_LOG") {
        settings.log_filter = v;
        sources.env_overrides.push("LINKCORE_LOG".to_string());
    }
    // Also honor the ecosystem-standard variable.
    if let Ok(v) = env::var("RUST_LOG") {
        settings.log_filter = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}
