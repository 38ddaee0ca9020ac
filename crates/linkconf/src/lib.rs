//! Minimal configuration loading for `linkcore` clients.
//!
//! This crate provides the plain-data slice of a `linkcore::Client`'s
//! constructor parameters (endpoints, connection timeout, log filter),
//! loadable from layered TOML files and environment variables. The
//! code-level capabilities a client also needs — the reactor, the routing
//! strategy, the connection hooks — aren't configuration and have no place
//! here; build those in code and pass the settings in alongside them.
//!
//! # Config file locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/linkcore/config.toml` (system)
//! 2. `~/.config/linkcore/config.toml` (user)
//! 3. `./linkcore.toml` (local override)
//! 4. Environment variables (`LINKCORE_HOSTS`, `LINKCORE_CONNECTION_TIMEOUT_SECS`, `LINKCORE_LOG`)
//!
//! # Example
//!
//! ```toml
//! hosts = ["a.example.com:9000", "b.example.com:9000", "c.example.com:9000"]
//! connection_timeout_secs = 7
//! log_filter = "info"
//! ```

mod error;
mod loader;
mod settings;

pub use error::ConfigError;
pub use loader::{discover_config_files_with_override, ConfigSources};
pub use settings::ClientSettings;

/// Load settings from all sources (see module docs for the search order).
pub fn load() -> Result<ClientSettings, ConfigError> {
    let (settings, _sources) = load_with_sources_from(None)?;
    Ok(settings)
}

/// Load settings from a specific file path, then apply env overrides.
///
/// If `config_path` is provided, it takes precedence over the local
/// `./linkcore.toml` override. System and user configs still load first.
pub fn load_from(config_path: Option<&std::path::Path>) -> Result<ClientSettings, ConfigError> {
    let (settings, _sources) = load_with_sources_from(config_path)?;
    Ok(settings)
}

/// Load settings and return information about where each value came from.
pub fn load_with_sources() -> Result<(ClientSettings, ConfigSources), ConfigError> {
    load_with_sources_from(None)
}

/// Load settings from optional path and return sourcing information.
pub fn load_with_sources_from(
    config_path: Option<&std::path::Path>,
) -> Result<(ClientSettings, ConfigSources), ConfigError> {
    let mut sources = ConfigSources::default();
    let mut settings = ClientSettings::default();

    for path in loader::discover_config_files_with_override(config_path) {
        let file_settings = loader::load_from_file(&path)?;
        settings = loader::merge_settings(settings, file_settings);
        sources.files.push(path);
    }

    loader::apply_env_overrides(&mut settings, &mut sources);

    Ok((settings, sources))
}
