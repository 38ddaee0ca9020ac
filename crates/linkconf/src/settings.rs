use serde::{Deserialize, Serialize};

/// Settings that seed a `linkcore` client.
///
/// Only the constructor parameters of a client that are plain data live
/// here — `io_reactor`, `routing_strategy`, and the hook objects are
/// code-level capabilities and have no serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Ordered list of "host:port" endpoints. At least one entry is
    /// required before a client can be constructed from these settings.
    pub hosts: Vec<String>,

    /// Connection timeout in seconds, passed to the reactor's `connect`
    /// and used to derive the reconnection backoff schedule.
    pub connection_timeout_secs: u64,

    /// `tracing-subscriber` env-filter style directive, e.g. "info" or
    /// "linkcore=debug,warn".
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            connection_timeout_secs: 5,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_no_hosts_and_a_5s_timeout() {
        let settings = ClientSettings::default();
        assert!(settings.hosts.is_empty());
        assert_eq!(settings.connection_timeout_secs, 5);
        assert_eq!(settings.log_filter, "info");
    }
}
