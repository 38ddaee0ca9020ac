use std::fmt;
use std::str::FromStr;

/// A `(host, port)` pair the client targets.
///
/// Endpoints are immutable once the client is constructed; the host list
/// has fixed size and members are treated as a multiset (duplicates are
/// permitted but not meaningful — each still gets its own
/// [`ConnectionEntry`](crate::entry::ConnectionEntry) and reconnection
/// driver).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// An endpoint string failed to parse as `host:port`.
#[derive(Debug, thiserror::Error)]
#[error("invalid endpoint {0:?}, expected \"host:port\"")]
pub struct ParseEndpointError(String);

impl FromStr for Endpoint {
    type Err = ParseEndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ParseEndpointError(s.to_string()))?;
        let port: u16 = port
            .parse()
            .map_err(|_| ParseEndpointError(s.to_string()))?;
        if host.is_empty() {
            return Err(ParseEndpointError(s.to_string()));
        }
        Ok(Endpoint::new(host, port))
    }
}
