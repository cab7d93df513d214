//! Configuration for the bus client

use std::time::Duration;

/// Default NATS server address
pub const DEFAULT_URL: &str = "nats://127.0.0.1:4222";

/// Timeout applied to every notification request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for connecting to the NATS server
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Server URL (e.g., "nats://127.0.0.1:4222")
    pub url: String,

    /// Connection name reported to the server
    pub connection_name: String,

    /// How long to wait for a reply to a request
    pub request_timeout: Duration,

    /// How long to wait for the initial connection
    pub connect_timeout: Duration,
}

impl BusConfig {
    /// Create a new configuration for the given server URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection_name: "notiprobe".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Set the connection name
    pub fn connection_name(mut self, name: impl Into<String>) -> Self {
        self.connection_name = name.into();
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}
