use std::time::Duration;

use crate::{
    constants::{DEFAULT_BIND_ADDR, MAX_REQUEST_BYTES},
    exofinder_errors::ExofinderError,
};

/// Runtime parameters of the exoplanet service.
///
/// Fields
/// -----------------
/// * `bind_addr` – Address the listener binds to (`host:port`).
/// * `max_request_bytes` – Size of the single read performed per request. A request longer
///   than this is truncated and therefore rejected as malformed.
/// * `idle_timeout` – Optional limit on how long a kept-alive session may wait for its next
///   request. `None` waits forever.
///
/// See also
/// ------------
/// * [`ServerConfig::builder`] – Validated construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_request_bytes: usize,
    pub idle_timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_request_bytes: MAX_REQUEST_BYTES,
            idle_timeout: None,
        }
    }
}

/// Fluent builder for [`ServerConfig`], starting from the defaults.
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    pub fn max_request_bytes(mut self, n: usize) -> Self {
        self.config.max_request_bytes = n;
        self
    }

    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `bind_addr` must not be empty.
    /// * `max_request_bytes` must be `>= 1`.
    /// * `idle_timeout`, when set, must be non-zero.
    ///
    /// Return
    /// ----------
    /// * The [`ServerConfig`], or [`ExofinderError::InvalidServerParameter`] naming the
    ///   first rule that failed.
    pub fn build(self) -> Result<ServerConfig, ExofinderError> {
        let c = &self.config;

        if c.bind_addr.trim().is_empty() {
            return Err(ExofinderError::InvalidServerParameter(
                "bind_addr must not be empty".into(),
            ));
        }
        if c.max_request_bytes == 0 {
            return Err(ExofinderError::InvalidServerParameter(
                "max_request_bytes must be >= 1".into(),
            ));
        }
        if c.idle_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ExofinderError::InvalidServerParameter(
                "idle_timeout must be > 0 when set".into(),
            ));
        }

        Ok(self.config)
    }
}
