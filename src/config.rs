//! Connection settings for a Rundeck server.
//!
//! A [`ClientConfig`] is built once from a server name and an API token,
//! adjusted with the `with_*` setters, and then handed to
//! [`RundeckClient::new`](crate::client::RundeckClient::new), which owns it
//! for the rest of the client's life.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::ApiToken;
use crate::error::{Result, RundeckError};

/// Default Rundeck web port.
pub const DEFAULT_PORT: u16 = 4440;

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: u32 = 11;

/// Covers TCP + TLS handshake only.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Full round-trip including the response body. Archive imports upload the
/// whole zip in one request, so this is generous.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// URL scheme used to reach the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP, the Rundeck default.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// Scheme as it appears in a URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = RundeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(RundeckError::Config(format!(
                "unknown protocol '{other}', expected http or https"
            ))),
        }
    }
}

/// Immutable connection parameters for a [`RundeckClient`](crate::client::RundeckClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host name or IP address, without scheme or port.
    pub server: String,
    /// TCP port, [`DEFAULT_PORT`] unless overridden.
    pub port: u16,
    /// URL scheme.
    pub protocol: Protocol,
    /// Version segment of every API path.
    pub api_version: u32,
    /// Sent on every request in the auth header.
    pub token: ApiToken,
    /// See [`DEFAULT_CONNECT_TIMEOUT`].
    pub connect_timeout: Duration,
    /// See [`DEFAULT_REQUEST_TIMEOUT`].
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a config with the default port, protocol, API version and
    /// timeouts.
    pub fn new(server: impl Into<String>, token: impl Into<ApiToken>) -> Self {
        ClientConfig {
            server: server.into(),
            port: DEFAULT_PORT,
            protocol: Protocol::default(),
            api_version: DEFAULT_API_VERSION,
            token: token.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides [`DEFAULT_PORT`].
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Switches between `http` and `https`.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Overrides [`DEFAULT_API_VERSION`].
    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    /// Sets the connect and whole-request timeouts.
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    /// The prefix every endpoint path is appended to:
    /// `{protocol}://{server}:{port}/api/{version}/`.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/api/{}/",
            self.protocol, self.server, self.port, self.api_version
        )
    }

    /// Checks the values that would otherwise only fail at request time.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(RundeckError::Config("server must not be empty".to_string()));
        }
        if self.api_version == 0 {
            return Err(RundeckError::Config("api version must be at least 1".to_string()));
        }
        self.token.header_value()?;
        Ok(())
    }
}
