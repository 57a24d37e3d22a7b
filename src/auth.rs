//! Static API token authentication for the Rundeck API.
//!
//! Rundeck accepts a long-lived API token in the `X-Rundeck-Auth-Token`
//! header. There is no acquisition or refresh step: the token is fixed for
//! the lifetime of the client and attached to every request.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::{Result, RundeckError};

/// Header Rundeck reads the API token from.
pub const AUTH_TOKEN_HEADER: &str = "X-Rundeck-Auth-Token";

/// A Rundeck API token.
///
/// `Debug` never prints the token value, so configs and clients can be
/// logged freely.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token string. Validity is checked by [`ApiToken::header_value`].
    pub fn new(token: impl Into<String>) -> Self {
        ApiToken(token.into())
    }

    /// Returns the raw token string.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Builds the header value for [`AUTH_TOKEN_HEADER`], marked sensitive
    /// so reqwest and hyper keep it out of their debug output.
    ///
    /// Fails with `RundeckError::Config` if the token is empty or contains
    /// bytes that are not legal in an HTTP header.
    pub fn header_value(&self) -> Result<HeaderValue> {
        if self.0.is_empty() {
            return Err(RundeckError::Config("API token must not be empty".to_string()));
        }
        let mut value = HeaderValue::from_str(&self.0).map_err(|_| {
            RundeckError::Config("API token contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        ApiToken::new(token)
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        ApiToken(token)
    }
}
