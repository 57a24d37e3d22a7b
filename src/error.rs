//! Typed error hierarchy for the rundeck-client crate.
//!
//! Every variant maps to a real failure boundary:
//! - `Network` wraps `reqwest::Error` for transport failures (DNS, TCP,
//!   TLS, timeouts) that never produced an HTTP status.
//! - `Api` covers both non-2xx statuses and `<result>` envelopes that report
//!   failure with a 2xx status. The server's message is preserved.
//! - `Parse` covers bodies that are not well-formed XML or not a Rundeck
//!   envelope at all (an HTML login page served for a bad token, say).
//! - `InvalidArgument` and `Config` reject bad input before any request.

use reqwest::StatusCode;

/// Unified error type for all rundeck-client operations.
///
/// `source()` chains to the underlying `reqwest` or `quick-xml` error where
/// one exists.
#[derive(Debug, thiserror::Error)]
pub enum RundeckError {
    /// The Rundeck API reported a failure.
    ///
    /// Raised for any non-2xx status, and for any envelope carrying
    /// `success="false"` or `error="true"` regardless of status.
    #[error("API error {status}{}: {message}", fmt_api_version(.api_version))]
    Api {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The `apiversion` attribute of the envelope, when one was parsed.
        api_version: Option<u32>,
        /// The server-reported message, or the raw body text when the body
        /// was not an envelope.
        message: String,
    },

    /// The response body could not be parsed as the expected XML document.
    #[error("failed to parse response: {message}")]
    Parse {
        /// What was wrong with the body.
        message: String,
        /// The underlying deserializer error, if the failure came from
        /// `quick-xml` rather than from an envelope check.
        #[source]
        source: Option<quick_xml::DeError>,
    },

    /// A network-level failure occurred before an HTTP status was available.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A caller-supplied argument was rejected before sending the request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The client configuration is unusable (empty server, bad token, ...).
    #[error("invalid configuration: {0}")]
    Config(String),
}

fn fmt_api_version(api_version: &Option<u32>) -> String {
    match api_version {
        Some(v) => format!(" (api v{v})"),
        None => String::new(),
    }
}

impl From<quick_xml::DeError> for RundeckError {
    fn from(err: quick_xml::DeError) -> Self {
        RundeckError::Parse {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl RundeckError {
    /// Returns the HTTP status for `Api` errors, or the status carried by a
    /// `Network` error when reqwest recorded one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RundeckError::Api { status, .. } => Some(*status),
            RundeckError::Network(err) => err.status(),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, RundeckError>;
