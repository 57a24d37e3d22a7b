//! The `<result>` envelope that wraps every Rundeck XML response.
//!
//! ```xml
//! <result success="true" apiversion="14"> ...payload... </result>
//! <result error="true" apiversion="14">
//!   <error code="api.error.item.doesnotexist"><message>...</message></error>
//! </result>
//! ```
//!
//! [`check_response`] runs on every body before the endpoint-specific
//! payload is deserialized. It turns failure envelopes and non-2xx statuses
//! into `RundeckError::Api`, and anything that is not a success envelope
//! into `RundeckError::Parse`.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Result, RundeckError};

/// Attributes of the root `<result>` element.
///
/// Child elements are skipped, so a failure envelope is recognised no matter
/// what shape its error payload has. Each endpoint module deserializes the
/// same body again into its own record type.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "@success")]
    pub success: Option<bool>,
    #[serde(rename = "@error")]
    pub error: Option<bool>,
    #[serde(rename = "@apiversion")]
    pub api_version: Option<u32>,
}

/// The `<error>` children of a failure envelope. Parsed best-effort, only to
/// build a message.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "error", default)]
    errors: Vec<ErrorDetail>,
}

/// `<error code="..."><message>...</message></error>`, or the older form
/// with the message as the element's own text.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "@code")]
    code: Option<String>,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "$text")]
    text: Option<String>,
}

impl ErrorDetail {
    fn render(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .message
            .iter()
            .map(String::as_str)
            .chain(self.text.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }
        let joined = parts.join("; ");
        Some(match &self.code {
            Some(code) => format!("{joined} [{code}]"),
            None => joined,
        })
    }
}

impl Envelope {
    fn is_failure(&self) -> bool {
        self.success == Some(false) || self.error == Some(true)
    }
}

/// Every non-empty server message in `body`, joined with `"; "`.
///
/// Returns `None` when the error payload has no message or cannot be read.
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = quick_xml::de::from_str(body).ok()?;
    let messages: Vec<String> = parsed.errors.iter().filter_map(ErrorDetail::render).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// Validates an HTTP status and body against the envelope rules.
///
/// - Non-2xx: `Api` error, with the envelope message when the body is one,
///   else the trimmed body, else the status reason phrase.
/// - 2xx with `success="false"` or `error="true"`: `Api` error, whatever the
///   error payload looks like.
/// - 2xx that is not XML, or XML without `success="true"`: `Parse` error.
pub(crate) fn check_response(status: StatusCode, body: &str) -> Result<Envelope> {
    if !status.is_success() {
        let api_version = quick_xml::de::from_str::<Envelope>(body)
            .ok()
            .and_then(|env| env.api_version);
        let message = error_message(body)
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("no response body").to_string());
        return Err(RundeckError::Api {
            status,
            api_version,
            message,
        });
    }

    let envelope: Envelope = quick_xml::de::from_str(body)?;

    if envelope.is_failure() {
        return Err(RundeckError::Api {
            status,
            api_version: envelope.api_version,
            message: error_message(body)
                .unwrap_or_else(|| "request failed without an error message".to_string()),
        });
    }

    if envelope.success != Some(true) {
        return Err(RundeckError::Parse {
            message: "response is not a Rundeck result envelope".to_string(),
            source: None,
        });
    }

    Ok(envelope)
}
