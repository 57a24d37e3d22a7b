//! Authenticated HTTP client for the Rundeck REST/XML API.
//!
//! `RundeckClient` wraps a `reqwest::Client` and an immutable
//! [`ClientConfig`]. Every request goes through [`RundeckClient::execute`],
//! which:
//! - attaches the `X-Rundeck-Auth-Token` header and `Accept: application/xml`,
//! - sends exactly one request (no retries, no backoff),
//! - reads the body as text before checking the status, so Rundeck's error
//!   message survives into `RundeckError::Api`,
//! - validates the `<result>` envelope and deserializes the payload.
//!
//! Endpoint-specific methods (`list_projects`, `list_jobs`, `import_job`,
//! `import_project_archive`) live next to their record types in the
//! `projects`, `jobs` and `archive` modules.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::AUTH_TOKEN_HEADER;
use crate::config::ClientConfig;
use crate::envelope::check_response;
use crate::error::{Result, RundeckError};

const XML_MEDIA_TYPE: &str = "application/xml";

/// Builds a `reqwest::Client` with the timeouts from `config`.
fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()?;
    Ok(client)
}

/// Client for one Rundeck server.
///
/// Holds no mutable state, so a single instance can be shared across tasks
/// by reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RundeckClient {
    client: Client,
    base_url: String,
    auth_header: HeaderValue,
    config: ClientConfig,
}

impl RundeckClient {
    /// Validates `config` and builds a client with its own connection pool.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        Self::with_http_client(config, client)
    }

    /// Like [`RundeckClient::new`] but reuses a caller-supplied
    /// `reqwest::Client`. The config's timeouts are not applied in that case.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;
        let auth_header = config.token.header_value()?;
        Ok(RundeckClient {
            client,
            base_url: config.base_url(),
            auth_header,
            config,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{protocol}://{server}:{port}/api/{version}/`, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an endpoint path (no leading slash) against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(AUTH_TOKEN_HEADER, self.auth_header.clone())
            .header(ACCEPT, XML_MEDIA_TYPE)
    }

    /// Sends one request and turns the response into `T`.
    ///
    /// The body is checked against the envelope rules first, then parsed a
    /// second time into the endpoint's own record type.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending rundeck request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%method, %url, %status, bytes = body.len(), "received rundeck response");

        let envelope = check_response(status, &body).inspect_err(|err| {
            tracing::warn!(%method, %url, %status, error = %err, "rundeck request failed");
        })?;
        if let Some(version) = envelope.api_version {
            if version != self.config.api_version {
                tracing::debug!(
                    requested = self.config.api_version,
                    served = version,
                    "server answered with a different api version"
                );
            }
        }

        Ok(quick_xml::de::from_str(&body)?)
    }

    /// Sends an authenticated GET with `query` as the query string and
    /// deserializes the `<result>` body into `T`.
    ///
    /// `T` sees the whole document with `<result>` as its root, so its
    /// fields are the payload elements directly under it.
    pub async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    /// Sends an authenticated POST with an `application/x-www-form-urlencoded`
    /// body.
    pub async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).form(form)).await
    }

    /// Sends an authenticated PUT with a raw body of the given content type
    /// and `query` as the query string.
    pub async fn put_bytes<Q, T>(
        &self,
        path: &str,
        query: &Q,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let content_type = HeaderValue::from_str(content_type)
            .map_err(|_| RundeckError::InvalidArgument(format!("bad content type '{content_type}'")))?;
        let request = self
            .request(Method::PUT, path)
            .query(query)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        self.execute(request).await
    }
}

/// Rejects blank identifiers before they reach a URL.
pub(crate) fn require_non_empty(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RundeckError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}
