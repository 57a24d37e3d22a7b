//! Project archive import.
//!
//! - [`RundeckClient::import_project_archive`] — PUT
//!   `/api/{v}/project/{name}/import` with the zip as the raw request body.
//!
//! ```xml
//! <result success="true" apiversion="11">
//!   <import status="successful">
//!     <errors count="0"/>
//!     <executionErrors count="0"/>
//!     <aclErrors count="0"/>
//!   </import>
//! </result>
//! ```
//!
//! The server answers 200 with `status="failed"` when parts of the archive
//! could not be applied; that is reported through
//! [`ArchiveImportResult::succeeded`] rather than as an error.

use serde::{Deserialize, Serialize};

use crate::client::{RundeckClient, require_non_empty};
use crate::error::Result;
use crate::jobs::UuidOption;

/// Content type Rundeck expects for archive uploads.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Query options for [`RundeckClient::import_project_archive`].
///
/// Booleans go on the wire as lowercase `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveImportOptions {
    /// Keep or regenerate the UUIDs of jobs in the archive.
    #[serde(rename = "jobUuidOption")]
    pub job_uuid_option: UuidOption,
    /// Import execution history. Server default: `true`.
    #[serde(rename = "importExecutions")]
    pub import_executions: bool,
    /// Import the project configuration. Server default: `false`.
    #[serde(rename = "importConfig")]
    pub import_config: bool,
    /// Import project ACL policies. Server default: `false`.
    #[serde(rename = "importACL")]
    pub import_acl: bool,
}

impl Default for ArchiveImportOptions {
    fn default() -> Self {
        ArchiveImportOptions {
            job_uuid_option: UuidOption::Preserve,
            import_executions: true,
            import_config: false,
            import_acl: false,
        }
    }
}

/// Outcome of a project archive import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveImportResult {
    /// `true` when the server reported `status="successful"`.
    pub succeeded: bool,
    /// General import errors, mostly about job definitions.
    pub errors: Vec<String>,
    /// Executions in the archive that could not be imported.
    pub execution_errors: Vec<String>,
    /// ACL policy files that could not be imported.
    pub acl_errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    import: ArchiveImport,
}

#[derive(Debug, Deserialize)]
struct ArchiveImport {
    #[serde(rename = "@status")]
    status: String,
    #[serde(default)]
    errors: ErrorList,
    #[serde(rename = "executionErrors", default)]
    execution_errors: ErrorList,
    #[serde(rename = "aclErrors", default)]
    acl_errors: ErrorList,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorList {
    #[serde(rename = "error", default)]
    items: Vec<String>,
}

impl From<ArchiveImport> for ArchiveImportResult {
    fn from(import: ArchiveImport) -> Self {
        ArchiveImportResult {
            succeeded: import.status == "successful",
            errors: import.errors.items,
            execution_errors: import.execution_errors.items,
            acl_errors: import.acl_errors.items,
        }
    }
}

impl RundeckClient {
    /// Uploads a project archive (as produced by Rundeck's project export)
    /// into `project`.
    ///
    /// # Errors
    ///
    /// - `RundeckError::InvalidArgument` — `project` is empty; nothing is sent.
    /// - `RundeckError::Api` — non-2xx status or a failure envelope.
    /// - `RundeckError::Parse` — the body is not a Rundeck envelope or has no
    ///   `<import>` element.
    /// - `RundeckError::Network` — transport-level failure.
    pub async fn import_project_archive(
        &self,
        project: &str,
        archive: Vec<u8>,
        options: &ArchiveImportOptions,
    ) -> Result<ArchiveImportResult> {
        require_non_empty(project, "project")?;
        let path = format!("project/{}/import", urlencoding::encode(project));
        tracing::debug!(project, bytes = archive.len(), "uploading project archive");
        let response: ArchiveResponse = self
            .put_bytes(&path, options, ZIP_CONTENT_TYPE, archive)
            .await?;
        Ok(response.import.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_import_deserializes() {
        let xml = r#"<result success="true" apiversion="11"><import status="successful"></import></result>"#;
        let resp: ArchiveResponse = quick_xml::de::from_str(xml).unwrap();
        let result = ArchiveImportResult::from(resp.import);
        assert!(result.succeeded);
        assert!(result.errors.is_empty());
        assert!(result.execution_errors.is_empty());
        assert!(result.acl_errors.is_empty());
    }

    #[test]
    fn failed_import_collects_error_lists() {
        let xml = r#"<result success="true" apiversion="14">
            <import status="failed">
              <errors count="2">
                <error>Job at index [1] had errors: Validation error</error>
                <error>Job at index [3] had errors: Missing name</error>
              </errors>
              <executionErrors count="1"><error>Execution 12 was not imported</error></executionErrors>
              <aclErrors count="0"/>
            </import>
        </result>"#;
        let resp: ArchiveResponse = quick_xml::de::from_str(xml).unwrap();
        let result = ArchiveImportResult::from(resp.import);
        assert!(!result.succeeded);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[1].contains("Missing name"));
        assert_eq!(result.execution_errors, vec!["Execution 12 was not imported"]);
        assert!(result.acl_errors.is_empty());
    }

    #[test]
    fn missing_import_element_is_an_error() {
        let xml = r#"<result success="true" apiversion="11"></result>"#;
        assert!(quick_xml::de::from_str::<ArchiveResponse>(xml).is_err());
    }

    #[test]
    fn options_serialize_with_lowercase_booleans() {
        let options = ArchiveImportOptions {
            job_uuid_option: UuidOption::Preserve,
            import_executions: false,
            import_config: false,
            import_acl: false,
        };
        let encoded = serde_urlencoded::to_string(&options).unwrap();
        assert_eq!(
            encoded,
            "jobUuidOption=preserve&importExecutions=false&importConfig=false&importACL=false"
        );
    }

    #[test]
    fn default_options_match_server_defaults() {
        let encoded = serde_urlencoded::to_string(ArchiveImportOptions::default()).unwrap();
        assert_eq!(
            encoded,
            "jobUuidOption=preserve&importExecutions=true&importConfig=false&importACL=false"
        );
    }
}
