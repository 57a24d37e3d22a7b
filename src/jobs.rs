//! Job listing and job definition import.
//!
//! | Method | API Path |
//! |--------|----------|
//! | [`RundeckClient::list_jobs`] | GET `/api/{v}/jobs?project=...` |
//! | [`RundeckClient::import_job`] | POST `/api/{v}/jobs/import` |
//!
//! Import takes the job definition as the `xmlBatch` form field. Rundeck
//! uses that field name for YAML definitions too; `format` tells the server
//! how to read it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{RundeckClient, require_non_empty};
use crate::error::Result;

// ── Records ─────────────────────────────────────────────────────────────

/// A job as listed by `/jobs`.
///
/// ```xml
/// <job id="3b8a86d5-...">
///   <name>nightly-backup</name>
///   <group>ops/backup</group>
///   <project>test_project</project>
///   <description>Backs things up</description>
/// </job>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job UUID, from the `id` attribute.
    #[serde(rename(deserialize = "@id"))]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Slash-separated group path. `None` for ungrouped jobs, including when
    /// the server sends an empty `<group/>`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub group: Option<String>,

    /// Project the job belongs to.
    pub project: String,

    /// Free-text description, empty when unset.
    #[serde(default)]
    pub description: String,

    /// API link to the job (API 14+).
    #[serde(rename(deserialize = "@href"), default)]
    pub href: Option<String>,

    /// GUI link to the job (API 14+).
    #[serde(rename(deserialize = "@permalink"), default)]
    pub permalink: Option<String>,
}

/// Maps a missing, empty or whitespace-only element to `None`.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Deserialize)]
struct JobsResult {
    #[serde(default)]
    jobs: JobList,
}

#[derive(Debug, Default, Deserialize)]
struct JobList {
    #[serde(rename = "job", default)]
    items: Vec<Job>,
}

/// One job entry inside a `<succeeded>`, `<failed>` or `<skipped>` section
/// of an import response.
///
/// Every field is optional because each section reports a different subset.
/// Empty elements come through as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedJob {
    /// 1-based position of the job in the submitted batch.
    #[serde(rename(deserialize = "@index"), default)]
    pub index: Option<u32>,
    /// UUID assigned or kept by the server.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<String>,
    /// Job name.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    /// Group path.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub group: Option<String>,
    /// Project the job was imported into.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub project: Option<String>,
    /// GUI link to the imported job.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub url: Option<String>,
    /// Why the job failed to import. Only present in the `failed` section.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub error: Option<String>,
}

/// Outcome of [`RundeckClient::import_job`].
///
/// A section the server left out is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Jobs created or updated.
    pub succeeded: Vec<ImportedJob>,
    /// Jobs the server rejected, each with an `error`.
    pub failed: Vec<ImportedJob>,
    /// Jobs left alone because of [`DupeOption::Skip`].
    pub skipped: Vec<ImportedJob>,
}

impl ImportResult {
    /// True when nothing failed. Skipped jobs do not count as failures.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ImportResponse {
    #[serde(default)]
    succeeded: ImportSection,
    #[serde(default)]
    failed: ImportSection,
    #[serde(default)]
    skipped: ImportSection,
}

#[derive(Debug, Default, Deserialize)]
struct ImportSection {
    #[serde(rename = "job", default)]
    jobs: Vec<ImportedJob>,
}

impl From<ImportResponse> for ImportResult {
    fn from(resp: ImportResponse) -> Self {
        ImportResult {
            succeeded: resp.succeeded.jobs,
            failed: resp.failed.jobs,
            skipped: resp.skipped.jobs,
        }
    }
}

// ── Import options ──────────────────────────────────────────────────────

/// Serialization format of a job definition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum JobFormat {
    /// Rundeck job XML (`<joblist>`).
    #[default]
    Xml,
    /// Rundeck job YAML.
    Yaml,
}

/// What the server does when an imported job matches an existing one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DupeOption {
    /// Leave the existing job and report the new one as skipped.
    Skip,
    /// Always create a new job.
    #[default]
    Create,
    /// Overwrite the existing job.
    Update,
}

/// Whether UUIDs in the imported definitions are kept or regenerated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum UuidOption {
    /// Keep the UUIDs from the definition.
    #[default]
    Preserve,
    /// Drop them and let the server assign new ones.
    Remove,
}

/// Options for [`RundeckClient::import_job`].
///
/// Defaults follow the server's own: `format=xml`, `dupeOption=create`,
/// `uuidOption=preserve`, and no project override (each definition names
/// its own project).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportJobOptions {
    /// How the server reads the definition.
    pub format: JobFormat,
    /// Behaviour on a matching existing job.
    pub dupe_option: DupeOption,
    /// Project override. `None` keeps the project named in each definition.
    pub project: Option<String>,
    /// UUID handling.
    pub uuid_option: UuidOption,
}

impl ImportJobOptions {
    /// Sets the definition format.
    pub fn with_format(mut self, format: JobFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the duplicate handling.
    pub fn with_dupe_option(mut self, dupe_option: DupeOption) -> Self {
        self.dupe_option = dupe_option;
        self
    }

    /// Imports every job into `project`.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the UUID handling.
    pub fn with_uuid_option(mut self, uuid_option: UuidOption) -> Self {
        self.uuid_option = uuid_option;
        self
    }
}

/// Form body for POST `/jobs/import`. Field order matches what the server
/// documents; `project` is dropped when unset.
#[derive(Debug, Serialize)]
struct ImportJobForm<'a> {
    format: JobFormat,
    #[serde(rename = "dupeOption")]
    dupe_option: DupeOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    #[serde(rename = "uuidOption")]
    uuid_option: UuidOption,
    #[serde(rename = "xmlBatch")]
    xml_batch: &'a str,
}

impl<'a> ImportJobForm<'a> {
    fn new(definition: &'a str, options: &'a ImportJobOptions) -> Self {
        ImportJobForm {
            format: options.format,
            dupe_option: options.dupe_option,
            project: options.project.as_deref(),
            uuid_option: options.uuid_option,
            xml_batch: definition,
        }
    }
}

#[derive(Serialize)]
struct JobsQuery<'a> {
    project: &'a str,
}

// ── Endpoint methods ────────────────────────────────────────────────────

impl RundeckClient {
    /// Lists the jobs defined in `project`, in the order the server returns
    /// them.
    ///
    /// # Errors
    ///
    /// - `RundeckError::InvalidArgument` — `project` is empty; nothing is sent.
    /// - `RundeckError::Api` — non-2xx status or a failure envelope (for
    ///   instance an unknown project).
    /// - `RundeckError::Parse` — the body is not a Rundeck envelope.
    /// - `RundeckError::Network` — transport-level failure.
    pub async fn list_jobs(&self, project: &str) -> Result<Vec<Job>> {
        require_non_empty(project, "project")?;
        let result: JobsResult = self.get("jobs", &JobsQuery { project }).await?;
        Ok(result.jobs.items)
    }

    /// Imports one or more job definitions.
    ///
    /// `definition` is the raw XML or YAML batch, sent verbatim as the
    /// `xmlBatch` form field.
    ///
    /// A successful call can still report failed jobs in
    /// [`ImportResult::failed`]; only a failure envelope or non-2xx status is
    /// an error.
    ///
    /// # Errors
    ///
    /// - `RundeckError::InvalidArgument` — `definition` is empty.
    /// - `RundeckError::Api` — non-2xx status or a failure envelope.
    /// - `RundeckError::Parse` — the body is not a Rundeck envelope.
    /// - `RundeckError::Network` — transport-level failure.
    pub async fn import_job(
        &self,
        definition: &str,
        options: &ImportJobOptions,
    ) -> Result<ImportResult> {
        require_non_empty(definition, "job definition")?;
        let form = ImportJobForm::new(definition, options);
        let response: ImportResponse = self.post_form("jobs/import", &form).await?;
        let result = ImportResult::from(response);
        tracing::debug!(
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            skipped = result.skipped.len(),
            "job import finished"
        );
        Ok(result)
    }
}
