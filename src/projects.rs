//! Project listing.
//!
//! - [`RundeckClient::list_projects`] — GET `/api/{v}/projects`.
//!
//! ```xml
//! <result success="true" apiversion="11">
//!   <projects count="1">
//!     <project>
//!       <name>test_project</name>
//!       <description>A test project</description>
//!       <url>http://rundeck.host/api/11/project/test_project</url>
//!     </project>
//!   </projects>
//! </result>
//! ```

use serde::{Deserialize, Serialize};

use crate::client::RundeckClient;

/// A Rundeck project as listed by `/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name, used in every project-scoped path.
    pub name: String,

    /// Empty when the project has no description.
    #[serde(default)]
    pub description: String,

    /// Only reported by some server versions.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectsResult {
    #[serde(default)]
    projects: ProjectList,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectList {
    #[serde(rename = "project", default)]
    items: Vec<Project>,
}

const NO_QUERY: &[(&str, &str)] = &[];

impl RundeckClient {
    /// Lists every project visible to the API token, in server order.
    ///
    /// # Errors
    ///
    /// - `RundeckError::Api` — non-2xx status or a failure envelope.
    /// - `RundeckError::Parse` — the body is not a Rundeck envelope.
    /// - `RundeckError::Network` — transport-level failure.
    pub async fn list_projects(&self) -> crate::error::Result<Vec<Project>> {
        let result: ProjectsResult = self.get("projects", NO_QUERY).await?;
        Ok(result.projects.items)
    }
}
