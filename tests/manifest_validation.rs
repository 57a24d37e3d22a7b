//! Validation for the endpoint manifest (manifest/endpoints.toml).
//!
//! Keeps the manifest syntactically valid and in step with the methods the
//! crate actually exposes.

use serde::Deserialize;

/// Top-level manifest structure matching the TOML schema.
#[derive(Debug, Deserialize)]
struct Manifest {
    meta: Meta,
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Meta {
    schema_version: u32,
    min_api_version: u32,
    last_validated: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Endpoint {
    family: String,
    name: String,
    method: String,
    path: String,
    request_content_type: String,
    response_status: u16,
    implemented: bool,
    #[serde(default)]
    notes: String,
}

fn load() -> Manifest {
    let content = std::fs::read_to_string("manifest/endpoints.toml")
        .expect("manifest/endpoints.toml should exist and be readable");
    toml::from_str(&content).expect("manifest/endpoints.toml should be valid TOML")
}

#[test]
fn manifest_endpoints_toml_is_valid() {
    let manifest = load();

    assert!(
        manifest.meta.schema_version >= 1,
        "schema_version must be at least 1"
    );
    assert_eq!(
        manifest.meta.min_api_version,
        rundeck_client::config::DEFAULT_API_VERSION,
        "manifest should target the client's default api version"
    );
    assert!(!manifest.endpoints.is_empty());

    for ep in &manifest.endpoints {
        assert!(!ep.family.is_empty(), "endpoint family must not be empty");
        assert!(!ep.name.is_empty(), "endpoint name must not be empty");
        assert!(
            ep.path.starts_with("/api/{v}/"),
            "endpoint '{}' path should start with /api/{{v}}/, got {}",
            ep.name,
            ep.path
        );
    }
}

#[test]
fn manifest_marks_wrapped_endpoints_as_implemented() {
    let manifest = load();

    let implemented: Vec<&str> = manifest
        .endpoints
        .iter()
        .filter(|ep| ep.implemented)
        .map(|ep| ep.name.as_str())
        .collect();

    for expected in [
        "list_projects",
        "list_jobs",
        "import_job",
        "import_project_archive",
    ] {
        assert!(
            implemented.contains(&expected),
            "endpoint '{expected}' should be marked as implemented"
        );
    }
}

#[test]
fn manifest_endpoint_methods_are_valid_http_verbs() {
    let manifest = load();

    let valid_methods = ["GET", "POST", "PUT", "DELETE"];
    for ep in &manifest.endpoints {
        assert!(
            valid_methods.contains(&ep.method.as_str()),
            "endpoint '{}' has invalid method '{}', expected one of {:?}",
            ep.name,
            ep.method,
            valid_methods
        );
    }
}

#[test]
fn body_carrying_endpoints_declare_content_type() {
    let manifest = load();

    for ep in manifest.endpoints.iter().filter(|ep| ep.method == "PUT") {
        assert!(
            !ep.request_content_type.is_empty(),
            "PUT endpoint '{}' must declare its request content type",
            ep.name
        );
    }
}
