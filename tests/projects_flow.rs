//! Integration tests for project listing using wiremock.

use rundeck_client::{ClientConfig, RundeckClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: creates a client pointed at the given wiremock server.
fn mock_client(server: &MockServer) -> RundeckClient {
    let addr = server.address();
    let cfg = ClientConfig::new(addr.ip().to_string(), "mock-token").with_port(addr.port());
    RundeckClient::new(cfg).unwrap()
}

fn rundeck_success(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(r#"<result success="true" apiversion="11">{body}</result>"#),
        "text/xml",
    )
}

#[tokio::test]
async fn list_projects_returns_exact_text_content() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/11/projects"))
        .and(header("X-Rundeck-Auth-Token", "mock-token"))
        .respond_with(rundeck_success(
            "<projects count=\"1\"><project>\
               <name>test_project</name>\
               <description>Project used by the test suite</description>\
               <url>http://rundeck.host/api/11/project/test_project</url>\
             </project></projects>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client.list_projects().await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "test_project");
    assert_eq!(projects[0].description, "Project used by the test suite");
    assert_eq!(
        projects[0].url.as_deref(),
        Some("http://rundeck.host/api/11/project/test_project")
    );
}

#[tokio::test]
async fn list_projects_sends_accept_xml() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/11/projects"))
        .and(header("accept", "application/xml"))
        .respond_with(rundeck_success(r#"<projects count="0"/>"#))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client.list_projects().await.unwrap();
    assert!(projects.is_empty());
}

#[tokio::test]
async fn list_projects_honours_configured_api_version() {
    let server = MockServer::start().await;
    let addr = server.address();
    let cfg = ClientConfig::new(addr.ip().to_string(), "mock-token")
        .with_port(addr.port())
        .with_api_version(14);
    let client = RundeckClient::new(cfg).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/14/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<result success="true" apiversion="14"><projects count="2"><project><name>a</name></project><project><name>b</name></project></projects></result>"#,
            "text/xml",
        ))
        .mount(&server)
        .await;

    let names: Vec<String> = client
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}
