//! Client behavior against a mock platform

use serde_json::json;
use skiff_api::{ApiError, BuildConfig, CloudflareClient, ProjectRequest, ProjectSource, SourceConfig, WorkerUpload};
use skiff_types::BindingSet;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CloudflareClient {
    CloudflareClient::with_base_url(&server.uri(), "account-1", "test-token").unwrap()
}

fn project_request() -> ProjectRequest {
    ProjectRequest {
        name: "marketing-site".to_string(),
        production_branch: "main".to_string(),
        source: ProjectSource {
            kind: "github".to_string(),
            config: Some(SourceConfig {
                owner: "acme".to_string(),
                repo_name: "marketing-site".to_string(),
                production_branch: "main".to_string(),
                deployments_enabled: true,
                production_deployments_enabled: true,
                preview_deployment_setting: "all".to_string(),
                preview_branch_includes: vec!["*".to_string()],
                preview_branch_excludes: vec![],
            }),
        },
        build_config: BuildConfig {
            build_command: "npm run build".to_string(),
            destination_dir: "dist".to_string(),
            root_dir: String::new(),
        },
    }
}

#[tokio::test]
async fn get_project_decodes_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/account-1/pages/projects/marketing-site"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "result": {
                "name": "marketing-site",
                "subdomain": "marketing-site.pages.dev",
                "source": { "type": "github" },
            },
        })))
        .mount(&server)
        .await;

    let project = client(&server).get_project("marketing-site").await.unwrap();

    assert_eq!(project.name, "marketing-site");
    assert_eq!(project.subdomain.as_deref(), Some("marketing-site.pages.dev"));
    assert!(project.has_github_source());
}

#[tokio::test]
async fn missing_project_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/account-1/pages/projects/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 8000007, "message": "Project not found" }],
            "result": null,
        })))
        .mount(&server)
        .await;

    let error = client(&server).get_project("ghost").await.unwrap_err();

    assert!(matches!(error, ApiError::NotFound(_)));
}

#[tokio::test]
async fn platform_errors_keep_structured_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/account-1/pages/projects"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 10000, "message": "Authentication error" }],
            "result": null,
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .create_project(&project_request())
        .await
        .unwrap_err();

    match error {
        ApiError::Api { status, errors } => {
            assert_eq!(status, 403);
            assert_eq!(errors[0].code, 10000);
            assert_eq!(errors[0].message, "Authentication error");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn create_project_sends_the_request_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/account-1/pages/projects"))
        .and(body_partial_json(json!({
            "name": "marketing-site",
            "production_branch": "main",
            "source": { "type": "github" },
            "build_config": {
                "build_command": "npm run build",
                "destination_dir": "dist",
                "root_dir": "",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "result": { "name": "marketing-site" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = client(&server).create_project(&project_request()).await.unwrap();
    assert_eq!(project.name, "marketing-site");
}

#[tokio::test]
async fn envelope_failure_with_http_success_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/accounts/account-1/pages/projects/marketing-site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 8000015, "message": "Project deletion is disabled" }],
            "result": null,
        })))
        .mount(&server)
        .await;

    let error = client(&server).delete_project("marketing-site").await.unwrap_err();

    match error {
        ApiError::Api { status, errors } => {
            assert_eq!(status, 200);
            assert_eq!(errors[0].code, 8000015);
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_worker_puts_a_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/accounts/account-1/workers/scripts/feature-auth-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "result": { "id": "feature-auth-api" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = WorkerUpload {
        main_module: "index.mjs".to_string(),
        script: "export default {};".to_string(),
        compatibility_date: "2024-05-01".to_string(),
        compatibility_flags: vec![],
        bindings: BindingSet::default(),
    };

    client(&server)
        .upload_worker("feature-auth-api", &upload)
        .await
        .unwrap();
}

#[tokio::test]
async fn workers_subdomain_unwraps_the_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/account-1/workers/subdomain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "result": { "subdomain": "acme" },
        })))
        .mount(&server)
        .await;

    let subdomain = client(&server).workers_subdomain().await.unwrap();
    assert_eq!(subdomain, "acme");
}
