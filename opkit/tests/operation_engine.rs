//! End-to-end tests through the real `reqwest` transport.

use opkit::{
    make, ApiError, ClientError, ConfigError, Context, Credentials, DispatchError, JsonFormat, Operation,
    OperationDescriptor, OperationError, PathParams, ReqwestTransport, RestMethod, Token,
    ValidationError, VoidFormat,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct BranchFailure {
    organization: String,
    database: String,
    message: String,
}

#[derive(Debug, PartialEq)]
enum BranchError {
    NotFound(BranchFailure),
    Forbidden(BranchFailure),
}

#[derive(Debug, PartialEq, Deserialize)]
struct Branch {
    name: String,
    production: bool,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    next_page: Option<u32>,
}

#[derive(Serialize)]
struct ListBranchesInput {
    organization: String,
    database: String,
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

static LIST_BRANCHES: Operation<ListBranchesInput, JsonFormat<Page<Branch>>, BranchError> =
    make(|| {
        OperationDescriptor::builder()
            .id("list_branches")
            .method(RestMethod::Get)
            .path("/organizations/{organization}/databases/{database}/branches")
            .error("not_found", BranchError::NotFound)
            .error("forbidden", BranchError::Forbidden)
            .build()
    });

#[derive(Serialize)]
struct CreateBranchInput {
    organization: String,
    database: String,
    name: String,
    parent_branch: String,
    backup_id: Option<String>,
}

static CREATE_BRANCH: Operation<CreateBranchInput, JsonFormat<Branch>, BranchError> = make(|| {
    OperationDescriptor::builder()
        .id("create_branch")
        .method(RestMethod::Post)
        .path("/organizations/{organization}/databases/{database}/branches")
        .error("not_found", BranchError::NotFound)
        .build()
});

#[derive(Serialize)]
struct DeleteDatabaseInput {
    organization: String,
    database: String,
}

fn database_path(params: &PathParams) -> String {
    format!(
        "/organizations/{}/databases/{}",
        params["organization"], params["database"]
    )
}

static DELETE_DATABASE: Operation<DeleteDatabaseInput, VoidFormat, BranchError> = make(|| {
    OperationDescriptor::builder()
        .id("delete_database")
        .method(RestMethod::Delete)
        .path_fn(&["organization", "database"], database_path)
        .error("forbidden", BranchError::Forbidden)
        .build()
});

fn context(server: &MockServer) -> Context<ReqwestTransport> {
    let credentials = Credentials::new(Token::bearer("test-token").unwrap())
        .with_base_url(Url::parse(&format!("{}/v1", server.uri())).unwrap());
    Context::new(credentials, ReqwestTransport::new().unwrap())
}

fn list_input(organization: &str, database: &str) -> ListBranchesInput {
    ListBranchesInput {
        organization: organization.to_string(),
        database: database.to_string(),
        page: None,
        q: None,
    }
}

#[tokio::test]
async fn test_get_routes_path_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/acme/databases/db1/branches"))
        .and(query_param("page", "2"))
        .and(query_param("q", ""))
        .and(query_param_is_missing("organization"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "main", "production": true}],
            "next_page": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListBranchesInput {
        page: Some(2),
        q: Some(String::new()),
        ..list_input("acme", "db1")
    };
    let page = LIST_BRANCHES.call(&context(&server), &input).await.unwrap();

    assert_eq!(
        page,
        Page {
            data: vec![Branch {
                name: "main".to_string(),
                production: true,
            }],
            next_page: None,
        }
    );
}

#[tokio::test]
async fn test_unset_fields_are_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/acme/databases/db1/branches"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "next_page": null})))
        .expect(1)
        .mount(&server)
        .await;

    let page = LIST_BRANCHES
        .call(&context(&server), &list_input("acme", "db1"))
        .await
        .unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_path_values_round_trip_through_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/acme%20corp/databases/db%2F1/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "next_page": null})))
        .expect(1)
        .mount(&server)
        .await;

    LIST_BRANCHES
        .call(&context(&server), &list_input("acme corp", "db/1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_sends_remaining_fields_as_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/organizations/acme/databases/db1/branches"))
        .and(body_json(json!({"name": "dev", "parent_branch": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "dev",
            "production": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreateBranchInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
        name: "dev".to_string(),
        parent_branch: "main".to_string(),
        backup_id: None,
    };
    let branch = CREATE_BRANCH.call(&context(&server), &input).await.unwrap();

    assert_eq!(branch.name, "dev");
    assert!(!branch.production);
}

#[tokio::test]
async fn test_not_found_echoes_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/acme/databases/gone/branches"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "not_found",
            "message": "Not Found",
            "organization": "somebody-else"
        })))
        .mount(&server)
        .await;

    let err = LIST_BRANCHES
        .call(&context(&server), &list_input("acme", "gone"))
        .await
        .unwrap_err();

    assert_eq!(
        err.into_declared(),
        Some(BranchError::NotFound(BranchFailure {
            organization: "acme".to_string(),
            database: "gone".to_string(),
            message: "Not Found".to_string(),
        }))
    );
}

#[tokio::test]
async fn test_delete_with_null_forbidden_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/organizations/acme/databases/db1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    let input = DeleteDatabaseInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
    };
    let err = DELETE_DATABASE.call(&context(&server), &input).await.unwrap_err();

    assert_eq!(
        err.into_declared(),
        Some(BranchError::Forbidden(BranchFailure {
            organization: "acme".to_string(),
            database: "db1".to_string(),
            message: String::new(),
        }))
    );
}

#[tokio::test]
async fn test_delete_success_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/organizations/acme/databases/db1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let input = DeleteDatabaseInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
    };
    DELETE_DATABASE.call(&context(&server), &input).await.unwrap();
}

#[tokio::test]
async fn test_path_fn_values_stay_single_segments() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/organizations/a%2Fb%20c/databases/db1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let input = DeleteDatabaseInput {
        organization: "a/b c".to_string(),
        database: "db1".to_string(),
    };
    DELETE_DATABASE.call(&context(&server), &input).await.unwrap();
}

#[tokio::test]
async fn test_dot_segment_value_is_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let input = DeleteDatabaseInput {
        organization: "acme".to_string(),
        database: "..".to_string(),
    };
    let err = DELETE_DATABASE.call(&context(&server), &input).await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::Defect(ApiError::Config(ConfigError::InvalidPathParam { .. }))
    ));
}

#[tokio::test]
async fn test_undeclared_server_error_is_defect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "internal_server_error",
            "message": "boom"
        })))
        .mount(&server)
        .await;

    let err = LIST_BRANCHES
        .call(&context(&server), &list_input("acme", "db1"))
        .await
        .unwrap_err();

    assert!(err.is_defect());
    assert_eq!(err.defect().and_then(ApiError::status_code), Some(500));
    assert!(matches!(
        err,
        OperationError::Defect(ApiError::Dispatch(DispatchError::UndeclaredCode { .. }))
    ));
}

#[tokio::test]
async fn test_success_shape_mismatch_is_defect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = LIST_BRANCHES
        .call(&context(&server), &list_input("acme", "db1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OperationError::Defect(ApiError::Validation(ValidationError::JsonParse(_)))
    ));
}

#[tokio::test]
async fn test_timeout_is_transport_defect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let credentials = Credentials::new(Token::bearer("test-token").unwrap())
        .with_base_url(Url::parse(&server.uri()).unwrap());
    let transport = ReqwestTransport::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let ctx = Context::new(credentials, transport);

    let err = LIST_BRANCHES
        .call(&ctx, &list_input("acme", "db1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OperationError::Defect(ApiError::Client(ClientError::Timeout { .. }))
    ));
}
