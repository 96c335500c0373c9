//! Definitions exercised against a mock server through the real transport.

use opkit::{ApiError, Context, Credentials, DispatchError, OperationError, ReqwestTransport, Token};
use opkit_definitions::backups::{
    delete_backup, list_backups, DeleteBackupError, DeleteBackupInput, ListBackupsInput,
};
use opkit_definitions::branches::{create_branch, BranchInput, CreateBranchError, CreateBranchInput};
use opkit_definitions::common::BranchResource;
use opkit_definitions::passwords::{create_password, CreatePasswordInput, PasswordRole};
use opkit_definitions::safe_migrations::enable_safe_migrations;
use opkit_definitions::Pagination;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer) -> Context<ReqwestTransport> {
    let credentials = Credentials::new(Token::service("tok_id", "tok_secret").unwrap())
        .with_base_url(Url::parse(&format!("{}/v1", server.uri())).unwrap());
    Context::new(credentials, ReqwestTransport::new().unwrap())
}

fn backup_target() -> DeleteBackupInput {
    DeleteBackupInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
        branch: "main".to_string(),
        id: "X".to_string(),
    }
}

fn main_branch() -> BranchInput {
    BranchInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
        branch: "main".to_string(),
    }
}

#[tokio::test]
async fn test_list_backups_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/acme/databases/db1/branches/main/backups"))
        .and(query_param("page", "2"))
        .and(header("authorization", "tok_id:tok_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_page": 2,
            "next_page": null,
            "prev_page": 1,
            "data": [{
                "id": "b1",
                "name": "nightly",
                "state": "success",
                "size": 1024,
                "created_at": "2024-01-01T00:00:00.000Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListBackupsInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
        branch: "main".to_string(),
        production: None,
        pagination: Pagination::page(2),
    };
    let page = list_backups(&context(&server), &input).await.unwrap();

    assert_eq!(page.current_page, Some(2));
    assert!(!page.has_next());
    assert_eq!(page.data[0].name, "nightly");
    assert_eq!(page.data[0].size, 1024);
}

#[tokio::test]
async fn test_delete_backup_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/organizations/acme/databases/db1/branches/main/backups/X"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error_code": "not_found",
            "message": "no such backup"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = delete_backup(&context(&server), &backup_target())
        .await
        .unwrap_err();

    assert_eq!(
        err.into_declared(),
        Some(DeleteBackupError::NotFound(BranchResource {
            organization: "acme".to_string(),
            database: "db1".to_string(),
            branch: "main".to_string(),
            id: "X".to_string(),
            message: "no such backup".to_string(),
        }))
    );
}

#[tokio::test]
async fn test_delete_backup_forbidden_null_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_string("null"))
        .mount(&server)
        .await;

    let err = delete_backup(&context(&server), &backup_target())
        .await
        .unwrap_err();

    match err {
        OperationError::Declared(DeleteBackupError::Forbidden(failure)) => {
            assert_eq!(failure.id, "X");
            assert_eq!(failure.message, "");
        }
        other => panic!("expected forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_backup_server_error_is_defect() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error_code": "internal_server_error",
            "message": "Internal Server Error"
        })))
        .mount(&server)
        .await;

    let err = delete_backup(&context(&server), &backup_target())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OperationError::Defect(ApiError::Dispatch(DispatchError::UndeclaredCode { status: 500, .. }))
    ));
}

#[tokio::test]
async fn test_create_branch_unprocessable_echoes_input() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/organizations/acme/databases/db1/branches"))
        .and(body_json(json!({"name": "dev", "parent_branch": "main"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": "unprocessable_entity",
            "message": "Name has already been taken"
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
        region: None,
        seed_data: None,
    };
    let err = create_branch(&context(&server), &input).await.unwrap_err();

    match err {
        OperationError::Declared(CreateBranchError::Unprocessable(failure)) => {
            assert_eq!(failure.name, "dev");
            assert_eq!(failure.parent_branch, "main");
            assert_eq!(failure.message, "Name has already been taken");
        }
        other => panic!("expected unprocessable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_password_returns_plain_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/organizations/acme/databases/db1/branches/main/passwords"))
        .and(body_json(json!({"name": "ci", "role": "reader"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pw_1",
            "name": "ci",
            "role": "reader",
            "plain_text": "pscale_pw_abc",
            "created_at": "2024-01-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreatePasswordInput {
        organization: "acme".to_string(),
        database: "db1".to_string(),
        branch: "main".to_string(),
        name: Some("ci".to_string()),
        role: Some(PasswordRole::Reader),
        ttl: None,
    };
    let password = create_password(&context(&server), &input).await.unwrap();

    assert_eq!(password.plain_text.as_deref(), Some("pscale_pw_abc"));
}

#[tokio::test]
async fn test_enable_safe_migrations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/organizations/acme/databases/db1/branches/main/safe-migrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "br_1",
            "name": "main",
            "production": true,
            "safe_migrations": true,
            "created_at": "2024-01-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let branch = enable_safe_migrations(&context(&server), &main_branch())
        .await
        .unwrap();

    assert!(branch.safe_migrations);
}
