//! reqres checks against the in-process mock

mod common;

use common::MockServer;
use restprobe_e2e::reqres::{JOB_NAME, JOB_TITLE, PAGE_TWO_EMAILS};
use restprobe_e2e::{E2eError, ReqresChecks};

#[tokio::test]
async fn list_users_page_two_passes() {
    let server = MockServer::start().await;
    let checks = ReqresChecks::with_client(server.client());

    let page = checks.list_users_page_two().await.unwrap();
    assert_eq!(page.page, 2);
    for email in PAGE_TWO_EMAILS {
        assert!(page.data.iter().any(|u| u.email == email));
    }
}

#[tokio::test]
async fn list_users_missing_email_fails_assertion() {
    let server = MockServer::start().await;
    server.reqres.lock().unwrap().drop_email = Some("tobias.funke@reqres.in".to_string());
    let checks = ReqresChecks::with_client(server.client());

    let err = checks.list_users_page_two().await.unwrap_err();
    match err {
        E2eError::AssertionFailed(msg) => assert!(msg.contains("tobias.funke@reqres.in")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn single_user_is_janet() {
    let server = MockServer::start().await;
    let checks = ReqresChecks::with_client(server.client());

    let user = checks.single_user().await.unwrap();
    assert_eq!(user.data.id, 2);
    assert_eq!(user.data.first_name, "Janet");
    assert_eq!(user.data.last_name, "Weaver");
}

#[tokio::test]
async fn single_user_not_found_expects_404() {
    let server = MockServer::start().await;
    let checks = ReqresChecks::with_client(server.client());

    checks.single_user_not_found().await.unwrap();
}

#[tokio::test]
async fn single_user_not_found_rejects_other_status() {
    let server = MockServer::start().await;
    server.reqres.lock().unwrap().missing_user_status = Some(200);
    let checks = ReqresChecks::with_client(server.client());

    assert!(matches!(
        checks.single_user_not_found().await,
        Err(E2eError::UnexpectedStatus { expected: 404, actual: 200, .. })
    ));
}

#[tokio::test]
async fn create_user_with_job_echoes_fields() {
    let server = MockServer::start().await;
    let checks = ReqresChecks::with_client(server.client());

    let created = checks.create_user_with_job().await.unwrap();
    assert_eq!(created.name, JOB_NAME);
    assert_eq!(created.job, JOB_TITLE);
    assert!(!created.id.is_empty());
}

#[tokio::test]
async fn wrong_base_path_is_request_failure() {
    let server = MockServer::start().await;
    let client = restprobe_e2e::ApiClient::new(
        &format!("{}/nowhere", server.base_url),
        std::time::Duration::from_secs(5),
    )
    .unwrap();
    let checks = ReqresChecks::with_client(client);

    assert!(matches!(
        checks.single_user().await,
        Err(E2eError::RequestFailure { status: Some(404), .. })
    ));
}
