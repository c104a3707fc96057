use crate::common::TestApp;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_admin_reviews_business() {
    let app = TestApp::new();
    let admin = app.admin_session("root@example.com").await;
    let business = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;
    let uri = format!(
        "/api/v1/admin/businesses/{}/verification",
        business.principal_id()
    );

    let approved = app
        .request("PATCH", &uri, Some(json!({ "status": "Verified" })), Some(&admin))
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["data"]["verificationStatus"], "Verified");

    let requeued = app
        .request("PATCH", &uri, Some(json!({ "status": "Pending" })), Some(&admin))
        .await;
    assert_eq!(requeued.status, StatusCode::BAD_REQUEST);
    assert_eq!(requeued.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let app = TestApp::new();
    let user = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let business = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;
    let uri = format!(
        "/api/v1/admin/businesses/{}/verification",
        business.principal_id()
    );
    let body = json!({ "status": "Verified" });

    let as_user = app
        .request("PATCH", &uri, Some(body.clone()), Some(&user.session_cookies()))
        .await;
    assert_eq!(as_user.status, StatusCode::FORBIDDEN);
    assert_eq!(as_user.code(), "FORBIDDEN");

    let as_business = app
        .request("PATCH", &uri, Some(body.clone()), Some(&business.session_cookies()))
        .await;
    assert_eq!(as_business.status, StatusCode::FORBIDDEN);
    assert_eq!(as_business.code(), "WRONG_PRINCIPAL_KIND");

    let anonymous = app.request("PATCH", &uri, Some(body), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_deletes_user() {
    let app = TestApp::new();
    let admin = app.admin_session("root@example.com").await;
    let user = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let uri = format!("/api/v1/admin/users/{}", user.principal_id());

    let deleted = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&user.session_cookies()))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let again = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_unknown_user() {
    let app = TestApp::new();
    let admin = app.admin_session("root@example.com").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/admin/users/{}", Uuid::new_v4()),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
