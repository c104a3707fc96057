use crate::common::TestApp;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_update_user_profile() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let cookies = session.session_cookies();

    let updated = app
        .request(
            "PATCH",
            "/api/v1/users/me",
            Some(json!({ "name": "Ada King", "profileImage": "https://cdn.example.com/ada.png" })),
            Some(&cookies),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Ada King");
    assert_eq!(
        updated.body["data"]["profileImage"],
        "https://cdn.example.com/ada.png"
    );

    let cleared = app
        .request(
            "PATCH",
            "/api/v1/users/me",
            Some(json!({ "profileImage": "" })),
            Some(&cookies),
        )
        .await;
    assert!(cleared.body["data"]["profileImage"].is_null());
    assert_eq!(cleared.body["data"]["name"], "Ada King");
}

#[tokio::test]
async fn test_user_email_cannot_be_taken() {
    let app = TestApp::new();
    app.register_and_verify("users", "taken@example.com", "secret123")
        .await;
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let response = app
        .request(
            "PATCH",
            "/api/v1/users/me",
            Some(json!({ "email": "taken@example.com" })),
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_password_change_applies_to_login() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    app.request(
        "PATCH",
        "/api/v1/users/me",
        Some(json!({ "password": "changed4567" })),
        Some(&session.session_cookies()),
    )
    .await;

    let login = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "changed4567" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_business_profile() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;
    let cookies = session.session_cookies();

    let updated = app
        .request(
            "PATCH",
            "/api/v1/businesses/me",
            Some(json!({
                "businessType": "Service",
                "category": "Bakery",
                "photos": ["https://cdn.example.com/1.jpg"]
            })),
            Some(&cookies),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["businessType"], "Service");
    assert_eq!(updated.body["data"]["category"], "Bakery");
    assert_eq!(updated.body["data"]["photos"][0], "https://cdn.example.com/1.jpg");

    let me = app
        .request("GET", "/api/v1/businesses/me", None, Some(&cookies))
        .await;
    assert_eq!(me.body["data"]["category"], "Bakery");
}

#[tokio::test]
async fn test_public_business_view_counts() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;
    let id = session.principal_id();
    let uri = format!("/api/v1/businesses/{}", id);

    let first = app.request("GET", &uri, None, None).await;
    let second = app.request("GET", &uri, None, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["views"], 1);
    assert_eq!(second.body["data"]["views"], 2);
    assert!(second.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_public_business_view_unknown_id() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            &format!("/api/v1/businesses/{}", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_account_clears_cookies() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let deleted = app
        .request(
            "DELETE",
            "/api/v1/users/me",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.set_cookie("accessToken").unwrap().contains("Max-Age=0"));

    let login = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(login.code(), "NOT_REGISTERED");
}
