use crate::common::TestApp;

use axum::http::StatusCode;

#[tokio::test]
async fn test_me_resolves_each_kind() {
    let app = TestApp::new();
    let user = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let business = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&user.session_cookies()))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["kind"], "user");
    assert_eq!(me.body["data"]["user"]["email"], "ada@example.com");

    let me = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(&business.session_cookies()),
        )
        .await;
    assert_eq!(me.body["data"]["kind"], "business");
    assert_eq!(me.body["data"]["business"]["email"], "shop@example.com");
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let token = session.body["data"]["accessToken"].as_str().unwrap();

    let me = app.get_with_bearer("/api/v1/auth/me", token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["kind"], "user");
}

#[tokio::test]
async fn test_missing_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_and_orphaned_tokens_look_alike() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let token = session.body["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let garbage = app.get_with_bearer("/api/v1/auth/me", "not.a.jwt").await;

    let deleted = app
        .request(
            "DELETE",
            "/api/v1/users/me",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let orphaned = app.get_with_bearer("/api/v1/auth/me", &token).await;

    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(orphaned.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body, orphaned.body);
}

#[tokio::test]
async fn test_user_token_on_business_route() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let response = app
        .request(
            "GET",
            "/api/v1/businesses/me",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.code(), "WRONG_PRINCIPAL_KIND");
}

#[tokio::test]
async fn test_business_token_on_user_route() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;

    let response = app
        .request(
            "GET",
            "/api/v1/users/me",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.code(), "WRONG_PRINCIPAL_KIND");
}

#[tokio::test]
async fn test_expired_access_token_can_be_refreshed() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;
    let cookies = session.session_cookies();

    app.clock.advance(time::Duration::minutes(16));

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&cookies))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.code(), "INVALID_OR_EXPIRED_TOKEN");

    let refreshed = app
        .request("POST", "/api/v1/auth/refresh-token", None, Some(&cookies))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["data"]["kind"], "user");
    let access = refreshed.cookie("accessToken").unwrap();
    assert!(refreshed.set_cookie("refreshToken").is_none());

    let me = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(&format!("accessToken={}", access)),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/v1/auth/refresh-token", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn test_refresh_token_expires() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;

    app.clock.advance(time::Duration::days(7) + time::Duration::seconds(1));

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh-token",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookies_and_revokes() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("businesses", "shop@example.com", "secret123")
        .await;
    let cookies = session.session_cookies();

    let logout = app
        .request("POST", "/api/v1/auth/logout", None, Some(&cookies))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    for name in ["accessToken", "refreshToken", "jwt"] {
        let cookie = logout.set_cookie(name).unwrap();
        assert!(cookie.contains("Max-Age=0"), "{}", cookie);
    }

    let refresh = app
        .request("POST", "/api/v1/auth/refresh-token", None, Some(&cookies))
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_session() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/v1/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_same_email_resolves_per_kind() {
    let app = TestApp::new();
    let user = app
        .register_and_verify("users", "both@example.com", "secret123")
        .await;
    let business = app
        .register_and_verify("businesses", "both@example.com", "secret123")
        .await;
    assert_ne!(user.principal_id(), business.principal_id());

    let as_user = app
        .request("GET", "/api/v1/auth/me", None, Some(&user.session_cookies()))
        .await;
    assert_eq!(as_user.body["data"]["kind"], "user");
    assert!(as_user.body["data"].get("business").is_none());

    let as_business = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(&business.session_cookies()),
        )
        .await;
    assert_eq!(as_business.body["data"]["kind"], "business");
    assert!(as_business.body["data"].get("user").is_none());
}
