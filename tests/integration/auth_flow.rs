use crate::common::{self, TestApp};

use axum::http::StatusCode;
use bizdir::domain::otp::OtpPurpose;
use serde_json::json;

#[tokio::test]
async fn test_user_register_verify_login() {
    let app = TestApp::new();

    let registered = app
        .post(
            "/api/v1/auth/users/register",
            common::user_registration("ada@example.com", "secret123"),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["data"]["kind"], "user");
    assert_eq!(registered.body["data"]["email"], "ada@example.com");
    assert!(registered.set_cookies.is_empty());

    let verified = app
        .post(
            "/api/v1/auth/users/verify-otp",
            json!({
                "email": "ada@example.com",
                "code": app.last_code("ada@example.com", OtpPurpose::Registration)
            }),
        )
        .await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.body["data"]["tokenType"], "Bearer");
    assert_eq!(verified.body["data"]["principal"]["kind"], "user");
    assert_eq!(verified.body["data"]["principal"]["user"]["verified"], true);

    let login = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body["data"]["accessToken"].is_string());
    assert_eq!(
        login.cookie("accessToken").as_deref(),
        login.body["data"]["accessToken"].as_str()
    );
}

#[tokio::test]
async fn test_business_register_verify_login() {
    let app = TestApp::new();
    app.register_and_verify("businesses", "shop@example.com", "secret123")
        .await;

    let login = app
        .post(
            "/api/v1/auth/businesses/login",
            json!({ "email": "shop@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["data"]["principal"]["kind"], "business");
    assert_eq!(
        login.body["data"]["principal"]["business"]["verificationStatus"],
        "Pending"
    );
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = TestApp::new();
    let verified = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let access = verified.set_cookie("accessToken").unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("SameSite=Strict"));
    assert!(access.contains("Path=/"));
    assert!(access.contains("Max-Age=900"));
    assert!(!access.contains("Secure"));

    let refresh = verified.set_cookie("refreshToken").unwrap();
    assert!(refresh.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_login_before_verification_is_rejected() {
    let app = TestApp::new();
    app.post(
        "/api/v1/auth/users/register",
        common::user_registration("ada@example.com", "secret123"),
    )
    .await;

    let login = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.code(), "NOT_VERIFIED");
    assert!(login.set_cookies.is_empty());
}

#[tokio::test]
async fn test_login_errors() {
    let app = TestApp::new();
    app.register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let wrong_password = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "nottheone" }),
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.code(), "INVALID_CREDENTIAL");

    let unknown = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "nobody@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.code(), "NOT_REGISTERED");

    // A user account is not a business account.
    let other_kind = app
        .post(
            "/api/v1/auth/businesses/login",
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(other_kind.code(), "NOT_REGISTERED");
}

#[tokio::test]
async fn test_duplicate_registration() {
    let app = TestApp::new();
    let body = common::user_registration("ada@example.com", "secret123");
    app.post("/api/v1/auth/users/register", body.clone()).await;

    let again = app.post("/api/v1/auth/users/register", body).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.code(), "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_registration_validation() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/users/register",
            json!({ "name": "Ada", "email": "not-an-email", "password": "short" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_resent_code_supersedes_previous() {
    let app = TestApp::new();
    app.post(
        "/api/v1/auth/users/register",
        common::user_registration("ada@example.com", "secret123"),
    )
    .await;
    let first = app.last_code("ada@example.com", OtpPurpose::Registration);

    let resend = app
        .post(
            "/api/v1/auth/users/send-otp",
            json!({ "email": "ada@example.com" }),
        )
        .await;
    assert_eq!(resend.status, StatusCode::OK);
    let second = app.last_code("ada@example.com", OtpPurpose::Registration);

    let stale = app
        .post(
            "/api/v1/auth/users/verify-otp",
            json!({ "email": "ada@example.com", "code": first }),
        )
        .await;
    if first != second {
        assert_eq!(stale.code(), "OTP_MISMATCH");
    }

    let fresh = app
        .post(
            "/api/v1/auth/users/verify-otp",
            json!({ "email": "ada@example.com", "code": second }),
        )
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_send_otp_to_verified_account() {
    let app = TestApp::new();
    app.register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let response = app
        .post(
            "/api/v1/auth/users/send-otp",
            json!({ "email": "ada@example.com" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let app = TestApp::new();
    app.post(
        "/api/v1/auth/businesses/register",
        common::business_registration("shop@example.com", "secret123"),
    )
    .await;
    let code = app.last_code("shop@example.com", OtpPurpose::Registration);

    app.clock.advance(time::Duration::minutes(10) + time::Duration::seconds(1));

    let response = app
        .post(
            "/api/v1/auth/businesses/verify-otp",
            json!({ "email": "shop@example.com", "code": code }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "OTP_EXPIRED");
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    let session = app
        .register_and_verify("users", "ada@example.com", "secret123")
        .await;

    let forgot = app
        .post(
            "/api/v1/auth/users/forgot-password",
            json!({ "email": "ada@example.com" }),
        )
        .await;
    assert_eq!(forgot.status, StatusCode::OK);

    let reset = app
        .post(
            "/api/v1/auth/users/reset-password",
            json!({
                "email": "ada@example.com",
                "code": app.last_code("ada@example.com", OtpPurpose::PasswordReset),
                "newPassword": "brandnew789"
            }),
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK);

    // The old refresh token no longer works.
    let refresh = app
        .request(
            "POST",
            "/api/v1/auth/refresh-token",
            None,
            Some(&session.session_cookies()),
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    let old = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(old.code(), "INVALID_CREDENTIAL");

    let new = app
        .post(
            "/api/v1/auth/users/login",
            json!({ "email": "ada@example.com", "password": "brandnew789" }),
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_credential_routes_are_rate_limited() {
    let config = bizdir::infrastructure::config::AppConfig {
        rate_limit_per_minute: 2,
        ..Default::default()
    };
    let app = TestApp::with_config(config);
    let body = json!({ "email": "nobody@example.com", "password": "secret123" });

    app.post("/api/v1/auth/users/login", body.clone()).await;
    app.post("/api/v1/auth/users/login", body.clone()).await;
    let limited = app.post("/api/v1/auth/users/login", body).await;

    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
}
