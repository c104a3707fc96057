use crate::application::auth::login::LoginRequest;
use crate::application::auth::password_reset::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::application::auth::register::{RegisterBusinessRequest, RegisterResponse};
use crate::application::auth::send_otp::SendOtpRequest;
use crate::application::auth::verify_otp::VerifyOtpRequest;
use crate::domain::principal::PrincipalKind;
use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::auth;
use crate::presentation::dtos::{MessageResource, SessionResource};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{extract::State, response::Response};

/// Register a business account and mail a verification code
#[utoipa::path(
    post,
    operation_id = "business_register",
    path = "/api/v1/auth/businesses/register",
    request_body = RegisterBusinessRequest,
    responses(
        (status = 201, description = "Account created, verification code sent", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterBusinessRequest>,
) -> Result<Response, AppError> {
    auth::register(&state, req.into()).await
}

/// Re-send the registration code
#[utoipa::path(
    post,
    operation_id = "business_send_otp",
    path = "/api/v1/auth/businesses/send-otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Verification code sent", body = ApiResponse<MessageResource>),
        (status = 400, description = "Already verified", body = ErrorResponse),
        (status = 404, description = "Not registered", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SendOtpRequest>,
) -> Result<Response, AppError> {
    auth::send_otp(&state, PrincipalKind::Business, req).await
}

/// Verify the registration code and open a session
#[utoipa::path(
    post,
    operation_id = "business_verify_otp",
    path = "/api/v1/auth/businesses/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Verified; session cookies set", body = ApiResponse<SessionResource>),
        (status = 401, description = "Code expired or mismatched", body = ErrorResponse),
        (status = 404, description = "Not registered or no live code", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyOtpRequest>,
) -> Result<Response, AppError> {
    auth::verify_otp(&state, PrincipalKind::Business, req).await
}

/// Log in with email and password
#[utoipa::path(
    post,
    operation_id = "business_login",
    path = "/api/v1/auth/businesses/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookies set", body = ApiResponse<SessionResource>),
        (status = 401, description = "Invalid credential or not verified", body = ErrorResponse),
        (status = 404, description = "Not registered", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    auth::login(&state, PrincipalKind::Business, req).await
}

/// Mail a password reset code
#[utoipa::path(
    post,
    operation_id = "business_forgot_password",
    path = "/api/v1/auth/businesses/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset code sent", body = ApiResponse<MessageResource>),
        (status = 404, description = "Not registered", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Response, AppError> {
    auth::forgot_password(&state, PrincipalKind::Business, req).await
}

/// Set a new password using a reset code
#[utoipa::path(
    post,
    operation_id = "business_reset_password",
    path = "/api/v1/auth/businesses/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ApiResponse<MessageResource>),
        (status = 401, description = "Code expired or mismatched", body = ErrorResponse),
        (status = 404, description = "Not registered or no live code", body = ErrorResponse)
    ),
    tag = "Client / Business Auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Response, AppError> {
    auth::reset_password(&state, PrincipalKind::Business, req).await
}
