//! Flow steps shared by the user and business auth routes. The per-kind
//! handlers only fix the [`PrincipalKind`].

use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::password_reset::{
    ForgotPasswordRequest, ForgotPasswordUseCase, ResetPasswordRequest, ResetPasswordUseCase,
};
use crate::application::auth::send_otp::{SendOtpRequest, SendOtpUseCase};
use crate::application::auth::verify_otp::{VerifyOtpRequest, VerifyOtpUseCase};
use crate::application::credentials::Registration;
use crate::application::auth::register::RegisterUseCase;
use crate::domain::principal::PrincipalKind;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::session_cookies;
use crate::presentation::dtos::{MessageResource, SessionResource};
use crate::shared::error::AppError;
use crate::shared::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub(crate) async fn register(
    state: &AppState,
    registration: Registration,
) -> Result<Response, AppError> {
    let use_case = RegisterUseCase::new(
        state.credentials(),
        state.otp_ledger(),
        state.mailer.clone(),
    );
    let registered = use_case.execute(registration).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(registered)))
        .into_response())
}

pub(crate) async fn send_otp(
    state: &AppState,
    kind: PrincipalKind,
    req: SendOtpRequest,
) -> Result<Response, AppError> {
    let use_case = SendOtpUseCase::new(
        state.credentials(),
        state.otp_ledger(),
        state.mailer.clone(),
    );
    use_case.execute(kind, req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(MessageResource::new(
            "Verification code sent",
        ))),
    )
        .into_response())
}

pub(crate) async fn verify_otp(
    state: &AppState,
    kind: PrincipalKind,
    req: VerifyOtpRequest,
) -> Result<Response, AppError> {
    let use_case = VerifyOtpUseCase::new(
        state.credentials(),
        state.otp_ledger(),
        state.token_issuer(),
        state.clock.clone(),
    );
    let session = use_case.execute(kind, req).await?;

    let cookies = session_cookies(&state.config, &session);
    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::new(SessionResource::from(session))),
    )
        .into_response())
}

pub(crate) async fn login(
    state: &AppState,
    kind: PrincipalKind,
    req: LoginRequest,
) -> Result<Response, AppError> {
    let use_case = LoginUseCase::new(state.credentials(), state.token_issuer());
    let session = use_case.execute(kind, req).await?;

    let cookies = session_cookies(&state.config, &session);
    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::new(SessionResource::from(session))),
    )
        .into_response())
}

pub(crate) async fn forgot_password(
    state: &AppState,
    kind: PrincipalKind,
    req: ForgotPasswordRequest,
) -> Result<Response, AppError> {
    let use_case = ForgotPasswordUseCase::new(
        state.credentials(),
        state.otp_ledger(),
        state.mailer.clone(),
    );
    use_case.execute(kind, req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(MessageResource::new(
            "Password reset code sent",
        ))),
    )
        .into_response())
}

pub(crate) async fn reset_password(
    state: &AppState,
    kind: PrincipalKind,
    req: ResetPasswordRequest,
) -> Result<Response, AppError> {
    let use_case = ResetPasswordUseCase::new(
        state.credentials(),
        state.otp_ledger(),
        state.token_issuer(),
    );
    use_case.execute(kind, req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(MessageResource::new(
            "Password has been reset",
        ))),
    )
        .into_response())
}
