use crate::domain::auth::TokenError;
use crate::domain::otp::OtpError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("An account with this email already exists")]
    DuplicateIdentity,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("No account is registered for this email")]
    NotRegistered,
    #[error("Verification code has expired")]
    OtpExpired,
    #[error("Verification code does not match")]
    OtpMismatch,
    #[error("Invalid email or password")]
    InvalidCredential,
    #[error("Account has not been verified")]
    NotVerified,
    #[error("Authentication token not found")]
    TokenNotFound,
    /// Signature, claim or expiry failure. Every cause renders identically.
    #[error("Invalid or expired token")]
    InvalidOrExpired(TokenError),
    #[error("This resource is not available to this account type")]
    WrongPrincipalKind,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::DuplicateIdentity => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NotRegistered => StatusCode::NOT_FOUND,
            AppError::OtpExpired
            | AppError::OtpMismatch
            | AppError::InvalidCredential
            | AppError::NotVerified
            | AppError::TokenNotFound
            | AppError::InvalidOrExpired(_) => StatusCode::UNAUTHORIZED,
            AppError::WrongPrincipalKind | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable identifier for clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NotRegistered => "NOT_REGISTERED",
            AppError::OtpExpired => "OTP_EXPIRED",
            AppError::OtpMismatch => "OTP_MISMATCH",
            AppError::InvalidCredential => "INVALID_CREDENTIAL",
            AppError::NotVerified => "NOT_VERIFIED",
            AppError::TokenNotFound => "TOKEN_NOT_FOUND",
            AppError::InvalidOrExpired(_) => "INVALID_OR_EXPIRED_TOKEN",
            AppError::WrongPrincipalKind => "WRONG_PRINCIPAL_KIND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::NotFound => AppError::NotFound("Verification code"),
            OtpError::Expired => AppError::OtpExpired,
            OtpError::Mismatch => AppError::OtpMismatch,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::InvalidOrExpired(err)
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Internal detail of a 500, attached as a response extension. Only the
/// development layer copies it into the body.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, detail) = match &self {
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                ("Internal server error".to_string(), Some(format!("{:?}", e)))
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                ("Internal server error".to_string(), Some(format!("{:?}", e)))
            }
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            success: false,
            code: self.code().to_string(),
            message,
            detail: None,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(detail) = detail {
            response
                .extensions_mut()
                .insert(InternalErrorDetail(detail));
        }
        response
    }
}
