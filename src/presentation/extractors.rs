use crate::domain::businesses::Business;
use crate::domain::principal::{Principal, PrincipalKind};
use crate::domain::users::User;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{ACCESS_COOKIE, read_cookie};
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

/// Access token from the `accessToken` cookie, falling back to an
/// `Authorization: Bearer` header. The cookie wins when both are present.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, ACCESS_COOKIE).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Any authenticated principal. Reuses the principal resolved by
/// `require_session` when that middleware ran, otherwise resolves it here.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthPrincipal(principal.clone()));
        }

        let token = access_token(&parts.headers);
        let principal = state.session_resolver().resolve(token.as_deref()).await?;
        parts.extensions.insert(principal.clone());
        Ok(AuthPrincipal(principal))
    }
}

/// Authenticated principal that must be a user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthPrincipal(principal) = AuthPrincipal::from_request_parts(parts, state).await?;
        match principal {
            Principal::User(user) => Ok(AuthUser(user)),
            Principal::Business(b) => {
                tracing::debug!(principal_id = %b.id, required = %PrincipalKind::User, "Wrong principal kind");
                Err(AppError::WrongPrincipalKind)
            }
        }
    }
}

/// Authenticated principal that must be a business.
#[derive(Debug, Clone)]
pub struct AuthBusiness(pub Business);

impl FromRequestParts<AppState> for AuthBusiness {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthPrincipal(principal) = AuthPrincipal::from_request_parts(parts, state).await?;
        match principal {
            Principal::Business(business) => Ok(AuthBusiness(business)),
            Principal::User(u) => {
                tracing::debug!(principal_id = %u.id, required = %PrincipalKind::Business, "Wrong principal kind");
                Err(AppError::WrongPrincipalKind)
            }
        }
    }
}

/// A user holding the admin role.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub User);

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }
        Ok(AuthAdmin(user))
    }
}
