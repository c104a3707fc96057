use crate::infrastructure::state::AppState;
use crate::presentation::extractors::access_token;
use crate::shared::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Resolves the caller once per request and stores the [`Principal`] in the
/// request extensions for the guards downstream.
///
/// [`Principal`]: crate::domain::principal::Principal
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = access_token(request.headers());
    let principal = state.session_resolver().resolve(token.as_deref()).await?;

    tracing::debug!(principal_id = %principal.id(), kind = %principal.kind(), "Session resolved");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
