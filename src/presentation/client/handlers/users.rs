use crate::application::users::delete::DeleteUserUseCase;
use crate::application::users::get::GetUserUseCase;
use crate::application::users::update::{UpdateUserRequest, UpdateUserUseCase};
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::cleared_cookies;
use crate::presentation::dtos::UserResource;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserResource>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / User"
)]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = GetUserUseCase::new(state.credentials())
        .execute(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(UserResource::from(user)))))
}

/// Update the authenticated user's profile
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResource>),
        (status = 400, description = "Validation error or email taken", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / User"
)]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = UpdateUserUseCase::new(state.credentials())
        .execute(user.id, req)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(UserResource::from(user)))))
}

/// Delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Account deleted; session cookies cleared", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / User"
)]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    DeleteUserUseCase::new(state.credentials())
        .execute(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        cleared_cookies(&state.config),
        Json(ApiResponse::new(json!(null)).with_meta(json!({ "deleted": true }))),
    ))
}
