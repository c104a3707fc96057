use crate::application::users::delete::DeleteUserUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthAdmin;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Admin / User Management"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DeleteUserUseCase::new(state.credentials()).execute(id).await?;
    tracing::info!(admin_id = %admin.id, user_id = %id, "User deleted by admin");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(json!(null)).with_meta(json!({ "deleted": true }))),
    ))
}
