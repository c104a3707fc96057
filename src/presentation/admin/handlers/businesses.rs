use crate::application::businesses::verification::{
    SetVerificationRequest, SetVerificationUseCase,
};
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::BusinessResource;
use crate::presentation::extractors::AuthAdmin;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Change a business's verification status
#[utoipa::path(
    patch,
    path = "/api/v1/admin/businesses/{id}/verification",
    params(
        ("id" = Uuid, Path, description = "Business ID")
    ),
    request_body = SetVerificationRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<BusinessResource>),
        (status = 400, description = "Transition not allowed", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Admin / Business Verification"
)]
pub async fn set_verification(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SetVerificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = SetVerificationUseCase::new(state.businesses.clone())
        .execute(id, req)
        .await?;
    tracing::info!(admin_id = %admin.id, business_id = %id, "Verification reviewed");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(BusinessResource::from(business))),
    ))
}
