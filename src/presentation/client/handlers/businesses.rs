use crate::application::businesses::get::GetBusinessUseCase;
use crate::application::businesses::update::{UpdateBusinessRequest, UpdateBusinessUseCase};
use crate::application::businesses::view::ViewBusinessUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::BusinessResource;
use crate::presentation::extractors::AuthBusiness;
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

/// Get the authenticated business's profile
#[utoipa::path(
    get,
    path = "/api/v1/businesses/me",
    responses(
        (status = 200, description = "Business profile", body = ApiResponse<BusinessResource>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a business", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / Business"
)]
pub async fn get_me(
    State(state): State<AppState>,
    AuthBusiness(business): AuthBusiness,
) -> Result<impl IntoResponse, AppError> {
    let business = GetBusinessUseCase::new(state.credentials())
        .execute(business.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(BusinessResource::from(business))),
    ))
}

/// Update the authenticated business's profile
#[utoipa::path(
    patch,
    path = "/api/v1/businesses/me",
    request_body = UpdateBusinessRequest,
    responses(
        (status = 200, description = "Business updated", body = ApiResponse<BusinessResource>),
        (status = 400, description = "Validation error or email taken", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a business", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / Business"
)]
pub async fn update_me(
    State(state): State<AppState>,
    AuthBusiness(business): AuthBusiness,
    ValidatedJson(req): ValidatedJson<UpdateBusinessRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = UpdateBusinessUseCase::new(state.credentials())
        .execute(business.id, req)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(BusinessResource::from(business))),
    ))
}

/// Public business profile. Each read increments the view counter.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{id}",
    params(
        ("id" = Uuid, Path, description = "Business ID")
    ),
    responses(
        (status = 200, description = "Business profile", body = ApiResponse<BusinessResource>),
        (status = 404, description = "Business not found", body = ErrorResponse)
    ),
    tag = "Client / Business"
)]
pub async fn get_business(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let business = ViewBusinessUseCase::new(state.businesses.clone())
        .execute(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(BusinessResource::from(business))),
    ))
}
