use crate::domain::businesses::{
    Business, BusinessRepository, UpdateBusiness, VerificationStatus,
};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetVerificationRequest {
    #[schema(example = "Verified")]
    pub status: VerificationStatus,
}

/// Admin review of a business listing.
pub struct SetVerificationUseCase {
    repo: Arc<dyn BusinessRepository>,
}

impl SetVerificationUseCase {
    pub fn new(repo: Arc<dyn BusinessRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req), fields(status = req.status.as_str()))]
    pub async fn execute(
        &self,
        id: Uuid,
        req: SetVerificationRequest,
    ) -> Result<Business, AppError> {
        let business = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Business"))?;

        if !business.verification_status.can_transition_to(req.status) {
            return Err(AppError::ValidationError(format!(
                "Cannot change verification status from {} to {}",
                business.verification_status.as_str(),
                req.status.as_str()
            )));
        }

        let updated = self
            .repo
            .update(
                id,
                UpdateBusiness {
                    verification_status: Some(req.status),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(AppError::NotFound("Business"))?;

        tracing::info!(business_id = %id, "Verification status changed");
        Ok(updated)
    }
}
