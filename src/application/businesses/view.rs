use crate::domain::businesses::{Business, BusinessRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Public profile lookup. Every successful read counts as a view.
pub struct ViewBusinessUseCase {
    repo: Arc<dyn BusinessRepository>,
}

impl ViewBusinessUseCase {
    pub fn new(repo: Arc<dyn BusinessRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<Business, AppError> {
        self.repo
            .record_view(id)
            .await?
            .ok_or(AppError::NotFound("Business"))
    }
}
