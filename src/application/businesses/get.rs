use crate::application::credentials::CredentialStore;
use crate::domain::businesses::Business;
use crate::domain::principal::{Principal, PrincipalKind};
use crate::shared::error::AppError;
use uuid::Uuid;

pub struct GetBusinessUseCase {
    credentials: CredentialStore,
}

impl GetBusinessUseCase {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Business, AppError> {
        match self.credentials.find_by_id(PrincipalKind::Business, id).await? {
            Some(Principal::Business(business)) => Ok(business),
            _ => Err(AppError::NotFound("Business")),
        }
    }
}
