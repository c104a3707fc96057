use crate::application::credentials::CredentialStore;
use crate::domain::principal::{Principal, PrincipalKind};
use crate::domain::users::User;
use crate::shared::error::AppError;
use uuid::Uuid;

pub struct GetUserUseCase {
    credentials: CredentialStore,
}

impl GetUserUseCase {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub async fn execute(&self, id: Uuid) -> Result<User, AppError> {
        match self.credentials.find_by_id(PrincipalKind::User, id).await? {
            Some(Principal::User(user)) => Ok(user),
            _ => Err(AppError::NotFound("User")),
        }
    }
}
