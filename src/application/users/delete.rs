use crate::application::credentials::CredentialStore;
use crate::domain::principal::PrincipalKind;
use crate::shared::error::AppError;
use uuid::Uuid;

/// Removes a user account along with its pending codes. Used both for
/// self-service deletion and by admins.
pub struct DeleteUserUseCase {
    credentials: CredentialStore,
}

impl DeleteUserUseCase {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        self.credentials
            .delete_principal(PrincipalKind::User, id)
            .await
    }
}
