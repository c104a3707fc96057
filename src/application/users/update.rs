use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch};
use crate::domain::principal::{Principal, PrincipalKind};
use crate::domain::users::{UpdateUser, User};
use crate::shared::error::AppError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "newpassword123", min_length = 8)]
    pub password: Option<String>,
    /// An empty string removes the current image.
    pub profile_image: Option<String>,
}

pub struct UpdateUserUseCase {
    credentials: CredentialStore,
}

impl UpdateUserUseCase {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: Uuid, req: UpdateUserRequest) -> Result<User, AppError> {
        let profile = UpdateUser {
            name: req.name,
            profile_image: req
                .profile_image
                .map(|image| Some(image).filter(|i| !i.is_empty())),
            ..Default::default()
        };

        let updated = self
            .credentials
            .update_principal(
                PrincipalKind::User,
                id,
                CredentialPatch {
                    email: req.email,
                    password: req.password,
                    ..Default::default()
                },
                ProfilePatch::User(profile),
            )
            .await?;

        match updated {
            Principal::User(user) => Ok(user),
            Principal::Business(_) => Err(AppError::NotFound("User")),
        }
    }
}
