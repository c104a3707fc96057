use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch};
use crate::domain::businesses::{Business, BusinessType, UpdateBusiness};
use crate::domain::principal::{Principal, PrincipalKind};
use crate::shared::error::AppError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Optional text fields accept an empty string to clear the stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub business_type: Option<BusinessType>,
    #[validate(length(min = 5, max = 32, message = "Invalid contact number"))]
    pub contact_number: Option<String>,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub photos: Option<Vec<String>>,
}

fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| Some(v).filter(|v| !v.is_empty()))
}

pub struct UpdateBusinessUseCase {
    credentials: CredentialStore,
}

impl UpdateBusinessUseCase {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        id: Uuid,
        req: UpdateBusinessRequest,
    ) -> Result<Business, AppError> {
        let profile = UpdateBusiness {
            name: req.name,
            business_type: req.business_type,
            contact_number: req.contact_number,
            address: req.address,
            description: clearable(req.description),
            category: clearable(req.category),
            website: clearable(req.website),
            logo: clearable(req.logo),
            photos: req.photos,
            ..Default::default()
        };

        let updated = self
            .credentials
            .update_principal(
                PrincipalKind::Business,
                id,
                CredentialPatch {
                    email: req.email,
                    password: req.password,
                    ..Default::default()
                },
                ProfilePatch::Business(profile),
            )
            .await?;

        match updated {
            Principal::Business(business) => Ok(business),
            Principal::User(_) => Err(AppError::NotFound("Business")),
        }
    }
}
