use crate::application::credentials::{CredentialStore, Registration};
use crate::application::otp::OtpLedger;
use crate::domain::businesses::BusinessType;
use crate::domain::mailer::Mailer;
use crate::domain::otp::OtpPurpose;
use crate::domain::principal::PrincipalKind;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "secret123", min_length = 8)]
    pub password: String,
    pub profile_image: Option<String>,
}

impl From<RegisterUserRequest> for Registration {
    fn from(req: RegisterUserRequest) -> Self {
        Registration::User {
            name: req.name,
            email: req.email,
            password: req.password,
            profile_image: req.profile_image,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBusinessRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Ada's Bakery")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub business_type: BusinessType,
    #[validate(length(min = 5, max = 32, message = "Invalid contact number"))]
    #[schema(example = "+15550100")]
    pub contact_number: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,
}

impl From<RegisterBusinessRequest> for Registration {
    fn from(req: RegisterBusinessRequest) -> Self {
        Registration::Business {
            name: req.name,
            email: req.email,
            password: req.password,
            business_type: req.business_type,
            contact_number: req.contact_number,
            address: req.address,
            description: req.description,
            category: req.category,
            website: req.website,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub principal_id: Uuid,
    pub kind: PrincipalKind,
    pub email: String,
}

/// Creates an unverified principal and mails it a registration code. No
/// session is issued here; that waits for code verification.
pub struct RegisterUseCase {
    credentials: CredentialStore,
    ledger: OtpLedger,
    mailer: Arc<dyn Mailer>,
}

impl RegisterUseCase {
    pub fn new(credentials: CredentialStore, ledger: OtpLedger, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            credentials,
            ledger,
            mailer,
        }
    }

    #[tracing::instrument(skip(self, registration), fields(kind = %registration.kind()))]
    pub async fn execute(&self, registration: Registration) -> Result<RegisterResponse, AppError> {
        let principal = self.credentials.create_principal(registration).await?;

        let code = self
            .ledger
            .issue(principal.kind(), principal.email(), OtpPurpose::Registration)
            .await?;
        self.mailer
            .send_otp(principal.email(), &code, OtpPurpose::Registration)
            .await?;

        Ok(RegisterResponse {
            principal_id: principal.id(),
            kind: principal.kind(),
            email: principal.email().to_string(),
        })
    }
}
