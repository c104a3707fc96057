use crate::application::credentials::CredentialStore;
use crate::application::otp::OtpLedger;
use crate::domain::mailer::Mailer;
use crate::domain::otp::OtpPurpose;
use crate::domain::principal::PrincipalKind;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Re-sends a registration code to a principal that has not verified yet.
pub struct SendOtpUseCase {
    credentials: CredentialStore,
    ledger: OtpLedger,
    mailer: Arc<dyn Mailer>,
}

impl SendOtpUseCase {
    pub fn new(credentials: CredentialStore, ledger: OtpLedger, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            credentials,
            ledger,
            mailer,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, kind: PrincipalKind, req: SendOtpRequest) -> Result<(), AppError> {
        let principal = self
            .credentials
            .find_by_email(kind, &req.email)
            .await?
            .ok_or(AppError::NotRegistered)?;

        if principal.is_verified() {
            return Err(AppError::ValidationError(
                "Account is already verified".to_string(),
            ));
        }

        let code = self
            .ledger
            .issue(kind, principal.email(), OtpPurpose::Registration)
            .await?;
        self.mailer
            .send_otp(principal.email(), &code, OtpPurpose::Registration)
            .await?;
        Ok(())
    }
}
