use crate::application::auth::tokens::TokenIssuer;
use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch};
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
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 16, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Mails a password-reset code. Verification state does not matter here.
pub struct ForgotPasswordUseCase {
    credentials: CredentialStore,
    ledger: OtpLedger,
    mailer: Arc<dyn Mailer>,
}

impl ForgotPasswordUseCase {
    pub fn new(credentials: CredentialStore, ledger: OtpLedger, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            credentials,
            ledger,
            mailer,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        kind: PrincipalKind,
        req: ForgotPasswordRequest,
    ) -> Result<(), AppError> {
        let principal = self
            .credentials
            .find_by_email(kind, &req.email)
            .await?
            .ok_or(AppError::NotRegistered)?;

        let code = self
            .ledger
            .issue(kind, principal.email(), OtpPurpose::PasswordReset)
            .await?;
        self.mailer
            .send_otp(principal.email(), &code, OtpPurpose::PasswordReset)
            .await?;
        Ok(())
    }
}

/// Replaces the secret after a reset code checks out, then revokes any
/// outstanding refresh token.
pub struct ResetPasswordUseCase {
    credentials: CredentialStore,
    ledger: OtpLedger,
    tokens: TokenIssuer,
}

impl ResetPasswordUseCase {
    pub fn new(credentials: CredentialStore, ledger: OtpLedger, tokens: TokenIssuer) -> Self {
        Self {
            credentials,
            ledger,
            tokens,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        kind: PrincipalKind,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let principal = self
            .credentials
            .find_by_email(kind, &req.email)
            .await?
            .ok_or(AppError::NotRegistered)?;

        self.ledger
            .verify(kind, principal.email(), OtpPurpose::PasswordReset, &req.code)
            .await?;

        let principal = self
            .credentials
            .update_principal(
                kind,
                principal.id(),
                CredentialPatch {
                    password: Some(req.new_password),
                    ..Default::default()
                },
                ProfilePatch::None,
            )
            .await?;
        self.tokens.revoke(&principal).await?;

        tracing::info!(principal_id = %principal.id(), "Password reset");
        Ok(())
    }
}
