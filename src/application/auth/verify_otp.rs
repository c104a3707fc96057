use crate::application::auth::tokens::{SessionTokens, TokenIssuer};
use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch};
use crate::application::otp::OtpLedger;
use crate::domain::clock::Clock;
use crate::domain::otp::OtpPurpose;
use crate::domain::principal::PrincipalKind;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(length(min = 1, max = 16, message = "Code is required"))]
    #[schema(example = "K7Q2M9XA")]
    pub code: String,
}

/// Confirms a registration code, marks the principal verified and opens its
/// first session.
pub struct VerifyOtpUseCase {
    credentials: CredentialStore,
    ledger: OtpLedger,
    tokens: TokenIssuer,
    clock: Arc<dyn Clock>,
}

impl VerifyOtpUseCase {
    pub fn new(
        credentials: CredentialStore,
        ledger: OtpLedger,
        tokens: TokenIssuer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            ledger,
            tokens,
            clock,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        kind: PrincipalKind,
        req: VerifyOtpRequest,
    ) -> Result<SessionTokens, AppError> {
        let principal = self
            .credentials
            .find_by_email(kind, &req.email)
            .await?
            .ok_or(AppError::NotRegistered)?;

        self.ledger
            .verify(kind, principal.email(), OtpPurpose::Registration, &req.code)
            .await?;

        let principal = if principal.is_verified() {
            principal
        } else {
            tracing::info!(principal_id = %principal.id(), "Principal verified");
            self.credentials
                .update_principal(
                    kind,
                    principal.id(),
                    CredentialPatch {
                        verified_at: Some(self.clock.now()),
                        ..Default::default()
                    },
                    ProfilePatch::None,
                )
                .await?
        };

        self.tokens.issue_pair(&principal).await
    }
}
