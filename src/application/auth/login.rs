use crate::application::auth::tokens::{SessionTokens, TokenIssuer};
use crate::application::credentials::CredentialStore;
use crate::domain::principal::PrincipalKind;
use crate::shared::error::AppError;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

pub struct LoginUseCase {
    credentials: CredentialStore,
    tokens: TokenIssuer,
}

impl LoginUseCase {
    pub fn new(credentials: CredentialStore, tokens: TokenIssuer) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        kind: PrincipalKind,
        req: LoginRequest,
    ) -> Result<SessionTokens, AppError> {
        let principal = self
            .credentials
            .find_by_email(kind, &req.email)
            .await?
            .ok_or(AppError::NotRegistered)?;

        if !self.credentials.verify_secret(&principal, &req.password)? {
            return Err(AppError::InvalidCredential);
        }

        // Checked after the password so verification state is not leaked.
        if !principal.is_verified() {
            return Err(AppError::NotVerified);
        }

        self.tokens.issue_pair(&principal).await
    }
}
