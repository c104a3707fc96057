use crate::application::auth::tokens::TokenIssuer;
use crate::domain::principal::Principal;
use crate::shared::error::AppError;

pub struct LogoutUseCase {
    tokens: TokenIssuer,
}

impl LogoutUseCase {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(skip(self, principal), fields(principal_id = %principal.id()))]
    pub async fn execute(&self, principal: &Principal) -> Result<(), AppError> {
        self.tokens.revoke(principal).await?;
        tracing::info!("Logged out");
        Ok(())
    }
}
