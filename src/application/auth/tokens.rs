use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch};
use crate::domain::auth::{AuthService, TokenError, TokenSubject, TokenType};
use crate::domain::principal::Principal;
use crate::shared::error::AppError;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Generate SHA-256 hash of a token string
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `token` hashes to the stored refresh hash, compared in constant time.
fn refresh_hash_matches(stored: Option<&str>, token: &str) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    stored.as_bytes().ct_eq(hash_token(token).as_bytes()).into()
}

/// A freshly minted access/refresh pair and the principal it belongs to.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub principal: Principal,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Result of a refresh: a new access token, refresh token untouched.
#[derive(Debug, Clone)]
pub struct RefreshedAccess {
    pub principal: Principal,
    pub access_token: String,
    pub access_expires_in: i64,
}

/// Mints and checks access/refresh tokens. The hash of the latest refresh
/// token lives on the principal record so a later issuance revokes it.
#[derive(Clone)]
pub struct TokenIssuer {
    auth_service: Arc<dyn AuthService>,
    credentials: CredentialStore,
}

impl TokenIssuer {
    pub fn new(auth_service: Arc<dyn AuthService>, credentials: CredentialStore) -> Self {
        Self {
            auth_service,
            credentials,
        }
    }

    pub fn issue_access_token(&self, principal: &Principal) -> Result<String, AppError> {
        Ok(self
            .auth_service
            .generate_token(principal.id(), principal.kind(), TokenType::Access)?)
    }

    /// Mints a refresh token and stores its hash on the principal. Returns the
    /// token and the principal as persisted.
    pub async fn issue_refresh_token(
        &self,
        principal: &Principal,
    ) -> Result<(String, Principal), AppError> {
        let token = self.auth_service.generate_token(
            principal.id(),
            principal.kind(),
            TokenType::Refresh,
        )?;

        let updated = self
            .credentials
            .update_principal(
                principal.kind(),
                principal.id(),
                CredentialPatch {
                    refresh_token_hash: Some(Some(hash_token(&token))),
                    ..Default::default()
                },
                ProfilePatch::None,
            )
            .await?;

        Ok((token, updated))
    }

    #[tracing::instrument(skip(self, principal), fields(principal_id = %principal.id(), kind = %principal.kind()))]
    pub async fn issue_pair(&self, principal: &Principal) -> Result<SessionTokens, AppError> {
        let access_token = self.issue_access_token(principal)?;
        let (refresh_token, principal) = self.issue_refresh_token(principal).await?;

        tracing::info!("Session tokens issued");
        Ok(SessionTokens {
            principal,
            access_token,
            refresh_token,
            access_expires_in: self.auth_service.access_token_expiry(),
            refresh_expires_in: self.auth_service.refresh_token_expiry(),
        })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<TokenSubject, TokenError> {
        self.verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenSubject, TokenError> {
        self.verify(token, TokenType::Refresh)
    }

    fn verify(&self, token: &str, token_type: TokenType) -> Result<TokenSubject, TokenError> {
        let claims = self.auth_service.validate_token(token, token_type)?;
        Ok(TokenSubject {
            principal_id: claims.principal_id()?,
            kind: claims.kind,
        })
    }

    /// Exchanges a live refresh token for a new access token. The refresh
    /// token must still be the one recorded on the principal.
    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AppError> {
        let subject = self.verify_refresh_token(refresh_token)?;

        let principal = self
            .credentials
            .find_by_id(subject.kind, subject.principal_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(principal_id = %subject.principal_id, "Refresh for missing principal");
                AppError::InvalidOrExpired(TokenError::Invalid)
            })?;

        if !refresh_hash_matches(principal.refresh_token_hash(), refresh_token) {
            tracing::warn!(principal_id = %subject.principal_id, "Refresh token revoked or superseded");
            return Err(AppError::InvalidOrExpired(TokenError::Invalid));
        }

        let access_token = self.issue_access_token(&principal)?;
        Ok(RefreshedAccess {
            principal,
            access_token,
            access_expires_in: self.auth_service.access_token_expiry(),
        })
    }

    /// Forgets the stored refresh token so no outstanding copy can be used.
    pub async fn revoke(&self, principal: &Principal) -> Result<(), AppError> {
        self.credentials
            .update_principal(
                principal.kind(),
                principal.id(),
                CredentialPatch {
                    refresh_token_hash: Some(None),
                    ..Default::default()
                },
                ProfilePatch::None,
            )
            .await?;
        Ok(())
    }
}
