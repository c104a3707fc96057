use crate::domain::principal::PrincipalKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,
    /// Collection the subject lives in
    pub kind: PrincipalKind,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    pub fn new(
        principal_id: Uuid,
        kind: PrincipalKind,
        token_type: TokenType,
        issued_at: OffsetDateTime,
        expiry_seconds: i64,
    ) -> Self {
        let now = issued_at.unix_timestamp();
        Self {
            sub: principal_id.to_string(),
            kind,
            iat: now,
            exp: now + expiry_seconds,
            token_type,
        }
    }

    pub fn principal_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

/// What a verified token vouches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSubject {
    pub principal_id: Uuid,
    pub kind: PrincipalKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Token is invalid")]
    Invalid,
}

/// Signs and validates tokens. Expiry is judged against the service's clock.
pub trait AuthService: Send + Sync {
    fn generate_token(
        &self,
        principal_id: Uuid,
        kind: PrincipalKind,
        token_type: TokenType,
    ) -> anyhow::Result<String>;

    /// Checks signature, expiry and that the token is of `expected` type.
    fn validate_token(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError>;

    fn access_token_expiry(&self) -> i64;

    fn refresh_token_expiry(&self) -> i64;
}
