use crate::domain::businesses::Business;
use crate::domain::users::User;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which collection a principal lives in. Serialized into token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Business,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "user",
            PrincipalKind::Business => "business",
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrincipalKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(PrincipalKind::User),
            "business" => Ok(PrincipalKind::Business),
            other => Err(anyhow::anyhow!("Unknown principal kind: {}", other)),
        }
    }
}

/// An authenticated entity. Handlers match on the variant instead of probing
/// optional fields.
#[derive(Debug, Clone)]
pub enum Principal {
    User(User),
    Business(Business),
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::User(_) => PrincipalKind::User,
            Principal::Business(_) => PrincipalKind::Business,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Principal::User(u) => u.id,
            Principal::Business(b) => b.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::User(u) => &u.email,
            Principal::Business(b) => &b.email,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Principal::User(u) => &u.password_hash,
            Principal::Business(b) => &b.password_hash,
        }
    }

    pub fn refresh_token_hash(&self) -> Option<&str> {
        match self {
            Principal::User(u) => u.refresh_token_hash.as_deref(),
            Principal::Business(b) => b.refresh_token_hash.as_deref(),
        }
    }

    pub fn verified_at(&self) -> Option<OffsetDateTime> {
        match self {
            Principal::User(u) => u.verified_at,
            Principal::Business(b) => b.verified_at,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at().is_some()
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Principal::User(user)
    }
}

impl From<Business> for Principal {
    fn from(business: Business) -> Self {
        Principal::Business(business)
    }
}

/// Normalises an address before it touches a store: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
