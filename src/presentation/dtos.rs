use crate::application::auth::tokens::{RefreshedAccess, SessionTokens};
use crate::domain::businesses::{Business, BusinessType, VerificationStatus};
use crate::domain::principal::{Principal, PrincipalKind};
use crate::domain::users::{User, UserRole};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// User as returned to clients. Secrets and token hashes never leave the
/// server.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile_image: Option<String>,
    pub verified: bool,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            verified: user.verified_at.is_some(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile_image: user.profile_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessResource {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub business_type: BusinessType,
    pub contact_number: String,
    pub address: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub photos: Vec<String>,
    pub verification_status: VerificationStatus,
    pub views: i64,
    pub verified: bool,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Business> for BusinessResource {
    fn from(business: Business) -> Self {
        Self {
            verified: business.verified_at.is_some(),
            id: business.id,
            name: business.name,
            email: business.email,
            business_type: business.business_type,
            contact_number: business.contact_number,
            address: business.address,
            description: business.description,
            category: business.category,
            website: business.website,
            logo: business.logo,
            photos: business.photos,
            verification_status: business.verification_status,
            views: business.views,
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

/// The caller's principal, tagged by kind. Exactly one of `user` and
/// `business` is present.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrincipalResource {
    pub kind: PrincipalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessResource>,
}

impl From<Principal> for PrincipalResource {
    fn from(principal: Principal) -> Self {
        match principal {
            Principal::User(user) => Self {
                kind: PrincipalKind::User,
                user: Some(user.into()),
                business: None,
            },
            Principal::Business(business) => Self {
                kind: PrincipalKind::Business,
                user: None,
                business: Some(business.into()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResource {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub principal: PrincipalResource,
}

impl From<SessionTokens> for SessionResource {
    fn from(session: SessionTokens) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: session.access_expires_in,
            refresh_expires_in: session.refresh_expires_in,
            principal: session.principal.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResource {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub kind: PrincipalKind,
}

impl From<RefreshedAccess> for AccessTokenResource {
    fn from(refreshed: RefreshedAccess) -> Self {
        Self {
            access_token: refreshed.access_token,
            token_type: "Bearer".to_string(),
            expires_in: refreshed.access_expires_in,
            kind: refreshed.principal.kind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResource {
    pub message: String,
}

impl MessageResource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
