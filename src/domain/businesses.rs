use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BusinessType {
    Product,
    Service,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Product => "Product",
            BusinessType::Service => "Service",
        }
    }
}

impl std::str::FromStr for BusinessType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Product" => Ok(BusinessType::Product),
            "Service" => Ok(BusinessType::Service),
            other => Err(anyhow::anyhow!("Unknown business type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Rejected => "Rejected",
        }
    }

    /// Admin review transitions. A rejected business may be re-queued or
    /// approved directly; a verified one can only be revoked.
    pub fn can_transition_to(&self, next: VerificationStatus) -> bool {
        use VerificationStatus::*;
        matches!(
            (self, next),
            (Pending, Verified)
                | (Pending, Rejected)
                | (Rejected, Pending)
                | (Rejected, Verified)
                | (Verified, Rejected)
        )
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(VerificationStatus::Pending),
            "Verified" => Ok(VerificationStatus::Verified),
            "Rejected" => Ok(VerificationStatus::Rejected),
            other => Err(anyhow::anyhow!("Unknown verification status: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
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
    pub refresh_token_hash: Option<String>,
    pub verified_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub business_type: BusinessType,
    pub contact_number: String,
    pub address: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBusiness {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub business_type: Option<BusinessType>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub logo: Option<Option<String>>,
    pub photos: Option<Vec<String>>,
    pub verification_status: Option<VerificationStatus>,
    pub refresh_token_hash: Option<Option<String>>,
    pub verified_at: Option<OffsetDateTime>,
}

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, new_business: NewBusiness) -> Result<Business, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Business>, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdateBusiness,
    ) -> Result<Option<Business>, anyhow::Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;
    /// Bumps the view counter and returns the updated record.
    async fn record_view(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error>;
}
