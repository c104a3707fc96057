use crate::domain::principal::PrincipalKind;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Default code length and alphabet.
pub const OTP_LENGTH: usize = 8;
pub const OTP_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Default validity window in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(OtpPurpose::Registration),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            other => Err(anyhow::anyhow!("Unknown OTP purpose: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub principal_kind: PrincipalKind,
    pub address: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub issued_at: OffsetDateTime,
    pub consumed_at: Option<OffsetDateTime>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: OffsetDateTime, ttl_secs: i64) -> bool {
        now - self.issued_at > time::Duration::seconds(ttl_secs)
    }
}

#[derive(Debug, Clone)]
pub struct NewOtp {
    pub principal_kind: PrincipalKind,
    pub address: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub issued_at: OffsetDateTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("No pending code for this address")]
    NotFound,
    #[error("Code has expired")]
    Expired,
    #[error("Code does not match")]
    Mismatch,
}

#[async_trait]
pub trait OtpRepository: Send + Sync {
    async fn create(&self, otp: NewOtp) -> Result<OtpRecord, anyhow::Error>;

    /// Most recently issued unconsumed code for the address and purpose.
    async fn find_live(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, anyhow::Error>;

    /// Marks a record consumed if it is still unconsumed. Returns `false` when
    /// another caller got there first.
    async fn consume(&self, id: Uuid, at: OffsetDateTime) -> Result<bool, anyhow::Error>;

    /// Marks every unconsumed code for the address and purpose as consumed.
    async fn supersede(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
        at: OffsetDateTime,
    ) -> Result<u64, anyhow::Error>;

    async fn delete_by_address(
        &self,
        kind: PrincipalKind,
        address: &str,
    ) -> Result<u64, anyhow::Error>;
}

/// Generates a code of `length` characters drawn from [`OTP_CHARSET`].
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| OTP_CHARSET[rng.random_range(0..OTP_CHARSET.len())] as char)
        .collect()
}
