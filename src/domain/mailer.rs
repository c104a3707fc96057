use crate::domain::otp::OtpPurpose;
use async_trait::async_trait;

/// Out-of-band delivery of one-time codes.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> anyhow::Result<()>;
}
