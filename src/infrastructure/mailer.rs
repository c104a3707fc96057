use crate::domain::mailer::Mailer;
use crate::domain::otp::OtpPurpose;
use async_trait::async_trait;
use std::sync::Mutex;

/// Delivery that only writes to the log. Stands in for an SMTP relay and
/// records who was sent a code, never the code.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(&self, to: &str, _code: &str, purpose: OtpPurpose) -> anyhow::Result<()> {
        tracing::info!(recipient = %to, purpose = purpose.as_str(), "One-time code dispatched");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOtp {
    pub to: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

/// Keeps every message in memory so tests can read back delivered codes.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentOtp>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentOtp> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Latest code sent to `to` for `purpose`.
    pub fn last_code(&self, to: &str, purpose: OtpPurpose) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|m| m.to == to && m.purpose == purpose)
            .map(|m| m.code.clone())
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentOtp {
                to: to.to_string(),
                code: code.to_string(),
                purpose,
            });
        Ok(())
    }
}
