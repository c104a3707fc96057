use crate::domain::clock::Clock;
use crate::domain::otp::{NewOtp, OtpError, OtpPurpose, OtpRepository, generate_code};
use crate::domain::principal::{PrincipalKind, normalize_email};
use crate::shared::error::AppError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Short-lived verification codes keyed by (kind, address, purpose).
#[derive(Clone)]
pub struct OtpLedger {
    repo: Arc<dyn OtpRepository>,
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
    code_length: usize,
}

impl OtpLedger {
    pub fn new(
        repo: Arc<dyn OtpRepository>,
        clock: Arc<dyn Clock>,
        ttl_secs: i64,
        code_length: usize,
    ) -> Self {
        Self {
            repo,
            clock,
            ttl_secs,
            code_length,
        }
    }

    /// Persists a fresh code and returns it for delivery. Earlier live codes
    /// for the same address and purpose stop being accepted.
    #[tracing::instrument(skip(self))]
    pub async fn issue(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
    ) -> Result<String, AppError> {
        let address = normalize_email(address);
        let now = self.clock.now();

        let superseded = self.repo.supersede(kind, &address, purpose, now).await?;
        if superseded > 0 {
            tracing::debug!(superseded, "Earlier codes superseded");
        }

        let code = generate_code(self.code_length);
        self.repo
            .create(NewOtp {
                principal_kind: kind,
                address,
                code: code.clone(),
                purpose,
                issued_at: now,
            })
            .await?;

        Ok(code)
    }

    /// Checks `candidate` against the live code and consumes it on success.
    #[tracing::instrument(skip(self, candidate))]
    pub async fn verify(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
        candidate: &str,
    ) -> Result<(), AppError> {
        let address = normalize_email(address);
        let now = self.clock.now();

        let record = self
            .repo
            .find_live(kind, &address, purpose)
            .await?
            .ok_or(OtpError::NotFound)?;

        if record.is_expired(now, self.ttl_secs) {
            return Err(OtpError::Expired.into());
        }

        if !codes_match(&record.code, candidate) {
            return Err(OtpError::Mismatch.into());
        }

        // Lost race with a concurrent verification of the same code.
        if !self.repo.consume(record.id, now).await? {
            return Err(OtpError::NotFound.into());
        }

        Ok(())
    }

    pub async fn clear(&self, kind: PrincipalKind, address: &str) -> Result<u64, AppError> {
        Ok(self
            .repo
            .delete_by_address(kind, &normalize_email(address))
            .await?)
    }
}

fn codes_match(stored: &str, candidate: &str) -> bool {
    let candidate = candidate.trim().to_ascii_uppercase();
    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}
