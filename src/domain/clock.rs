use time::OffsetDateTime;

/// Source of "now" for every TTL decision (OTP expiry, token expiry).
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}
