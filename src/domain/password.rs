use anyhow::Result;

/// Trait for password hashing and verification
pub trait PasswordHashingService: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Returns `Ok(false)` on mismatch; errors only for an unparseable stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool>;
}
