pub mod businesses;
pub mod memory;
pub mod otps;
pub mod users;

/// Raised by in-memory stores where Postgres would raise a unique violation.
#[derive(Debug, thiserror::Error)]
#[error("duplicate key value violates unique constraint \"{0}\"")]
pub struct DuplicateKey(pub &'static str);

/// True when a repository error is a unique-constraint violation, whichever
/// backend produced it.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    if err.downcast_ref::<DuplicateKey>().is_some() {
        return true;
    }
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}
