use crate::presentation::admin::handlers::businesses;
use axum::{Router, routing::patch};

use crate::infrastructure::state::AppState;

/// Admin Business Verification routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{id}/verification", patch(businesses::set_verification))
}
