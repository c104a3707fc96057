use crate::presentation::admin::handlers::users;
use axum::{Router, routing::delete};

use crate::infrastructure::state::AppState;

/// Admin User Management routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{id}", delete(users::delete_user))
}
