pub mod businesses;
pub mod users;

use crate::infrastructure::state::AppState;
use crate::presentation::middleware::auth::require_session;
use axum::{Router, middleware};

/// Admin routes. The session is resolved once here; each handler's
/// `AuthAdmin` then checks kind and role.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", users::routes())
        .nest("/businesses", businesses::routes())
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
