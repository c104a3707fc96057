use crate::presentation::client::handlers::users;
use crate::presentation::middleware::auth::require_session;
use axum::{Router, middleware, routing::get};

use crate::infrastructure::state::AppState;

/// Client User routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::get_me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
