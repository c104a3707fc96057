use crate::presentation::client::handlers::businesses;
use crate::presentation::middleware::auth::require_session;
use axum::{Router, middleware, routing::get};

use crate::infrastructure::state::AppState;

/// Client Business routes. Only `/me` requires a session.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(businesses::get_me).patch(businesses::update_me),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session))
        .route("/{id}", get(businesses::get_business))
}
