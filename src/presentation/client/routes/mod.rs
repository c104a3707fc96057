pub mod auth;
pub mod businesses;
pub mod users;

use crate::infrastructure::state::AppState;
use axum::Router;

pub fn routes(state: AppState) -> anyhow::Result<Router<AppState>> {
    Ok(Router::new()
        .nest("/auth", auth::routes(&state)?)
        .nest("/users", users::routes(state.clone()))
        .nest("/businesses", businesses::routes(state)))
}
