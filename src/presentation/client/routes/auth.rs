use crate::presentation::client::handlers::{business_auth, session, user_auth};
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::state::AppState;

fn credential_routes() -> Router<AppState> {
    let users = Router::new()
        .route("/register", post(user_auth::register))
        .route("/send-otp", post(user_auth::send_otp))
        .route("/verify-otp", post(user_auth::verify_otp))
        .route("/login", post(user_auth::login))
        .route("/forgot-password", post(user_auth::forgot_password))
        .route("/reset-password", post(user_auth::reset_password));

    let businesses = Router::new()
        .route("/register", post(business_auth::register))
        .route("/send-otp", post(business_auth::send_otp))
        .route("/verify-otp", post(business_auth::verify_otp))
        .route("/login", post(business_auth::login))
        .route("/forgot-password", post(business_auth::forgot_password))
        .route("/reset-password", post(business_auth::reset_password));

    Router::new()
        .nest("/users", users)
        .nest("/businesses", businesses)
}

/// Client Auth routes. Credential endpoints are rate limited per peer.
pub fn routes(state: &AppState) -> anyhow::Result<Router<AppState>> {
    let limited = credential_routes().layer(rate_limit_layer(state.config.rate_limit_per_minute)?);

    Ok(Router::new()
        .merge(limited)
        .route("/refresh-token", post(session::refresh_token))
        .route("/logout", post(session::logout))
        .route("/me", get(session::me)))
}
