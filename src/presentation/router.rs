use crate::presentation::openapi::ApiDoc;
use crate::presentation::{admin, client, handlers, middleware as mw};
use axum::{Router, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::state::AppState;

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = mw::cors::cors_layer(&state.config)?;
    let development = !state.config.environment.is_production();

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", client::routes::routes(state.clone())?)
        .nest("/api/v1/admin", admin::routes::routes(state.clone()));

    if development {
        router = router.layer(middleware::from_fn(mw::error_detail::expose_error_detail));
    }

    Ok(router
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
