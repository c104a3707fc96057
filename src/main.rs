use bizdir::infrastructure::auth::JwtAuthService;
use bizdir::infrastructure::clock::SystemClock;
use bizdir::infrastructure::config::AppConfig;
use bizdir::infrastructure::db;
use bizdir::infrastructure::mailer::LogMailer;
use bizdir::infrastructure::state::AppState;
use bizdir::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    run(config, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown signal received");
    })
    .await
}

fn init_tracing() {
    // try_init: tests may initialise more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "bizdir=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

async fn run<F>(config: AppConfig, shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let (listener, app, state) = bootstrap(&database_url, config).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    state.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn bootstrap(
    database_url: &str,
    config: AppConfig,
) -> anyhow::Result<(tokio::net::TcpListener, axum::Router, AppState)> {
    let pool = db::create_pool(database_url).await?;
    db::migrate(&pool).await?;

    let clock = Arc::new(SystemClock);
    let auth_service = Arc::new(JwtAuthService::new(
        &config.jwt_private_key_path,
        &config.jwt_public_key_path,
        config.access_token_expiry,
        config.refresh_token_expiry,
        clock.clone(),
    )?);

    let port = config.port;
    let state = AppState::postgres(pool, config, auth_service, Arc::new(LogMailer), clock);
    let app = presentation::router::app(state.clone())?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    Ok((listener, app, state))
}
