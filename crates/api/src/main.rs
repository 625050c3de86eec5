use anyhow::Context;
use chrono::Duration;

use scribe_api::app::{build_app, AppState};
use scribe_auth::Hs256Jwt;
use scribe_infra::{Database, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    scribe_observability::init();

    let settings = Settings::from_env()?;

    let db = Database::connect(&settings.database).await?;
    db.migrate().await.context("failed to create database schema")?;

    let ttl = Duration::try_minutes(settings.jwt.ttl_minutes)
        .context("ACCESS_TOKEN_EXPIRE_MINUTES is out of range")?;
    let jwt = Hs256Jwt::new(settings.jwt.secret.as_bytes(), ttl);
    let app = build_app(AppState::new(db.clone(), jwt));

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.pool().close().await;
    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
