use std::sync::Arc;

use anyhow::Context;

use crm_api::app::{self, AppServices};
use crm_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    crm_observability::init(config.log_format);

    if config.default_credentials {
        tracing::warn!("CRM_USERNAME/CRM_PASSWORD not set; using insecure dev defaults");
    }

    let services = Arc::new(AppServices::connected(config.credentials.clone()).await);
    let router = app::build_app(services.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.disconnect().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
