use anyhow::{Context, Result};
use tenant_locale_web::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tenant_locale_web=info".parse()?),
        )
        .init();

    info!("Starting tenant-locale-web");

    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Fails when the default locale's messages are missing
    let state = server::build_fs_state(&config)
        .await
        .context("Failed to initialize locale resolution")?;

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("✓ Listening on {}", addr);
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
