//! Payroll estimator HTTP server.

use std::env;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;

const DEFAULT_DATA_DIR: &str = "./config/ah2025";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "payroll_engine=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting payroll engine v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = env::var("PAYROLL_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let config = ConfigLoader::load(&data_dir)
        .with_context(|| format!("failed to load payroll data from {}", data_dir))?;

    let app = create_router(AppState::new(config));

    let addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
