//! HTTP server for the Vacation Engine.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vacation_engine::api::{AppState, create_router};
use vacation_engine::config::ConfigLoader;

const DEFAULT_POLICY_DIR: &str = "./config/vacation_policy";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let policy_dir = env::var("VACATION_POLICY_DIR").unwrap_or_else(|_| DEFAULT_POLICY_DIR.to_string());
    let addr = env::var("VACATION_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&policy_dir)?;
    info!(
        policy = %config.metadata().code,
        version = %config.metadata().version,
        cutoff_day = config.admission().monthly_cutoff_day,
        "Vacation policy loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Vacation engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
