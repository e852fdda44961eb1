//! Stela Server
//!
//! HTTP server for the Stela credential issuer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stela_server::config::Settings;
use stela_server::create_router;
use stela_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "stela_server=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration and wire the pipeline
    let settings = Settings::load()?;
    let state = AppState::from_settings(&settings).await?;
    let app = create_router(state);

    // Start server
    let addr = settings.bind_addr();
    tracing::info!("Starting Stela issuer on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
