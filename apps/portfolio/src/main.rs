mod config;
mod errors;
mod html;
mod llm_client;
mod page;
mod routes;
mod sections;
mod sheets;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::html::PageRenderer;
use crate::routes::build_router;
use crate::sheets::{SheetsClient, SheetsCredentials};
use crate::state::AppState;
use crate::tailoring::TailorController;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio v{}", env!("CARGO_PKG_VERSION"));

    // Sheet credentials are checked per fetch so a bad value shows the
    // checklist page instead of stopping the server.
    let credentials = SheetsCredentials {
        api_key: config.sheets_api_key.clone(),
        spreadsheet_id: config.spreadsheet_id.clone(),
    };
    if let Err(e) = credentials.validate() {
        warn!("Sheets configuration problem: {e}");
    }
    let sheets = SheetsClient::new(config.sheets_api_base.clone(), credentials)?;
    info!("Sheets client initialized ({})", config.sheets_api_base);

    let tailor = TailorController::from_config(&config)?;
    if tailor.panel().enabled {
        info!("Resume tailoring enabled (model: {})", config.gemini_model);
    }

    let renderer = PageRenderer::new()?;

    let state = AppState {
        config: config.clone(),
        sheets: Arc::new(sheets),
        tailor: Arc::new(tailor),
        renderer: Arc::new(renderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
