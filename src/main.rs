//! Helper Kit backend
//!
//! - Axum HTTP + WebSocket API over the helper library
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   HELPER_CONFIG_PATH : path to TOML config (defaults, initial fragment, debug)
//!   HELPER_DEBUG       : "1"/"true" forces the debug flag on
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use helper_kit::config::debug_from_env;
use helper_kit::routes::build_router;
use helper_kit::state::AppState;
use helper_kit::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing(debug_from_env().unwrap_or(false));

  // Shared state: ambient fragment, helper defaults, debug console.
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "helper_kit", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "helper_kit", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "helper_kit", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
