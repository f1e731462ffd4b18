//! # HTTP Server
//!
//! JSON API for composing a document and exporting it.
//!
//! ## Usage
//!
//! ```bash
//! docflow serve --listen 0.0.0.0:8080 --config docflow.toml
//! ```
//!
//! ## Routes
//!
//! | Method | Path                      | Purpose                               |
//! |--------|---------------------------|---------------------------------------|
//! | POST   | `/api/session/login`      | Start a session                       |
//! | POST   | `/api/session/logout`     | End the session                       |
//! | GET    | `/api/session`            | Session status                        |
//! | GET    | `/api/document`           | Document and totals                   |
//! | POST   | `/api/document/commands`  | Apply one command or a batch          |
//! | GET    | `/api/document/preview`   | Displayed surface as PNG              |
//! | POST   | `/api/export`             | Download the surface as JPEG          |
//!
//! Everything under `/api/document` and `/api/export` answers 401 without
//! an active session.

mod auth;
mod handlers;
mod state;

pub use auth::NonEmptyCredentials;
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::DocflowConfig;
use crate::error::DocflowError;

/// Build the API router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Session API
        .route("/api/session", get(handlers::session::status))
        .route("/api/session/login", post(handlers::session::login))
        .route("/api/session/logout", post(handlers::session::logout))
        // Document API
        .route("/api/document", get(handlers::document::get))
        .route("/api/document/commands", post(handlers::document::commands))
        .route("/api/document/preview", get(handlers::document::preview))
        // Export API
        .route("/api/export", post(handlers::export::export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use docflow::config::DocflowConfig;
/// use docflow::server::serve;
///
/// # async fn example() -> Result<(), docflow::error::DocflowError> {
/// serve(DocflowConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: DocflowConfig) -> Result<(), DocflowError> {
    let listen_addr = config.server.listen_addr.clone();
    let app = router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| DocflowError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    tracing::info!(addr = %listen_addr, "docflow server listening");
    println!("Docflow HTTP server listening on: {}", listen_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| DocflowError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
