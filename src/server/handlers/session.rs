//! Session handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::session::{Credentials, Session};

use super::super::state::AppState;

/// Session status as reported to the client.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub active: bool,
    pub operator: Option<String>,
    /// RFC 3339 start time.
    pub started_at: Option<String>,
}

impl SessionInfo {
    fn of(session: &Session) -> Self {
        match session.active() {
            Some(active) => Self {
                active: true,
                operator: Some(active.operator().to_string()),
                started_at: Some(active.started_at().to_rfc3339()),
            },
            None => Self {
                active: false,
                operator: None,
                started_at: None,
            },
        }
    }
}

/// POST /api/session/login - Authenticate and start a fresh session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionInfo>, (StatusCode, String)> {
    if !state.authenticator.authenticate(&credentials) {
        tracing::warn!(username = %credentials.username, "login rejected");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()));
    }

    let mut session = state.session.write().await;
    session.activate(
        credentials.username.trim(),
        &state.config.defaults,
        state.renderer(),
    );
    Ok(Json(SessionInfo::of(&session)))
}

/// POST /api/session/logout - End the session and drop its document.
pub async fn logout(State(state): State<Arc<AppState>>) -> Json<SessionInfo> {
    let mut session = state.session.write().await;
    session.deactivate();
    Json(SessionInfo::of(&session))
}

/// GET /api/session - Current session status.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<SessionInfo> {
    let session = state.session.read().await;
    Json(SessionInfo::of(&session))
}
