//! Document editing and preview handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::document::Document;
use crate::raster::{self, ImageFormat};
use crate::session::{Command, Outcome, Workspace};
use crate::totals;

use super::super::state::AppState;
use super::reject;

/// Document state plus derived totals.
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub document: Document,
    pub grand_total: f64,
    /// Grand total formatted with the configured locale.
    pub grand_total_text: String,
}

impl DocumentView {
    fn of(workspace: &Workspace) -> Self {
        let document = workspace.document().clone();
        let grand_total = totals::grand_total(document.items());
        let grand_total_text = workspace.renderer().locale().format_amount(grand_total);
        Self {
            document,
            grand_total,
            grand_total_text,
        }
    }
}

/// One command or a batch, applied in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CommandRequest {
    One(Command),
    Batch(Vec<Command>),
}

impl CommandRequest {
    fn into_vec(self) -> Vec<Command> {
        match self {
            CommandRequest::One(command) => vec![command],
            CommandRequest::Batch(commands) => commands,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub outcomes: Vec<Outcome>,
    #[serde(flatten)]
    pub view: DocumentView,
}

/// GET /api/document - Current document and totals.
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<DocumentView>, (StatusCode, String)> {
    let session = state.session.read().await;
    let workspace = session.workspace().map_err(reject)?;
    Ok(Json(DocumentView::of(workspace)))
}

/// POST /api/document/commands - Apply edits and return the new state.
pub async fn commands(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, (StatusCode, String)> {
    let mut session = state.session.write().await;
    let workspace = session.workspace_mut().map_err(reject)?;

    let outcomes = request
        .into_vec()
        .into_iter()
        .map(|command| workspace.apply(command))
        .collect();

    Ok(Json(CommandResponse {
        outcomes,
        view: DocumentView::of(workspace),
    }))
}

/// GET /api/document/preview - Displayed surface as PNG at 1×.
pub async fn preview(State(state): State<Arc<AppState>>) -> Result<Response, (StatusCode, String)> {
    let surface = {
        let session = state.session.read().await;
        session.workspace().map_err(reject)?.surface().cloned()
    };
    let Some(program) = surface else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let geometry = state.config.page;
    let png_bytes = tokio::task::spawn_blocking(move || {
        let bitmap = raster::rasterize(&program, &geometry, 1);
        raster::encode(&bitmap, ImageFormat::Png, 0)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {}", e),
        )
    })?
    .map_err(reject)?;

    Ok(([(header::CONTENT_TYPE, ImageFormat::Png.content_type())], png_bytes).into_response())
}
