//! Export handler.

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::super::state::AppState;
use super::reject;

/// POST /api/export - Export the displayed surface as a download.
///
/// 204 when nothing is displayed, 409 while another export is running.
pub async fn export(State(state): State<Arc<AppState>>) -> Result<Response, (StatusCode, String)> {
    // Snapshot under the read lock; rasterization runs without it.
    let (surface, kind, number) = {
        let session = state.session.read().await;
        let workspace = session.workspace().map_err(reject)?;
        let document = workspace.document();
        (
            workspace.surface().cloned(),
            document.active_kind(),
            document.header().document_number.clone(),
        )
    };

    let artifact = state
        .exporter
        .export_current(surface.as_ref(), kind, &number)
        .await
        .map_err(reject)?;

    let Some(artifact) = artifact else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.filename.replace(['"', '\\'], "_")
    ))
    .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid file name: {}", e)))?;
    let job = HeaderValue::from_str(&artifact.job_id.to_string())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
            (HeaderName::from_static("x-export-job"), job),
        ],
        artifact.bytes,
    )
        .into_response())
}
