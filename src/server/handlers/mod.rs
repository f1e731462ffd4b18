//! HTTP handlers for the server.

pub mod document;
pub mod export;
pub mod session;

use axum::http::StatusCode;

use crate::error::DocflowError;
use crate::export::ExportError;

/// Map an error to the status code and message returned to the client.
pub(super) fn reject(err: impl Into<DocflowError>) -> (StatusCode, String) {
    let err = err.into();
    let status = match &err {
        DocflowError::SessionInactive => StatusCode::UNAUTHORIZED,
        DocflowError::Export(ExportError::Busy) => StatusCode::CONFLICT,
        DocflowError::InvalidFilename(_) | DocflowError::Config(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, err.to_string())
}
