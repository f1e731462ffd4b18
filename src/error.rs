//! # Error Types
//!
//! This module defines error types used throughout the docflow library.
//! Layer-specific errors ([`ExportError`], [`RasterError`]) convert into
//! [`DocflowError`] so callers can propagate with `?`.

use thiserror::Error;

use crate::export::ExportError;
use crate::raster::RasterError;

/// Main error type for docflow operations
#[derive(Debug, Error)]
pub enum DocflowError {
    /// Core operation attempted while no operator session is active
    #[error("No active session")]
    SessionInactive,

    /// Export pipeline failure
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Rasterization or encoding failure
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup or runtime failure
    #[error("Server error: {0}")]
    Server(String),

    /// Artifact name that cannot be delivered as a plain file name
    #[error("Invalid file name: {0}")]
    InvalidFilename(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
