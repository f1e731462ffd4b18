//! # Export Pipeline
//!
//! Turns the currently displayed surface into an image file.
//!
//! ```text
//! export_current(surface)
//!     │ no surface ──────────────► Ok(None)
//!     │ busy guard held ─────────► Err(Busy)
//!     ▼
//! snapshot Program ─► spawn_blocking { rasterize ─► encode } ─► ExportArtifact
//! ```
//!
//! At most one export runs at a time. The busy guard is an RAII ticket moved
//! into the blocking task, so it is released exactly when rasterization
//! finishes, whether it succeeded or not.

mod delivery;

pub use delivery::{Delivery, DirectoryDelivery};
pub use crate::raster::ImageFormat;

use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

use crate::document::DocumentKind;
use crate::ir::Program;
use crate::raster::{self, PageGeometry, RasterError};

/// Errors raised by the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export is still in flight.
    #[error("An export is already in progress")]
    Busy,

    #[error("Rasterization failed: {0}")]
    Raster(#[from] RasterError),

    /// The blocking render task panicked or was cancelled.
    #[error("Export task failed: {0}")]
    Task(String),
}

/// Output settings for exported images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Supersampling factor.
    pub scale: usize,
    /// JPEG quality, 1-100.
    pub quality: u8,
    pub format: ImageFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale: 2,
            quality: 95,
            format: ImageFormat::Jpeg,
        }
    }
}

/// A finished export, ready for delivery.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub job_id: Uuid,
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Proof that the single export slot is held. Releases the slot on drop.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Rasterizes and encodes surfaces, one at a time.
#[derive(Debug, Clone)]
pub struct ExportPipeline {
    settings: ExportSettings,
    geometry: PageGeometry,
    busy: Arc<AtomicBool>,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new(ExportSettings::default(), PageGeometry::default())
    }
}

impl ExportPipeline {
    pub fn new(settings: ExportSettings, geometry: PageGeometry) -> Self {
        Self {
            settings,
            geometry,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Whether an export currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Take the export slot, or `None` if it is already held.
    pub fn reserve(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.busy),
            })
    }

    /// File name for an export of `kind` numbered `number`.
    pub fn filename(&self, kind: DocumentKind, number: &str) -> String {
        format!("{}-{}.{}", kind.tag(), number, self.settings.format.extension())
    }

    /// Export the displayed surface.
    ///
    /// Returns `Ok(None)` when nothing is displayed. The program is cloned
    /// before the first suspension point, so edits made while the export
    /// runs do not leak into the image.
    pub async fn export_current(
        &self,
        surface: Option<&Program>,
        kind: DocumentKind,
        number: &str,
    ) -> Result<Option<ExportArtifact>, ExportError> {
        let program = match surface {
            Some(program) if !program.is_empty() => program.clone(),
            _ => {
                tracing::debug!("export requested with no surface; skipping");
                return Ok(None);
            }
        };

        let Some(guard) = self.reserve() else {
            tracing::warn!(kind = %kind, number, "export rejected: another export in flight");
            return Err(ExportError::Busy);
        };

        let job_id = Uuid::new_v4();
        let filename = self.filename(kind, number);
        let settings = self.settings;
        let geometry = self.geometry;
        tracing::info!(%job_id, filename = %filename, scale = settings.scale, "export started");

        let started = Instant::now();
        let encoded = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let bitmap = raster::rasterize(&program, &geometry, settings.scale);
            raster::encode(&bitmap, settings.format, settings.quality)
                .map(|bytes| (bytes, bitmap.width, bitmap.height))
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?;

        let (bytes, width, height) = match encoded {
            Ok(out) => out,
            Err(e) => {
                tracing::error!(%job_id, error = %e, "export failed");
                return Err(e.into());
            }
        };

        tracing::info!(
            %job_id,
            width,
            height,
            size = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "export finished"
        );

        Ok(Some(ExportArtifact {
            job_id,
            filename,
            content_type: settings.format.content_type(),
            bytes,
            width,
            height,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Op;

    fn surface() -> Program {
        let mut program = Program::with_init();
        program.push(Op::Text("CHECK No. 001".into()));
        program.push(Op::Newline);
        program
    }

    #[tokio::test]
    async fn test_export_produces_jpeg() {
        let pipeline = ExportPipeline::default();
        let artifact = pipeline
            .export_current(Some(&surface()), DocumentKind::Check, "001")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(artifact.filename, "check-001.jpg");
        assert_eq!(artifact.content_type, "image/jpeg");
        assert_eq!(&artifact.bytes[..2], &[0xFF, 0xD8]);
        assert_eq!((artifact.width, artifact.height), (1088, 1200));
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_no_surface_is_silent() {
        let pipeline = ExportPipeline::default();
        let none = pipeline
            .export_current(None, DocumentKind::Check, "001")
            .await
            .unwrap();
        assert!(none.is_none());

        let empty = pipeline
            .export_current(Some(&Program::new()), DocumentKind::Report, "7")
            .await
            .unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_busy_rejects_second_export() {
        let pipeline = ExportPipeline::default();
        let in_flight = pipeline.reserve().unwrap();
        assert!(pipeline.is_busy());
        assert!(pipeline.reserve().is_none());

        let err = pipeline
            .export_current(Some(&surface()), DocumentKind::Check, "001")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Busy));

        drop(in_flight);
        assert!(!pipeline.is_busy());
        let ok = pipeline
            .export_current(Some(&surface()), DocumentKind::Check, "001")
            .await
            .unwrap();
        assert!(ok.is_some());
    }

    #[tokio::test]
    async fn test_no_surface_wins_over_busy() {
        let pipeline = ExportPipeline::default();
        let _in_flight = pipeline.reserve().unwrap();
        let result = pipeline
            .export_current(None, DocumentKind::Check, "001")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let pipeline = ExportPipeline::default();
        let other = pipeline.clone();
        let _guard = pipeline.reserve().unwrap();
        assert!(other.is_busy());
    }

    #[tokio::test]
    async fn test_png_settings() {
        let settings = ExportSettings {
            scale: 1,
            format: ImageFormat::Png,
            ..ExportSettings::default()
        };
        let pipeline = ExportPipeline::new(settings, PageGeometry::default());
        let artifact = pipeline
            .export_current(Some(&surface()), DocumentKind::Report, "12")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(artifact.filename, "report-12.png");
        assert_eq!((artifact.width, artifact.height), (544, 600));
    }
}
