//! # Docflow - Check and Report Composer
//!
//! Docflow composes two kinds of business documents and exports them as
//! images:
//!
//! - **Checks**: itemized invoices with client, line items and a grand total
//! - **Reports**: free text under the same header
//!
//! ## Pipeline
//!
//! ```text
//! Document ──render──► Program (IR) ──rasterize──► Bitmap ──encode──► JPEG
//!    ▲                     │
//!    └── Command           └── displayed surface, captured by exports
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use docflow::{
//!     config::DocumentDefaults,
//!     document::{Document, ItemUpdate},
//!     export::ExportPipeline,
//!     render::DocumentRenderer,
//! };
//!
//! # async fn example() -> Result<(), docflow::DocflowError> {
//! let mut doc = Document::new(&DocumentDefaults::default());
//! let id = doc.add_item();
//! doc.update_item(id, ItemUpdate::Name("Sand".into()));
//! doc.update_item(id, ItemUpdate::price_input("1200"));
//!
//! let surface = DocumentRenderer::default().render(&doc);
//! let artifact = ExportPipeline::default()
//!     .export_current(Some(&surface), doc.active_kind(), &doc.header().document_number)
//!     .await?;
//!
//! if let Some(artifact) = artifact {
//!     std::fs::write(&artifact.filename, &artifact.bytes)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Document model and mutations |
//! | [`totals`] | Line and grand totals, number formatting |
//! | [`render`] | Document → IR projection |
//! | [`components`] | Declarative building blocks of the sheet |
//! | [`ir`] | Drawing opcodes |
//! | [`raster`] | IR → bitmap → JPEG/PNG |
//! | [`export`] | Single-flight export pipeline and delivery |
//! | [`session`] | Operator session, workspace and commands |
//! | [`server`] | HTTP API |
//! | [`config`] | TOML configuration |
//! | [`error`] | Error types |

pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod ir;
pub mod raster;
pub mod render;
pub mod server;
pub mod session;
pub mod totals;

// Re-exports for convenience
pub use config::DocflowConfig;
pub use document::{Document, DocumentKind};
pub use error::DocflowError;
pub use export::{ExportArtifact, ExportPipeline};
pub use render::DocumentRenderer;
pub use session::{Command, Session};
