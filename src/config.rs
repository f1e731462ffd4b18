//! # Configuration
//!
//! Runtime configuration for the server and the CLI. Every section has a
//! default, so an empty (or missing) TOML file yields a working setup:
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8080"
//!
//! [defaults]
//! company_name = "StroyProekt LLC"
//! document_number = "001"
//!
//! [locale]
//! thousands_separator = ","
//! decimal_separator = "."
//! currency = "$"
//! currency_position = "prefix"
//!
//! [export]
//! scale = 2
//! quality = 95
//! format = "jpeg"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::DocflowError;
use crate::export::ExportSettings;
use crate::raster::PageGeometry;
use crate::render::Labels;
use crate::totals::Locale;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocflowConfig {
    pub server: ServerConfig,
    pub defaults: DocumentDefaults,
    pub locale: Locale,
    pub labels: Labels,
    pub page: PageGeometry,
    pub export: ExportSettings,
}

impl DocflowConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, DocflowError> {
        toml::from_str(text).map_err(|e| DocflowError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DocflowError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DocflowError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Load from `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, DocflowError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Initial values for a freshly created document.
///
/// These are implementation-chosen starting points, not part of any
/// contract: a new session starts from them and the operator edits freely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentDefaults {
    pub company_name: String,
    pub document_number: String,
    /// ISO date; `None` means "today" in local time.
    pub document_date: Option<String>,
    pub client_name: String,
    /// Items present when the document is created.
    pub seed_items: Vec<SeedItem>,
    pub report_text: String,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            company_name: "StroyProekt LLC".to_string(),
            document_number: "001".to_string(),
            document_date: None,
            client_name: String::new(),
            seed_items: vec![SeedItem {
                name: "Cement M400".to_string(),
                quantity: 10.0,
                unit: "t".to_string(),
                price: 5000.0,
            }],
            report_text: String::new(),
        }
    }
}

/// One pre-filled line item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
}
