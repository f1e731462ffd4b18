//! # Document Model
//!
//! All editable state of the document being composed, and the operations
//! that mutate it.
//!
//! A [`Document`] stores *both* bodies at once: the check (client and line
//! items) and the report (free text). [`DocumentKind`] only selects which
//! one is displayed and exported, so switching back and forth never loses
//! what was typed into the other.
//!
//! ## Example
//!
//! ```
//! use docflow::config::DocumentDefaults;
//! use docflow::document::{Document, DocumentKind, ItemUpdate};
//!
//! let mut doc = Document::new(&DocumentDefaults::default());
//! let id = doc.add_item();
//! doc.update_item(id, ItemUpdate::Quantity(2.0));
//! doc.update_item(id, ItemUpdate::Price(100.0));
//! assert_eq!(doc.item(id).unwrap().total(), 200.0);
//!
//! doc.switch_kind(DocumentKind::Report);
//! doc.switch_kind(DocumentKind::Check);
//! assert_eq!(doc.items().len(), 2);
//! ```

mod item;

pub use item::{ItemId, ItemUpdate, LineItem, coerce_number};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DocumentDefaults;

/// Which body is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Itemized invoice.
    #[default]
    Check,
    /// Free-text report.
    Report,
}

impl DocumentKind {
    /// Lowercase tag used in file names and the API.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::Check => "check",
            DocumentKind::Report => "report",
        }
    }

    /// Parse a kind from its tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "check" => Some(DocumentKind::Check),
            "report" => Some(DocumentKind::Report),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed edit of one header field. Values are accepted as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum HeaderField {
    CompanyName(String),
    DocumentNumber(String),
    DocumentDate(String),
    /// Check only; blank means no client line is shown.
    ClientName(String),
}

/// Fields shared by both document kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub company_name: String,
    pub document_number: String,
    /// ISO date (`YYYY-MM-DD`), kept as typed.
    pub document_date: String,
}

/// The check body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CheckBody {
    pub client_name: String,
    pub items: Vec<LineItem>,
}

/// The report body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReportBody {
    pub body_text: String,
}

/// The document being composed in the current session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    active: DocumentKind,
    header: Header,
    check: CheckBody,
    report: ReportBody,
    #[serde(skip)]
    next_id: u64,
}

impl Document {
    /// Create a document from configured defaults.
    ///
    /// The check starts with the configured seed items; the report starts
    /// with the configured text (empty unless configured otherwise).
    pub fn new(defaults: &DocumentDefaults) -> Self {
        let document_date = defaults
            .document_date
            .clone()
            .unwrap_or_else(today_iso);

        let mut doc = Self {
            active: DocumentKind::Check,
            header: Header {
                company_name: defaults.company_name.clone(),
                document_number: defaults.document_number.clone(),
                document_date,
            },
            check: CheckBody {
                client_name: defaults.client_name.clone(),
                items: Vec::new(),
            },
            report: ReportBody {
                body_text: defaults.report_text.clone(),
            },
            next_id: 1,
        };

        for seed in &defaults.seed_items {
            let id = doc.issue_id();
            doc.check.items.push(LineItem::new(
                id,
                seed.name.clone(),
                seed.quantity,
                seed.unit.clone(),
                seed.price,
            ));
        }

        doc
    }

    /// A document with no items and empty text fields.
    pub fn empty() -> Self {
        Self::new(&DocumentDefaults {
            company_name: String::new(),
            document_number: String::new(),
            document_date: None,
            client_name: String::new(),
            seed_items: Vec::new(),
            report_text: String::new(),
        })
    }

    // ========== Reads ==========

    pub fn active_kind(&self) -> DocumentKind {
        self.active
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn check(&self) -> &CheckBody {
        &self.check
    }

    pub fn report(&self) -> &ReportBody {
        &self.report
    }

    /// Check items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.check.items
    }

    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.check.items.iter().find(|item| item.id() == id)
    }

    /// Client name, if one has been entered.
    pub fn client_name(&self) -> Option<&str> {
        let name = self.check.client_name.trim();
        if name.is_empty() { None } else { Some(name) }
    }

    // ========== Mutations ==========

    /// Set one header field.
    pub fn set_header(&mut self, field: HeaderField) {
        match field {
            HeaderField::CompanyName(v) => self.header.company_name = v,
            HeaderField::DocumentNumber(v) => self.header.document_number = v,
            HeaderField::DocumentDate(v) => self.header.document_date = v,
            HeaderField::ClientName(v) => self.check.client_name = v,
        }
    }

    /// Replace the report text.
    pub fn set_report_text(&mut self, text: impl Into<String>) {
        self.report.body_text = text.into();
    }

    /// Append a blank item (quantity 1, unit "pc", price 0) and return its id.
    pub fn add_item(&mut self) -> ItemId {
        let id = self.issue_id();
        self.check.items.push(LineItem::blank(id));
        id
    }

    /// Update one field of the item with `id`.
    ///
    /// Returns `false` (and changes nothing) if no item has that id.
    pub fn update_item(&mut self, id: ItemId, update: ItemUpdate) -> bool {
        match self.check.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`.
    ///
    /// Returns `false` (and changes nothing) if no item has that id.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        match self.check.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.check.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Change which body is displayed. Neither body is modified.
    pub fn switch_kind(&mut self, kind: DocumentKind) {
        self.active = kind;
    }

    fn issue_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
