//! # Session & Workspace
//!
//! The core is only reachable while an operator session is active.
//! Activating a session creates a [`Workspace`] (document + renderer) and
//! mounts it, rendering the first surface; deactivating drops it.
//!
//! ```text
//! Unauthenticated ──activate──► Active(workspace) ──deactivate──► Unauthenticated
//! ```
//!
//! Every [`Command`] applied to a mounted workspace re-renders the surface,
//! so the surface always reflects the latest document state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DocumentDefaults;
use crate::document::{Document, DocumentKind, HeaderField, ItemId, ItemUpdate};
use crate::error::DocflowError;
use crate::ir::Program;
use crate::render::DocumentRenderer;

/// Operator credentials as submitted at login.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decides whether credentials open a session.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> bool;
}

/// One edit of the workspace document.
///
/// Wire form is tagged by `op`:
///
/// ```json
/// {"op": "update_item", "id": 2, "update": {"field": "price", "value": "150"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SwitchKind { kind: DocumentKind },
    SetHeader { header: HeaderField },
    SetReportText { text: String },
    AddItem,
    UpdateItem { id: ItemId, update: ItemUpdate },
    RemoveItem { id: ItemId },
}

/// What applying a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "id", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// A new item was appended with this id.
    Added(ItemId),
}

/// A document together with its renderer and the displayed surface.
#[derive(Debug, Clone)]
pub struct Workspace {
    document: Document,
    renderer: DocumentRenderer,
    surface: Option<Program>,
}

impl Workspace {
    /// An unmounted workspace; nothing is displayed until [`mount`](Self::mount).
    pub fn new(document: Document, renderer: DocumentRenderer) -> Self {
        Self {
            document,
            renderer,
            surface: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn renderer(&self) -> &DocumentRenderer {
        &self.renderer
    }

    /// The displayed surface, if mounted.
    pub fn surface(&self) -> Option<&Program> {
        self.surface.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Render the document and start displaying it.
    pub fn mount(&mut self) -> &Program {
        self.surface.insert(self.renderer.render(&self.document))
    }

    /// Stop displaying. Subsequent exports have nothing to capture.
    pub fn unmount(&mut self) {
        self.surface = None;
    }

    /// Apply `command`, then re-render if mounted.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let doc = &mut self.document;
        let outcome = match command {
            Command::SwitchKind { kind } => {
                doc.switch_kind(kind);
                Outcome::Applied
            }
            Command::SetHeader { header } => {
                doc.set_header(header);
                Outcome::Applied
            }
            Command::SetReportText { text } => {
                doc.set_report_text(text);
                Outcome::Applied
            }
            Command::AddItem => Outcome::Added(doc.add_item()),
            // Unknown ids are a silent no-op
            Command::UpdateItem { id, update } => {
                doc.update_item(id, update);
                Outcome::Applied
            }
            Command::RemoveItem { id } => {
                doc.remove_item(id);
                Outcome::Applied
            }
        };

        if self.is_mounted() {
            self.mount();
        }
        outcome
    }
}

/// A logged-in operator and their workspace.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    operator: String,
    started_at: chrono::DateTime<chrono::Local>,
    workspace: Workspace,
}

impl ActiveSession {
    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Local> {
        self.started_at
    }
}

/// Operator session state.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Active(ActiveSession),
}

impl Session {
    /// Start a session for `operator` with a fresh, mounted document.
    ///
    /// An already active session is replaced.
    pub fn activate(
        &mut self,
        operator: impl Into<String>,
        defaults: &DocumentDefaults,
        renderer: DocumentRenderer,
    ) {
        let operator = operator.into();
        let mut workspace = Workspace::new(Document::new(defaults), renderer);
        workspace.mount();

        tracing::info!(operator = %operator, "session activated");
        *self = Session::Active(ActiveSession {
            operator,
            started_at: chrono::Local::now(),
            workspace,
        });
    }

    /// End the session, dropping the workspace. Returns whether one was active.
    pub fn deactivate(&mut self) -> bool {
        match std::mem::take(self) {
            Session::Active(active) => {
                tracing::info!(operator = %active.operator, "session deactivated");
                true
            }
            Session::Unauthenticated => false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Session::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            Session::Active(active) => Some(active),
            Session::Unauthenticated => None,
        }
    }

    pub fn operator(&self) -> Option<&str> {
        self.active().map(ActiveSession::operator)
    }

    pub fn workspace(&self) -> Result<&Workspace, DocflowError> {
        match self {
            Session::Active(active) => Ok(&active.workspace),
            Session::Unauthenticated => Err(DocflowError::SessionInactive),
        }
    }

    pub fn workspace_mut(&mut self) -> Result<&mut Workspace, DocflowError> {
        match self {
            Session::Active(active) => Ok(&mut active.workspace),
            Session::Unauthenticated => Err(DocflowError::SessionInactive),
        }
    }
}
