//! Server state.

use tokio::sync::RwLock;

use crate::config::DocflowConfig;
use crate::export::ExportPipeline;
use crate::render::DocumentRenderer;
use crate::session::{Authenticator, Session};

use super::auth::NonEmptyCredentials;

/// Application state shared across handlers.
pub struct AppState {
    pub config: DocflowConfig,
    /// The single operator session.
    pub session: RwLock<Session>,
    pub exporter: ExportPipeline,
    pub authenticator: Box<dyn Authenticator>,
}

impl AppState {
    pub fn new(config: DocflowConfig) -> Self {
        Self::with_authenticator(config, Box::new(NonEmptyCredentials))
    }

    pub fn with_authenticator(config: DocflowConfig, authenticator: Box<dyn Authenticator>) -> Self {
        let exporter = ExportPipeline::new(config.export, config.page);

        Self {
            config,
            session: RwLock::new(Session::default()),
            exporter,
            authenticator,
        }
    }

    /// Renderer configured for this server.
    pub fn renderer(&self) -> DocumentRenderer {
        DocumentRenderer::new(
            self.config.locale.clone(),
            self.config.labels.clone(),
            self.config.page.columns,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Credentials;

    #[tokio::test]
    async fn test_new_state_is_idle() {
        let state = AppState::new(DocflowConfig::default());
        assert!(!state.session.read().await.is_active());
        assert!(!state.exporter.is_busy());
        assert!(state.authenticator.authenticate(&Credentials {
            username: "op".into(),
            password: "pw".into(),
        }));
    }
}
