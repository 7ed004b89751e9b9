//! Server state shared by every handler.

use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::{AttendanceRepository, ClassRepository, SessionStore, TokenVerifier},
    infrastructure::{broadcast::Broadcaster, registry::ConnectionRegistry},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Session Store（プロセス内で高々 1 つの ACTIVE セッション）
    pub sessions: Arc<dyn SessionStore>,
    /// Data-access collaborators
    pub classes: Arc<dyn ClassRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub token_verifier: Arc<dyn TokenVerifier>,
    /// Open sockets; shared with the broadcaster
    pub registry: Arc<ConnectionRegistry>,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        classes: Arc<dyn ClassRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        Self {
            sessions,
            classes,
            attendance,
            token_verifier,
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
        }
    }
}
