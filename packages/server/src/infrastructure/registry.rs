//! Connection registry: every live socket and the identity bound at handshake.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{ConnectionId, Identity, Timestamp};

/// Registered connection
pub struct ClientInfo {
    /// Identity resolved at handshake; never changes for the connection's lifetime
    pub identity: Identity,
    /// Outbound queue drained by the connection's send task
    pub sender: UnboundedSender<String>,
    pub connected_at: Timestamp,
}

impl ClientInfo {
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Outcome of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Set of open connections, guarded by a single mutex
#[derive(Default)]
pub struct ConnectionRegistry {
    clients: Mutex<HashMap<ConnectionId, ClientInfo>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, connection_id: ConnectionId, info: ClientInfo) {
        tracing::info!(
            %connection_id,
            user_id = %info.identity.user_id,
            role = %info.identity.role,
            "connection registered"
        );
        self.clients.lock().await.insert(connection_id, info);
    }

    /// Remove a connection. Returns `false` if it was never registered or is
    /// already gone.
    pub async fn unregister(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.clients.lock().await.remove(connection_id).is_some();
        if removed {
            tracing::info!(%connection_id, "connection unregistered");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Queue `payload` on every open connection whose identity matches `filter`.
    ///
    /// A failed send only affects that recipient: it is counted, logged and the
    /// dead connection is pruned after the pass.
    pub async fn deliver(
        &self,
        payload: &str,
        filter: impl Fn(&Identity) -> bool,
    ) -> DeliveryReport {
        let mut clients = self.clients.lock().await;
        let mut report = DeliveryReport::default();
        let mut dead = Vec::new();

        for (connection_id, info) in clients.iter() {
            if !filter(&info.identity) {
                continue;
            }
            if !info.is_open() || info.sender.send(payload.to_string()).is_err() {
                tracing::warn!(%connection_id, "failed to deliver message, dropping connection");
                report.failed += 1;
                dead.push(*connection_id);
                continue;
            }
            report.delivered += 1;
        }

        for connection_id in dead {
            clients.remove(&connection_id);
        }
        report
    }

    /// Queue `payload` on a single connection.
    pub async fn deliver_to(&self, connection_id: &ConnectionId, payload: &str) -> bool {
        let mut clients = self.clients.lock().await;
        let Some(info) = clients.get(connection_id) else {
            return false;
        };
        if info.sender.send(payload.to_string()).is_ok() {
            return true;
        }
        tracing::warn!(%connection_id, "failed to deliver reply, dropping connection");
        clients.remove(connection_id);
        false
    }
}
