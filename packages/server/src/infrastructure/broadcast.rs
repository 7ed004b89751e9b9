//! Fan-out of server messages to registered connections.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, Identity},
    infrastructure::{
        dto::websocket::ServerMessage,
        registry::{ConnectionRegistry, DeliveryReport},
    },
};

/// Serializes a message once and pushes it to a subset of the registry
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Send to every open connection.
    pub async fn broadcast_all(&self, message: &ServerMessage) -> DeliveryReport {
        self.broadcast(message, |_| true).await
    }

    /// Send to every open connection whose identity satisfies `filter`.
    pub async fn broadcast(
        &self,
        message: &ServerMessage,
        filter: impl Fn(&Identity) -> bool,
    ) -> DeliveryReport {
        let Some(json) = serialize(message) else {
            return DeliveryReport::default();
        };
        let report = self.registry.deliver(&json, filter).await;
        tracing::debug!(
            event = message.event_name(),
            delivered = report.delivered,
            failed = report.failed,
            "broadcast message"
        );
        report
    }

    /// Reply to a single connection.
    pub async fn send_to(&self, connection_id: &ConnectionId, message: &ServerMessage) -> bool {
        match serialize(message) {
            Some(json) => self.registry.deliver_to(connection_id, &json).await,
            None => false,
        }
    }
}

fn serialize(message: &ServerMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(event = message.event_name(), error = %e, "failed to serialize message");
            None
        }
    }
}
