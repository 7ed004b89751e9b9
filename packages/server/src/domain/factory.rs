//! Domain factories for creating domain entities and value objects.

use super::{ConnectionId, SessionId, error::ValueObjectError};

/// Factory for generating SessionId instances.
///
/// This factory encapsulates the logic for generating new session identifiers,
/// separating the generation concern from the validation logic in SessionId.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<SessionId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        SessionId::from_uuid(uuid)
    }
}

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
