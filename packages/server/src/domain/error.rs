//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ClassId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// ClassId validation error
    #[error("ClassId cannot be empty")]
    ClassIdEmpty,

    /// ClassId too long error
    #[error("ClassId cannot exceed {max} characters (got {actual})")]
    ClassIdTooLong { max: usize, actual: usize },

    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// SessionId invalid format error (not a valid UUID format)
    #[error("SessionId must be a valid UUID format (got: {0})")]
    SessionIdInvalidFormat(String),

    /// Role outside of `teacher` / `student`
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Errors related to the live attendance session lifecycle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session is already ACTIVE; the slot is not overwritten.
    #[error("An attendance session is already active for class {active_class}")]
    AlreadyActive { active_class: ClassId },

    /// No ACTIVE session (or the session was replaced mid-operation).
    #[error("No active attendance session")]
    NoActiveSession,

    /// Mutation attempted on a CLOSED session.
    #[error("Attendance session is closed")]
    Closed,
}

/// Errors returned by the data-access collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),

    /// A single record failed to persist.
    #[error("Failed to persist attendance record: {0}")]
    Persist(String),
}

/// Errors returned by the token verifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token missing")]
    MissingToken,

    /// Signature, expiry or encoding rejected.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token verified but its payload is not a valid identity.
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Failed to issue token: {0}")]
    Issue(String),
}
