//! Domain layer for live attendance.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, Class, FinalizedSession, Identity,
    Role, Session, SessionState,
};
pub use error::{AuthError, RepositoryError, SessionError, ValueObjectError};
pub use factory::{ConnectionIdFactory, SessionIdFactory};
pub use repository::{AttendanceRepository, ClassRepository, SessionStore, TokenVerifier};
pub use value_object::{ClassId, ConnectionId, SessionId, Timestamp, UserId};
