//! Collaborator interfaces consumed by the use cases.
//!
//! The domain layer defines the traits; `infrastructure` provides the
//! implementations (dependency inversion).

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, Class, ClassId, FinalizedSession,
    Identity, Session, SessionId, Timestamp, UserId,
    error::{AuthError, RepositoryError, SessionError},
};

/// Holder of the single process-wide live session.
///
/// Every method is one critical section: implementations serialize all access
/// so that no two mutations of the session interleave.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Claim the slot for a new ACTIVE session.
    ///
    /// Fails with `SessionError::AlreadyActive` instead of overwriting.
    async fn start(
        &self,
        session_id: SessionId,
        class_id: ClassId,
        started_at: Timestamp,
    ) -> Result<Session, SessionError>;

    /// Snapshot of the active session, if any.
    async fn current(&self) -> Option<Session>;

    /// Whether an ACTIVE session holds the slot, without cloning it.
    async fn is_active(&self) -> bool;

    async fn mark_attendance(
        &self,
        student_id: UserId,
        status: AttendanceStatus,
    ) -> Result<(), SessionError>;

    async fn summary(&self) -> Result<AttendanceSummary, SessionError>;

    async fn status_of(&self, student_id: &UserId)
    -> Result<Option<AttendanceStatus>, SessionError>;

    /// Close the session identified by `session_id` against `roster` and free the slot.
    ///
    /// Fails with `SessionError::NoActiveSession` if the slot is empty or holds
    /// a different session.
    async fn finalize_and_clear(
        &self,
        session_id: &SessionId,
        roster: &BTreeSet<UserId>,
    ) -> Result<FinalizedSession, SessionError>;
}

/// Read access to classes and their enrolment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn find_class_by_id(&self, class_id: &ClassId) -> Result<Option<Class>, RepositoryError>;

    async fn find_enrolled_students(
        &self,
        class_id: &ClassId,
    ) -> Result<BTreeSet<UserId>, RepositoryError>;
}

/// Durable attendance records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Append one record. Records are never updated in place.
    async fn record_attendance(
        &self,
        class_id: &ClassId,
        student_id: &UserId,
        status: AttendanceStatus,
    ) -> Result<(), RepositoryError>;

    /// Latest persisted record for a student in a class.
    async fn find_attendance(
        &self,
        class_id: &ClassId,
        student_id: &UserId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError>;
}

/// Bearer credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}
