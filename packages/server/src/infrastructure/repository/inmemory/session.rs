//! InMemory Session Store 実装
//!
//! プロセス全体で高々 1 つの ACTIVE セッションを保持する。
//! スロットは `tokio::sync::Mutex` で保護され、各操作が 1 つのクリティカルセクションになる。

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AttendanceStatus, AttendanceSummary, ClassId, FinalizedSession, Session, SessionError,
    SessionId, SessionStore, Timestamp, UserId,
};

/// インメモリ Session Store 実装
#[derive(Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn start(
        &self,
        session_id: SessionId,
        class_id: ClassId,
        started_at: Timestamp,
    ) -> Result<Session, SessionError> {
        let mut slot = self.slot.lock().await;
        if let Some(active) = slot.as_ref() {
            return Err(SessionError::AlreadyActive {
                active_class: active.class_id.clone(),
            });
        }

        let session = Session::new(session_id, class_id, started_at);
        *slot = Some(session.clone());
        Ok(session)
    }

    async fn current(&self) -> Option<Session> {
        self.slot.lock().await.clone()
    }

    async fn is_active(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(Session::is_active)
    }

    async fn mark_attendance(
        &self,
        student_id: UserId,
        status: AttendanceStatus,
    ) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().await;
        let session = slot.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.mark(student_id, status)
    }

    async fn summary(&self) -> Result<AttendanceSummary, SessionError> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .map(Session::summary)
            .ok_or(SessionError::NoActiveSession)
    }

    async fn status_of(
        &self,
        student_id: &UserId,
    ) -> Result<Option<AttendanceStatus>, SessionError> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .map(|session| session.status_of(student_id))
            .ok_or(SessionError::NoActiveSession)
    }

    async fn finalize_and_clear(
        &self,
        session_id: &SessionId,
        roster: &BTreeSet<UserId>,
    ) -> Result<FinalizedSession, SessionError> {
        let mut slot = self.slot.lock().await;
        let session = match slot.as_mut() {
            Some(session) if &session.id == session_id => session,
            _ => return Err(SessionError::NoActiveSession),
        };

        let finalized = session.close(roster)?;
        // Release the slot so a new session may start.
        *slot = None;
        Ok(finalized)
    }
}
