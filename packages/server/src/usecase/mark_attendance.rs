//! UseCase: 出欠マーク
//!
//! 教師が学生の出欠を記録する。同じ学生への再マークは上書き（訂正）として扱う。

use std::sync::Arc;

use crate::domain::{AttendanceStatus, SessionError, SessionStore, UserId};

/// 出欠マークのユースケース
pub struct MarkAttendanceUseCase {
    sessions: Arc<dyn SessionStore>,
}

impl MarkAttendanceUseCase {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// 出欠マークを実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 記録成功（ブロードキャストは呼び出し側が行う）
    /// * `Err(SessionError::NoActiveSession)` - ACTIVE なセッションがない
    pub async fn execute(
        &self,
        student_id: UserId,
        status: AttendanceStatus,
    ) -> Result<(), SessionError> {
        tracing::debug!(%student_id, status = status.as_str(), "marking attendance");
        self.sessions.mark_attendance(student_id, status).await
    }
}
