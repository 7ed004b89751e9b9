//! UseCase: 確定済み出欠の参照（学生）
//!
//! 確定（DONE）時に永続化されたレコードだけを見る。進行中のセッションは参照しない。

use std::sync::Arc;

use crate::domain::{AttendanceRepository, AttendanceStatus, ClassId, Identity, Role};

use super::error::RecordedAttendanceError;

pub struct GetRecordedAttendanceUseCase {
    attendance: Arc<dyn AttendanceRepository>,
}

impl GetRecordedAttendanceUseCase {
    pub fn new(attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendance }
    }

    /// # Returns
    ///
    /// * `Ok(None)` - まだ確定されていない（レコードなし）
    pub async fn execute(
        &self,
        class_id: &ClassId,
        requester: &Identity,
    ) -> Result<Option<AttendanceStatus>, RecordedAttendanceError> {
        if requester.role != Role::Student {
            return Err(RecordedAttendanceError::NotStudent);
        }
        let record = self
            .attendance
            .find_attendance(class_id, &requester.user_id)
            .await?;
        Ok(record.map(|r| r.status))
    }
}
