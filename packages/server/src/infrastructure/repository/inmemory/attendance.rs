//! InMemory Attendance Repository 実装
//!
//! 出欠レコードを追記専用の Vec に保存する。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AttendanceRecord, AttendanceRepository, AttendanceStatus, ClassId, RepositoryError, UserId,
};

/// インメモリ Attendance Repository 実装
#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    records: Mutex<Vec<AttendanceRecord>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub async fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn record_attendance(
        &self,
        class_id: &ClassId,
        student_id: &UserId,
        status: AttendanceStatus,
    ) -> Result<(), RepositoryError> {
        self.records.lock().await.push(AttendanceRecord {
            class_id: class_id.clone(),
            student_id: student_id.clone(),
            status,
        });
        Ok(())
    }

    async fn find_attendance(
        &self,
        class_id: &ClassId,
        student_id: &UserId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .rev()
            .find(|r| &r.class_id == class_id && &r.student_id == student_id)
            .cloned())
    }
}
