//! UseCase: 途中集計

use std::sync::Arc;

use crate::domain::{AttendanceSummary, SessionError, SessionStore};

/// 途中集計のユースケース
pub struct TodaySummaryUseCase {
    sessions: Arc<dyn SessionStore>,
}

impl TodaySummaryUseCase {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// 現在のマークに対する present / absent / total を返す
    pub async fn execute(&self) -> Result<AttendanceSummary, SessionError> {
        self.sessions.summary().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{AttendanceStatus, ClassId, SessionIdFactory, Timestamp, UserId},
        infrastructure::repository::InMemorySessionStore,
    };

    #[tokio::test]
    async fn test_summary_over_current_marks() {
        // テスト項目: 途中集計はマーク済みの学生のみを数える
        // given (前提条件):
        let store = Arc::new(InMemorySessionStore::new());
        store
            .start(
                SessionIdFactory::generate().unwrap(),
                ClassId::new("c1".to_string()).unwrap(),
                Timestamp::new(0),
            )
            .await
            .unwrap();
        for (student, status) in [
            ("a", AttendanceStatus::Present),
            ("b", AttendanceStatus::Absent),
        ] {
            store
                .mark_attendance(UserId::new(student.to_string()).unwrap(), status)
                .await
                .unwrap();
        }
        let usecase = TodaySummaryUseCase::new(store);

        // when (操作):
        let summary = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            summary,
            AttendanceSummary {
                present: 1,
                absent: 1,
                total: 2
            }
        );
    }

    #[tokio::test]
    async fn test_summary_without_session() {
        // テスト項目: セッションがなければ NoActiveSession
        // given (前提条件):
        let usecase = TodaySummaryUseCase::new(Arc::new(InMemorySessionStore::new()));

        // then (期待する結果):
        assert_eq!(usecase.execute().await, Err(SessionError::NoActiveSession));
    }
}
