//! UseCase: 自分の出欠確認（学生）
//!
//! 学生には確定した「出席」だけを伝える。未マーク・欠席マークはどちらも
//! 「まだ更新されていない」として扱う（欠席は確定まで訂正されうるため）。

use std::sync::Arc;

use crate::domain::{AttendanceStatus, SessionError, SessionStore, UserId};

/// 学生に返す出欠状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyAttendanceStatus {
    Present,
    NotYetUpdated,
}

/// 自分の出欠確認のユースケース
pub struct MyAttendanceUseCase {
    sessions: Arc<dyn SessionStore>,
}

impl MyAttendanceUseCase {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self, student_id: &UserId) -> Result<MyAttendanceStatus, SessionError> {
        let status = self.sessions.status_of(student_id).await?;
        Ok(match status {
            Some(AttendanceStatus::Present) => MyAttendanceStatus::Present,
            Some(AttendanceStatus::Absent) | None => MyAttendanceStatus::NotYetUpdated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClassId, SessionIdFactory, Timestamp},
        infrastructure::repository::InMemorySessionStore,
    };

    fn uid(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    async fn create_usecase() -> (MyAttendanceUseCase, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        store
            .start(
                SessionIdFactory::generate().unwrap(),
                ClassId::new("c1".to_string()).unwrap(),
                Timestamp::new(0),
            )
            .await
            .unwrap();
        (MyAttendanceUseCase::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_never_marked_is_not_yet_updated() {
        // テスト項目: 未マークの学生は「まだ更新されていない」（エラーではない）
        // given (前提条件):
        let (usecase, _) = create_usecase().await;

        // when (操作):
        let result = usecase.execute(&uid("b")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(MyAttendanceStatus::NotYetUpdated));
    }

    #[tokio::test]
    async fn test_marked_present() {
        // テスト項目: 出席マーク済みなら Present
        // given (前提条件):
        let (usecase, store) = create_usecase().await;
        store
            .mark_attendance(uid("a"), AttendanceStatus::Present)
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(&uid("a")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(MyAttendanceStatus::Present));
    }

    #[tokio::test]
    async fn test_marked_absent_reports_not_yet_updated() {
        // テスト項目: 欠席マークは「まだ更新されていない」として返される
        // given (前提条件):
        let (usecase, store) = create_usecase().await;
        store
            .mark_attendance(uid("a"), AttendanceStatus::Absent)
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(&uid("a")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(MyAttendanceStatus::NotYetUpdated));
    }

    #[tokio::test]
    async fn test_without_session() {
        // テスト項目: セッションがなければ NoActiveSession
        // given (前提条件):
        let usecase = MyAttendanceUseCase::new(Arc::new(InMemorySessionStore::new()));

        // then (期待する結果):
        assert_eq!(
            usecase.execute(&uid("a")).await,
            Err(SessionError::NoActiveSession)
        );
    }
}
