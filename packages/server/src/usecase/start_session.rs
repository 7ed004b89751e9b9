//! UseCase: 出欠セッション開始
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - StartSessionUseCase::execute() メソッド
//! - クラスの存在確認、担当教師の確認、セッションスロットの確保
//!
//! ### どのような状況を想定しているか
//! - 正常系：担当教師によるセッション開始
//! - 異常系：学生による開始、担当外の教師、存在しないクラス、既に ACTIVE なセッション

use std::sync::Arc;

use rollcall_shared::time::get_jst_timestamp;

use crate::domain::{
    ClassId, ClassRepository, Identity, Session, SessionIdFactory, SessionStore, Timestamp,
};

use super::error::StartSessionError;

/// セッション開始のユースケース
pub struct StartSessionUseCase {
    classes: Arc<dyn ClassRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl StartSessionUseCase {
    pub fn new(classes: Arc<dyn ClassRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { classes, sessions }
    }

    /// セッション開始を実行
    ///
    /// # Arguments
    ///
    /// * `class_id` - 出欠を取るクラス
    /// * `requester` - 認証済みのリクエスト送信者
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 開始された ACTIVE セッション
    /// * `Err(StartSessionError)` - 開始失敗
    pub async fn execute(
        &self,
        class_id: ClassId,
        requester: &Identity,
    ) -> Result<Session, StartSessionError> {
        if !requester.is_teacher() {
            return Err(StartSessionError::NotTeacher);
        }

        // 1. クラスの存在と担当教師の確認
        let class = self
            .classes
            .find_class_by_id(&class_id)
            .await?
            .ok_or_else(|| StartSessionError::ClassNotFound(class_id.clone()))?;
        if !class.is_taught_by(&requester.user_id) {
            return Err(StartSessionError::NotClassTeacher);
        }

        // 2. スロットの確保（既に ACTIVE なら失敗）
        let session_id = SessionIdFactory::generate()?;
        let session = self
            .sessions
            .start(session_id, class_id, Timestamp::new(get_jst_timestamp()))
            .await?;

        tracing::info!(
            session_id = %session.id,
            class_id = %session.class_id,
            teacher_id = %requester.user_id,
            "attendance session started"
        );
        Ok(session)
    }
}
