//! UseCase: 出欠セッション確定（Finalizer）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FinalizeSessionUseCase::close() / persist() メソッド
//! - 名簿との突き合わせ（未マークは absent）、レコードの永続化、集計、スロットの解放
//!
//! ### なぜこのテストが必要か
//! - 出欠が永続化されるのはここだけ。確定前の状態はプロセス再起動で失われる
//! - 1 件の永続化失敗が他のレコードの保存を妨げないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：名簿全員分のレコードが保存される
//! - 異常系：一部レコードの保存失敗、クラスが見つからない、セッションがない

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{
    AttendanceRepository, ClassRepository, FinalizedSession, RepositoryError, SessionError,
    SessionStore, UserId,
};

use super::error::FinalizeError;

/// 確定結果
#[derive(Debug, Clone)]
pub struct FinalizeReport {
    pub finalized: FinalizedSession,
    /// 永続化に失敗したレコード
    pub failed: Vec<(UserId, RepositoryError)>,
}

impl FinalizeReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// セッション確定のユースケース
pub struct FinalizeSessionUseCase {
    sessions: Arc<dyn SessionStore>,
    classes: Arc<dyn ClassRepository>,
    attendance: Arc<dyn AttendanceRepository>,
}

impl FinalizeSessionUseCase {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        classes: Arc<dyn ClassRepository>,
        attendance: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            sessions,
            classes,
            attendance,
        }
    }

    /// セッションを確定する（永続化の前段）
    ///
    /// 1. 名簿を取得する（失敗時はセッションは ACTIVE のまま）
    /// 2. Session Store 内でセッションを CLOSED にしてスロットを解放する
    ///
    /// 返り値の集計はこの時点で確定しているため、呼び出し側は永続化を待たずに
    /// DONE をブロードキャストできる。
    ///
    /// # Returns
    ///
    /// * `Ok(FinalizedSession)` - CLOSED になったセッション
    /// * `Err(FinalizeError)` - 確定前に失敗
    pub async fn close(&self) -> Result<FinalizedSession, FinalizeError> {
        let session = self
            .sessions
            .current()
            .await
            .ok_or(SessionError::NoActiveSession)?;

        // 1. 名簿の取得
        let roster = match self.classes.find_enrolled_students(&session.class_id).await {
            Ok(roster) => roster,
            Err(RepositoryError::ClassNotFound(class_id)) => {
                return Err(FinalizeError::ClassNotFound(class_id));
            }
            Err(e) => return Err(FinalizeError::Repository(e)),
        };

        // 2. CLOSED への遷移とスロット解放（名簿取得中に入れ替わっていれば失敗）
        let finalized = self
            .sessions
            .finalize_and_clear(&session.id, &roster)
            .await?;
        if !finalized.unenrolled.is_empty() {
            tracing::warn!(
                session_id = %finalized.session_id,
                dropped = ?finalized.unenrolled,
                "dropped marks for students not enrolled in the class"
            );
        }

        tracing::info!(
            session_id = %finalized.session_id,
            class_id = %finalized.class_id,
            present = finalized.summary.present,
            absent = finalized.summary.absent,
            total = finalized.summary.total,
            "attendance session closed"
        );
        Ok(finalized)
    }

    /// 確定したセッションの全レコードを並行に永続化する
    ///
    /// レコードごとに独立しており、失敗はログに記録して集計するだけで他を妨げない。
    pub async fn persist(&self, finalized: FinalizedSession) -> FinalizeReport {
        let repository = &self.attendance;
        let class_id = &finalized.class_id;
        let writes = finalized.attendance.iter().map(|(student_id, status)| async move {
            let result = repository
                .record_attendance(class_id, student_id, *status)
                .await;
            (student_id, result)
        });

        let failed: Vec<(UserId, RepositoryError)> = join_all(writes)
            .await
            .into_iter()
            .filter_map(|(student_id, result)| {
                result.err().map(|e| {
                    tracing::error!(
                        %class_id,
                        %student_id,
                        error = %e,
                        "failed to persist attendance record"
                    );
                    (student_id.clone(), e)
                })
            })
            .collect();

        tracing::info!(
            session_id = %finalized.session_id,
            %class_id,
            persisted = finalized.attendance.len() - failed.len(),
            failed = failed.len(),
            "attendance records persisted"
        );

        FinalizeReport { finalized, failed }
    }
}
