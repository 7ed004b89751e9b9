//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{AuthError, ClassId, RepositoryError, SessionError, ValueObjectError};

/// セッション開始時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StartSessionError {
    #[error("Forbidden, teacher access required")]
    NotTeacher,

    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),

    #[error("Forbidden, not class teacher")]
    NotClassTeacher,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    InvalidId(#[from] ValueObjectError),
}

/// セッション確定時のエラー（確定前に失敗したもの）
///
/// 個々のレコードの永続化失敗はここには含まれず、`FinalizeReport` に集計される。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinalizeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Class not found")]
    ClassNotFound(ClassId),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 接続時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

/// 確定済み出欠の参照時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordedAttendanceError {
    #[error("Forbidden, student access required")]
    NotStudent,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
