//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod finalize_session;
pub mod get_recorded_attendance;
pub mod mark_attendance;
pub mod my_attendance;
pub mod start_session;
pub mod today_summary;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, FinalizeError, RecordedAttendanceError, StartSessionError};
pub use finalize_session::{FinalizeReport, FinalizeSessionUseCase};
pub use get_recorded_attendance::GetRecordedAttendanceUseCase;
pub use mark_attendance::MarkAttendanceUseCase;
pub use my_attendance::{MyAttendanceStatus, MyAttendanceUseCase};
pub use start_session::StartSessionUseCase;
pub use today_summary::TodaySummaryUseCase;
