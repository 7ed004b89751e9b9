//! WebSocket message DTOs for live attendance.
//!
//! Both directions use the envelope `{"event": <NAME>, "data": {...}}`.

use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceStatus, AttendanceSummary, Role};

/// Error message for frames that are not a valid envelope or payload
pub const INVALID_MESSAGE_FORMAT: &str = "Invalid message format";
/// Error message when no session is ACTIVE
pub const NO_ACTIVE_SESSION: &str = "No active attendance session";
/// Error message for a failed handshake
pub const UNAUTHORIZED: &str = "Unauthorized, token missing or invalid";
/// Message carried by the DONE broadcast
pub const ATTENDANCE_PERSISTED: &str = "Attendance persisted";
/// MY_ATTENDANCE status for a student with no present mark yet
pub const NOT_YET_UPDATED: &str = "not yet updated";

/// Raw inbound envelope
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Inbound event names recognized by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    AttendanceMarked,
    TodaySummary,
    MyAttendance,
    Done,
}

impl ClientEvent {
    /// `None` for event names the router ignores
    pub fn parse(event: &str) -> Option<Self> {
        match event {
            "ATTENDANCE_MARKED" => Some(Self::AttendanceMarked),
            "TODAY_SUMMARY" => Some(Self::TodaySummary),
            "MY_ATTENDANCE" => Some(Self::MyAttendance),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn required_role(&self) -> Role {
        match self {
            Self::AttendanceMarked | Self::TodaySummary | Self::Done => Role::Teacher,
            Self::MyAttendance => Role::Student,
        }
    }
}

/// `ATTENDANCE_MARKED` inbound payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceData {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Outbound message, serialized as `{"event": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    AttendanceMarked(AttendanceMarkedData),
    TodaySummary(SummaryData),
    MyAttendance(MyAttendanceData),
    Done(DoneData),
    Error(ErrorData),
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorData {
            message: message.into(),
        })
    }

    pub fn forbidden(role: Role) -> Self {
        Self::error(format!("Forbidden, {role} event only"))
    }

    /// Event name used in logs
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::AttendanceMarked(_) => "ATTENDANCE_MARKED",
            Self::TodaySummary(_) => "TODAY_SUMMARY",
            Self::MyAttendance(_) => "MY_ATTENDANCE",
            Self::Done(_) => "DONE",
            Self::Error(_) => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMarkedData {
    pub student_id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

impl From<AttendanceSummary> for SummaryData {
    fn from(summary: AttendanceSummary) -> Self {
        Self {
            present: summary.present,
            absent: summary.absent,
            total: summary.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyAttendanceData {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoneData {
    pub message: String,
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_marked_wire_shape() {
        // テスト項目: 送信メッセージが {event, data} 形式で camelCase になる
        // given (前提条件):
        let msg = ServerMessage::AttendanceMarked(AttendanceMarkedData {
            student_id: "s1".to_string(),
            status: AttendanceStatus::Present,
        });

        // when (操作):
        let json = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "event": "ATTENDANCE_MARKED",
                "data": {"studentId": "s1", "status": "present"}
            })
        );
    }

    #[test]
    fn test_forbidden_message_names_role() {
        // テスト項目: 権限エラーのメッセージにロール名が入る
        // when (操作):
        let json = serde_json::to_value(ServerMessage::forbidden(Role::Teacher)).unwrap();

        // then (期待する結果):
        assert_eq!(json["event"], "ERROR");
        assert_eq!(json["data"]["message"], "Forbidden, teacher event only");
    }

    #[test]
    fn test_inbound_without_data_defaults_to_null() {
        // テスト項目: data を省略した受信メッセージも受け付ける
        // when (操作):
        let msg: InboundMessage = serde_json::from_str(r#"{"event":"TODAY_SUMMARY"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(ClientEvent::parse(&msg.event), Some(ClientEvent::TodaySummary));
        assert!(msg.data.is_null());
    }

    #[test]
    fn test_mark_payload_rejects_unknown_status() {
        // テスト項目: present / absent 以外の status はパースエラー
        // when (操作):
        let result = serde_json::from_value::<MarkAttendanceData>(
            serde_json::json!({"studentId": "s1", "status": "late"}),
        );

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_event_is_not_recognized() {
        // テスト項目: 未知のイベント名は None
        // then (期待する結果):
        assert_eq!(ClientEvent::parse("attendance_marked"), None);
        assert_eq!(ClientEvent::parse("PING"), None);
    }
}
