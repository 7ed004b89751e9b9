//! HTTP API request / response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceStatus, Session, SessionState};

use super::websocket::SummaryData;

/// Response envelope: `{"success": true, "data": ...}` or `{"success": false, "error": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// `POST /api/attendance/start` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub class_id: String,
}

/// Live session snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub session_id: String,
    pub class_id: String,
    pub started_at: String, // ISO 8601
    pub state: SessionState,
    pub attendance: BTreeMap<String, AttendanceStatus>,
    pub summary: SummaryData,
}

impl SessionDto {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id.as_str().to_string(),
            class_id: session.class_id.as_str().to_string(),
            started_at: rollcall_shared::time::timestamp_to_jst_rfc3339(session.started_at.value()),
            state: session.state(),
            attendance: session
                .attendance()
                .iter()
                .map(|(id, status)| (id.as_str().to_string(), *status))
                .collect(),
            summary: session.summary().into(),
        }
    }
}

/// `GET /api/classes/{id}/my-attendance` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyAttendanceDto {
    pub class_id: String,
    pub status: Option<AttendanceStatus>,
}
