//! Event router for inbound socket messages.
//!
//! Every frame goes through the same checks, in order: envelope parse, event
//! recognition, role, active session, payload parse. Each recognized event has
//! exactly one handler. Errors are replied to the sender only.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{ConnectionId, Identity, SessionError, UserId},
    infrastructure::dto::websocket::{
        ATTENDANCE_PERSISTED, AttendanceMarkedData, ClientEvent, DoneData, INVALID_MESSAGE_FORMAT,
        InboundMessage, MarkAttendanceData, MyAttendanceData, NOT_YET_UPDATED, NO_ACTIVE_SESSION,
        ServerMessage,
    },
    ui::state::AppState,
    usecase::{
        FinalizeError, FinalizeSessionUseCase, MarkAttendanceUseCase, MyAttendanceStatus,
        MyAttendanceUseCase, TodaySummaryUseCase,
    },
};

/// Handler failure, reported to the sender as `ERROR{message}`
#[derive(Debug, Error)]
enum RouteError {
    #[error("{}", INVALID_MESSAGE_FORMAT)]
    InvalidPayload,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Finalize(#[from] FinalizeError),
}

#[derive(Clone)]
pub struct EventRouter {
    state: Arc<AppState>,
}

impl EventRouter {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Route one text frame received on `connection_id`.
    pub async fn handle(&self, connection_id: &ConnectionId, identity: &Identity, text: &str) {
        let inbound = match serde_json::from_str::<InboundMessage>(text) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(%connection_id, error = %e, "malformed message");
                self.reply(connection_id, ServerMessage::error(INVALID_MESSAGE_FORMAT))
                    .await;
                return;
            }
        };

        let Some(event) = ClientEvent::parse(&inbound.event) else {
            tracing::debug!(%connection_id, event = %inbound.event, "ignoring unrecognized event");
            return;
        };

        let required = event.required_role();
        if identity.role != required {
            tracing::warn!(
                %connection_id,
                user_id = %identity.user_id,
                event = %inbound.event,
                "forbidden event for role {}",
                identity.role
            );
            self.reply(connection_id, ServerMessage::forbidden(required))
                .await;
            return;
        }

        if !self.state.sessions.is_active().await {
            self.reply(connection_id, ServerMessage::error(NO_ACTIVE_SESSION))
                .await;
            return;
        }

        let result = match event {
            ClientEvent::AttendanceMarked => self.on_attendance_marked(inbound.data).await,
            ClientEvent::TodaySummary => self.on_today_summary().await,
            ClientEvent::MyAttendance => self.on_my_attendance(connection_id, identity).await,
            ClientEvent::Done => self.on_done().await,
        };

        if let Err(e) = result {
            tracing::warn!(%connection_id, event = %inbound.event, error = %e, "event failed");
            self.reply(connection_id, ServerMessage::error(e.to_string()))
                .await;
        }
    }

    async fn on_attendance_marked(&self, data: serde_json::Value) -> Result<(), RouteError> {
        let payload: MarkAttendanceData =
            serde_json::from_value(data).map_err(|_| RouteError::InvalidPayload)?;
        let student_id = UserId::new(payload.student_id).map_err(|_| RouteError::InvalidPayload)?;

        MarkAttendanceUseCase::new(self.state.sessions.clone())
            .execute(student_id.clone(), payload.status)
            .await?;

        let message = ServerMessage::AttendanceMarked(AttendanceMarkedData {
            student_id: student_id.into_string(),
            status: payload.status,
        });
        self.state.broadcaster.broadcast_all(&message).await;
        Ok(())
    }

    async fn on_today_summary(&self) -> Result<(), RouteError> {
        let summary = TodaySummaryUseCase::new(self.state.sessions.clone())
            .execute()
            .await?;
        let message = ServerMessage::TodaySummary(summary.into());
        self.state.broadcaster.broadcast_all(&message).await;
        Ok(())
    }

    async fn on_my_attendance(
        &self,
        connection_id: &ConnectionId,
        identity: &Identity,
    ) -> Result<(), RouteError> {
        let status = MyAttendanceUseCase::new(self.state.sessions.clone())
            .execute(&identity.user_id)
            .await?;
        let status = match status {
            MyAttendanceStatus::Present => "present",
            MyAttendanceStatus::NotYetUpdated => NOT_YET_UPDATED,
        };
        self.reply(
            connection_id,
            ServerMessage::MyAttendance(MyAttendanceData {
                status: status.to_string(),
            }),
        )
        .await;
        Ok(())
    }

    async fn on_done(&self) -> Result<(), RouteError> {
        let finalizer = FinalizeSessionUseCase::new(
            self.state.sessions.clone(),
            self.state.classes.clone(),
            self.state.attendance.clone(),
        );
        let finalized = finalizer.close().await?;

        // The summary is settled once the slot is released; announce it before writing
        let summary = finalized.summary;
        let message = ServerMessage::Done(DoneData {
            message: ATTENDANCE_PERSISTED.to_string(),
            present: summary.present,
            absent: summary.absent,
            total: summary.total,
        });
        self.state.broadcaster.broadcast_all(&message).await;

        let report = finalizer.persist(finalized).await;
        if report.failed_count() > 0 {
            tracing::warn!(
                session_id = %report.finalized.session_id,
                failed = report.failed_count(),
                "attendance records were not all persisted"
            );
        }
        Ok(())
    }

    async fn reply(&self, connection_id: &ConnectionId, message: ServerMessage) {
        if !self.state.broadcaster.send_to(connection_id, &message).await {
            tracing::debug!(%connection_id, event = message.event_name(), "reply dropped");
        }
    }
}
