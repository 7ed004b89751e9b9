//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
};

use crate::{
    domain::{AuthError, ClassId, Identity, Role},
    infrastructure::{
        auth::bearer_token,
        dto::http::{ApiResponse, MyAttendanceDto, SessionDto, StartSessionRequest},
    },
    ui::{error::ApiError, state::AppState},
    usecase::{GetRecordedAttendanceUseCase, StartSessionUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Start a live attendance session for a class (teacher only)
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, Role::Teacher)?;

    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let class_id =
        ClassId::new(request.class_id).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let session = StartSessionUseCase::new(state.classes.clone(), state.sessions.clone())
        .execute(class_id, &identity)
        .await?;

    Ok(Json(ApiResponse::ok(SessionDto::from_session(&session))))
}

/// Snapshot of the ACTIVE session (teacher only)
pub async fn current_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, Role::Teacher)?;

    let session = state
        .sessions
        .current()
        .await
        .ok_or_else(|| ApiError::NotFound("No active attendance session".to_string()))?;

    Ok(Json(ApiResponse::ok(SessionDto::from_session(&session))))
}

/// Persisted attendance of the requesting student for a class
pub async fn my_recorded_attendance(
    State(state): State<Arc<AppState>>,
    Path(class_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MyAttendanceDto>>, ApiError> {
    let identity = authenticate(&state, &headers).await?;
    let class_id = ClassId::new(class_id).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let status = GetRecordedAttendanceUseCase::new(state.attendance.clone())
        .execute(&class_id, &identity)
        .await?;

    Ok(Json(ApiResponse::ok(MyAttendanceDto {
        class_id: class_id.as_str().to_string(),
        status,
    })))
}

/// Resolve the caller from the `Authorization` header.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;
    Ok(state.token_verifier.verify(token).await?)
}

fn require_role(identity: &Identity, role: Role) -> Result<(), ApiError> {
    if identity.role == role {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Forbidden, {role} access required"
        )))
    }
}
