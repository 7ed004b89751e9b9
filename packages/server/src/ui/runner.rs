//! Server wiring: state, routes, and the serve loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    infrastructure::{
        auth::JwtTokenVerifier,
        repository::{InMemoryAttendanceRepository, InMemoryClassRepository, InMemorySessionStore},
        seed::load_classes,
    },
    ui::{
        handler::{
            current_session, health_check, my_recorded_attendance, start_session,
            websocket_handler,
        },
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the shared state with in-memory collaborators, loading the seed file if given.
pub async fn build_state(config: &ServerConfig) -> Result<Arc<AppState>, ServerError> {
    let classes = InMemoryClassRepository::new();
    if let Some(path) = &config.seed {
        for class in load_classes(path).await? {
            classes.upsert(class).await;
        }
        tracing::info!(
            path = %path.display(),
            classes = classes.count().await,
            "loaded classes"
        );
    } else {
        tracing::warn!("no seed file given, starting with no classes");
    }

    Ok(Arc::new(AppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(classes),
        Arc::new(InMemoryAttendanceRepository::new()),
        Arc::new(JwtTokenVerifier::new(&config.jwt_secret)),
    )))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/attendance/start", post(start_session))
        .route("/api/attendance/session", get(current_session))
        .route(
            "/api/classes/{id}/my-attendance",
            get(my_recorded_attendance),
        )
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = build_state(&config).await?;
    let app = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("server stopped");
    Ok(())
}
