//! Shared helpers for integration tests: an in-process server on an ephemeral
//! port plus token and WebSocket utilities.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use rollcall_server::{
    domain::{Class, ClassId, Identity, Role, UserId},
    infrastructure::{
        auth::{DEFAULT_TOKEN_TTL, JwtTokenVerifier},
        repository::{InMemoryAttendanceRepository, InMemoryClassRepository, InMemorySessionStore},
    },
    ui::{build_router, state::AppState},
};
use serde_json::Value;
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream,
    tungstenite::{Message, client::IntoClientRequest, http::header::AUTHORIZATION},
};

pub const SECRET: &str = "integration-secret";
pub const CLASS_ID: &str = "class-c";

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn uid(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

/// Class C taught by t1 with students a, b and d
pub fn class_c() -> Class {
    Class {
        id: ClassId::new(CLASS_ID.to_string()).unwrap(),
        class_name: "C".to_string(),
        teacher_id: uid("t1"),
        student_ids: [uid("a"), uid("b"), uid("d")].into_iter().collect(),
    }
}

pub fn token(user_id: &str, role: Role) -> String {
    JwtTokenVerifier::new(SECRET)
        .issue(&Identity::new(uid(user_id), role), DEFAULT_TOKEN_TTL)
        .unwrap()
}

pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    pub attendance: Arc<InMemoryAttendanceRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let attendance = Arc::new(InMemoryAttendanceRepository::new());
        let state = Arc::new(AppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryClassRepository::with_classes([class_c()])),
            attendance.clone(),
            Arc::new(JwtTokenVerifier::new(SECRET)),
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            attendance,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, token: Option<&str>) -> String {
        match token {
            Some(token) => format!("ws://{}/ws?token={}", self.addr, token),
            None => format!("ws://{}/ws", self.addr),
        }
    }

    /// Open a socket as `user_id` and wait until the server has registered it.
    pub async fn connect(&self, user_id: &str, role: Role) -> WsStream {
        let before = self.state.registry.count().await;
        let (ws, _) = tokio_tungstenite::connect_async(self.ws_url(Some(&token(user_id, role))))
            .await
            .expect("Failed to connect");
        self.wait_for_connections(before + 1).await;
        ws
    }

    /// Open a socket on `ws_url(query_token)` carrying `header_token` as a
    /// bearer `Authorization` header, and wait until the server has registered it.
    pub async fn connect_with_header(
        &self,
        query_token: Option<&str>,
        header_token: &str,
    ) -> WsStream {
        let before = self.state.registry.count().await;
        let mut request = self
            .ws_url(query_token)
            .into_client_request()
            .expect("Invalid request");
        request.headers_mut().insert(
            AUTHORIZATION,
            format!("Bearer {header_token}")
                .parse()
                .expect("Invalid header value"),
        );
        let (ws, _) = tokio_tungstenite::connect_async(request)
            .await
            .expect("Failed to connect");
        self.wait_for_connections(before + 1).await;
        ws
    }

    pub async fn wait_for_connections(&self, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.state.registry.count().await < expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Timed out waiting for connections to register");
    }

    /// Records are written after DONE goes out; wait for them to land.
    pub async fn wait_for_records(&self, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.attendance.records().await.len() < expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Timed out waiting for attendance records");
    }

    /// `POST /api/attendance/start` as the class teacher
    pub async fn start_session(&self) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/attendance/start", self.base_url()))
            .bearer_auth(token("t1", Role::Teacher))
            .json(&serde_json::json!({"classId": CLASS_ID}))
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("Failed to send message");
}

/// Next text frame as JSON, skipping control frames.
pub async fn next_json(ws: &mut WsStream) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid JSON");
                }
                Some(Ok(Message::Close(_))) | None => panic!("Connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {e}"),
            }
        }
    })
    .await
    .expect("Timed out waiting for message")
}

/// Assert that nothing arrives within a short window.
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "Unexpected message: {result:?}");
}
