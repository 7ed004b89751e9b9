//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{current_session, health_check, my_recorded_attendance, start_session};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
