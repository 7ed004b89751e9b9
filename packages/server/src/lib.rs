//! Live attendance session server.
//!
//! A teacher opens a roll-call over HTTP; teacher and students connect over
//! WebSocket, marks fan out to every connection, and `DONE` persists the final
//! roster.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::run as run_server;
