//! Live attendance server: HTTP API, WebSocket endpoint, and event routing.

pub mod error;
mod handler;
pub mod router;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, build_state, run};
