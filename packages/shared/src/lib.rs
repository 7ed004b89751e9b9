//! Shared utilities for the Rollcall server and tools.

pub mod logger;
pub mod time;
