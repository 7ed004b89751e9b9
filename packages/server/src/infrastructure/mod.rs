//! Infrastructure layer: collaborator implementations, wire DTOs, and the
//! connection registry / broadcaster.

pub mod auth;
pub mod broadcast;
pub mod dto;
pub mod registry;
pub mod repository;
pub mod seed;
