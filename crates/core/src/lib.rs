//! `crm-core` — domain foundation for the user directory.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod user;

pub use entity::Entity;
pub use error::DomainError;
pub use id::UserId;
pub use user::User;
