//! Business rules over the entity layer.
//!
//! Consumers of this crate (the web layer) never touch `entity_api`
//! directly; the re-exports below provide the entity models and id type
//! through a single interface while the implementation details stay in
//! the lower layers.

pub use entity_api::{posts, users, Id};

pub mod error;
pub mod post;
pub mod user;
