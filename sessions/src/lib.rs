//! Login-session infrastructure for real-time session-validity tracking.
//!
//! This crate is the single source of truth for "which session token is
//! currently valid for which user". It backs both the synchronous
//! per-request authorization check in the web layer and the long-lived
//! liveness channel that tells a connected client the moment its session
//! stops being valid.
//!
//! # Architecture
//!
//! - **Single session per user**: issuing a new token for an email
//!   atomically discards any token issued earlier. Logging in from a new
//!   location logs the old one out.
//! - **Concurrent registry**: the email -> token mapping lives in a
//!   `DashMap`, so request handlers and per-connection watcher tasks can
//!   interleave freely. Every operation is a single atomic map call; no
//!   lock is ever held across an `.await`.
//! - **Ephemeral state**: the registry has process lifetime only. After a
//!   restart every user re-authenticates.
//! - **Opaque tokens**: a token is a pure random handle. Nothing outside
//!   this crate parses it; validity is decided only by looking the email
//!   up in the registry.
//!
//! # Modules
//!
//! - `registry`: the `SessionRegistry` with create/get/delete operations
//!   and token generation
//! - `message`: wire types for the liveness channel (handshake payload,
//!   acknowledgement sentinels, close reason)

pub mod message;
pub mod registry;

pub use registry::{SessionRegistry, SessionToken};
