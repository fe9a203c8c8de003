//! Websocket endpoint for live session-validity notification.
//!
//! A client that has logged in opens this channel, proves which session
//! it holds, and is then told the instant that session stops being valid
//! (a competing login or an explicit logout). The handler polls the
//! session registry on a fixed cadence rather than subscribing to
//! invalidation events, so the worst-case notification latency is one
//! poll interval.

pub mod handler;
