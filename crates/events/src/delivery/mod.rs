//! Outbound delivery channels for ops events.

pub mod email;
pub mod webhook;
