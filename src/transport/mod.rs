//! Socket transport.
//!
//! The engine does not open sockets. An embedding feeds inbound events
//! (name plus JSON payload) to a [`TransportAdapter`], which decodes them
//! into [`ServerMessage`]s and drives the session, and hands the adapter an
//! [`Emitter`] for outbound [`ClientMessage`]s.
//!
//! Events produced on another thread go through a `std::sync::mpsc`
//! channel and are drained on the session's thread with
//! [`TransportAdapter::pump`].

mod adapter;
mod message;

pub use adapter::{Emitter, InboundEvent, TransportAdapter};
pub use message::{ClientMessage, PlayerName, ServerMessage};
