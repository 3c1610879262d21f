//! Incremental state changes sent by the server.
//!
//! A batch of [`Transition`]s is applied strictly in order by the session.
//! Decoding is lenient at the batch level: one malformed record is dropped
//! without affecting its neighbours.

mod transition;

pub use transition::{ExtensionTransition, Transition};
