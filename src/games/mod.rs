//! Per-game UI bindings.
//!
//! Each game module exposes an `install` function that customizes a
//! [`Session`](crate::session::Session) before its snapshot is loaded:
//! UI callbacks, and where needed extra constructors or attribute reactions.
//! The modules use the public session API only.

pub mod dominion;
pub mod hearts;
pub mod magic;
pub mod solitaire;
