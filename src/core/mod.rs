//! Core engine types: entity ids and kinds, attribute values, configuration
//! and errors.
//!
//! This module is game-agnostic. Nothing here knows what a "hand" or a
//! "trick" is; games give attributes meaning through reactions and UI
//! callbacks.

pub mod config;
pub mod entity;
pub mod error;
pub mod value;

pub use config::{DuplicatePolicy, SessionConfig};
pub use entity::{EntityId, EntityKind};
pub use error::{SyncError, SyncResult};
pub use value::{AttributeKey, Attributes, Value};
