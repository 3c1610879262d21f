//! Session orchestration: snapshot ingestion and transition application.
//!
//! A [`Session`] starts `Uninitialized`, becomes `Populated` when the first
//! snapshot is loaded, then applies transition batches as they arrive:
//!
//! ```text
//! Uninitialized --load_snapshot--> Populated --apply_transitions--+
//!                                      ^                          |
//!                                      +--------------------------+
//! ```
//!
//! Game modules customize a session through its public API only:
//! [`Session::register_callback`] for UI handlers,
//! [`Session::factory_mut`] for constructors, and the post-update and
//! extension hooks.

mod callbacks;
mod sync;

pub use callbacks::{CallbackKey, CallbackTable};
pub use sync::{
    BatchReport, ExtensionHook, PostUpdateHook, Session, SessionState, SnapshotReport,
};
