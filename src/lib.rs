//! # deckr-client
//!
//! Client-side state synchronization for server-driven card games.
//!
//! The server is authoritative. It sends one full snapshot of the game
//! objects, then batches of small transitions ("add entity to zone", "set
//! attribute"). The client mirrors that state in a registry of typed
//! objects and keeps a presentation layer in step.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: the engine knows players, zones, cards and the
//!    game object. Games add kinds, reactions and UI callbacks through the
//!    public session API.
//!
//! 2. **Lenient Ingestion**: a malformed entry or an unresolved id costs
//!    one item, never the batch. Everything skipped is logged.
//!
//! 3. **Rendering at Arm's Length**: the engine drives a [`Presentation`]
//!    trait and never touches rendering primitives.
//!
//! ## Modules
//!
//! - `core`: Entity ids and kinds, attribute values, configuration, errors
//! - `objects`: Game object trait, standard kinds, factory and registry
//! - `transitions`: Incremental state changes and their wire forms
//! - `presentation`: Rendering boundary and the headless view
//! - `session`: Snapshot ingestion and transition application
//! - `transport`: Socket event decoding and outbound messages
//! - `games`: Per-game UI bindings

pub mod core;
pub mod games;
pub mod objects;
pub mod presentation;
pub mod session;
pub mod transitions;
pub mod transport;

// Re-export commonly used types
pub use crate::core::{
    AttributeKey, Attributes, DuplicatePolicy, EntityId, EntityKind, SessionConfig, SyncError,
    SyncResult, Value,
};

pub use crate::objects::{
    BuildContext, BuildGroup, Card, EntityCore, EntityDescriptor, GameObject, GenericObject,
    ObjectFactory, ObjectRegistry, Player, Zone,
};

pub use crate::transitions::{ExtensionTransition, Transition};

pub use crate::presentation::{
    ActionRequest, ExpectedAction, HeadlessView, Presentation, Selection, UiEvent, UiHandler,
    UiTarget, VisualHandle,
};

pub use crate::session::{BatchReport, Session, SessionState, SnapshotReport};

pub use crate::transport::{ClientMessage, Emitter, InboundEvent, ServerMessage, TransportAdapter};
