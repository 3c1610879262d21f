//! Error types for the synchronization engine.
//!
//! None of these are fatal to a session. Callers that process a list of
//! inputs (snapshot descriptors, transition batches) log the error for the
//! offending item and carry on with the rest.

use super::entity::EntityId;

/// Errors raised while building or mutating the mirrored object graph.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The object factory has no constructor for this kind.
    #[error("unknown entity kind `{kind}` for {id}")]
    UnknownKind { id: EntityId, kind: String },

    /// A transition referenced an id that is not registered.
    #[error("{0} is not registered")]
    UnresolvedEntity(EntityId),

    /// An `add` transition targeted an entity that is not a container.
    #[error("{0} is not a container")]
    NotAContainer(EntityId),

    /// An id was registered twice under the `Reject` policy.
    #[error("{0} is already registered")]
    DuplicateId(EntityId),

    /// A snapshot arrived after the session was already built.
    #[error("session was already populated by an earlier snapshot")]
    AlreadyPopulated,

    /// A transition record could not be decoded.
    #[error("malformed transition: {0}")]
    MalformedTransition(String),

    /// A snapshot entry could not be decoded.
    #[error("malformed entity descriptor: {0}")]
    MalformedDescriptor(String),

    /// The server sent an event the adapter does not handle.
    #[error("unexpected server event `{0}`")]
    UnknownEvent(String),

    /// The session configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON payload could not be decoded.
    #[error("wire format error: {0}")]
    Wire(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type SyncResult<T> = Result<T, SyncError>;
