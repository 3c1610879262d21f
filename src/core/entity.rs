//! Entity identification and type tags.
//!
//! Every game object mirrored from the server (player, zone, card, the game
//! itself) carries a server-assigned `EntityId` that never changes, and an
//! `EntityKind` tag naming what sort of object it is.
//!
//! ## Usage
//!
//! ```
//! use deckr_client::core::{EntityId, EntityKind};
//!
//! let card = EntityId::new(7);
//! assert_eq!(card.raw(), 7);
//!
//! let kind = EntityKind::parse("Card");
//! assert_eq!(kind, EntityKind::Card);
//! assert_eq!(EntityKind::parse("Supply").as_str(), "Supply");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any game entity.
///
/// Assigned by the server and unique within one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Type tag of a game entity.
///
/// The engine ships constructors for the built-in kinds. Anything else is
/// kept verbatim as `Other` so games can register constructors for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    /// A seated player.
    Player,
    /// A container of other entities (hand, deck, play area).
    Zone,
    /// A playing card.
    Card,
    /// The game object itself.
    Game,
    /// Game-specific kind.
    Other(String),
}

impl EntityKind {
    /// Parse a wire tag.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Player" => EntityKind::Player,
            "Zone" => EntityKind::Zone,
            "Card" => EntityKind::Card,
            "Game" => EntityKind::Game,
            other => EntityKind::Other(other.to_string()),
        }
    }

    /// The wire tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::Zone => "Zone",
            EntityKind::Card => "Card",
            EntityKind::Game => "Game",
            EntityKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for EntityKind {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for EntityKind {
    fn from(tag: String) -> Self {
        match Self::parse(&tag) {
            EntityKind::Other(_) => EntityKind::Other(tag),
            known => known,
        }
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
