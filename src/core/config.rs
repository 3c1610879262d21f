//! Session configuration.
//!
//! A client is configured once per game room:
//! - which room and seat it joins,
//! - where card face images live,
//! - which attribute names carry a card's face state,
//! - how duplicate entity ids in a snapshot are treated.
//!
//! The defaults match the wire format of the deckr server, so most embeddings
//! only set the room and player ids.

use serde::{Deserialize, Serialize};

use super::error::{SyncError, SyncResult};

/// What the registry does when an id is registered twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the existing entity and log a warning.
    #[default]
    Overwrite,
    /// Keep the existing entity and report `DuplicateId`.
    Reject,
}

/// Configuration for one client session.
///
/// ```
/// use deckr_client::core::{DuplicatePolicy, SessionConfig};
///
/// let config = SessionConfig::new(3, 11)
///     .with_asset_root("/cards/")
///     .with_duplicate_policy(DuplicatePolicy::Reject);
///
/// assert_eq!(config.face_src("AS.png"), "/cards/AS.png");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Game room to join.
    pub game_room_id: u64,

    /// Seat of the local player.
    pub player_id: u64,

    /// Prefix joined with a card's face file name to build its image source.
    pub asset_root: String,

    /// Attribute that says whether a card shows its front.
    pub face_attribute: String,

    /// Attribute holding the front image file name.
    pub front_attribute: String,

    /// Attribute holding the back image file name.
    pub back_attribute: String,

    /// Duplicate id handling during registration.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_room_id: 0,
            player_id: 0,
            asset_root: "/static/deckr/cards/".to_string(),
            face_attribute: "face_up".to_string(),
            front_attribute: "front_face".to_string(),
            back_attribute: "back_face".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration for a room and player.
    #[must_use]
    pub fn new(game_room_id: u64, player_id: u64) -> Self {
        Self {
            game_room_id,
            player_id,
            ..Self::default()
        }
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the attribute names are usable.
    pub fn validate(&self) -> SyncResult<()> {
        for (field, name) in [
            ("face_attribute", &self.face_attribute),
            ("front_attribute", &self.front_attribute),
            ("back_attribute", &self.back_attribute),
        ] {
            if name.is_empty() {
                return Err(SyncError::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Set the image asset prefix.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Set the attribute that carries a card's face state.
    #[must_use]
    pub fn with_face_attribute(mut self, name: impl Into<String>) -> Self {
        self.face_attribute = name.into();
        self
    }

    /// Set the front/back image attribute names.
    #[must_use]
    pub fn with_face_images(mut self, front: impl Into<String>, back: impl Into<String>) -> Self {
        self.front_attribute = front.into();
        self.back_attribute = back.into();
        self
    }

    /// Set the duplicate id policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Image source for a face file name.
    #[must_use]
    pub fn face_src(&self, file: &str) -> String {
        format!("{}{}", self.asset_root, file)
    }
}
