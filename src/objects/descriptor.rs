//! Snapshot entries describing one entity each.
//!
//! The server serializes every object as a flat JSON dictionary. `id`,
//! `kind` and `members` are structural; everything else, `owner` included,
//! is an attribute. The deckr server's own key names are accepted as
//! aliases: `game_id`, `game_object_type` and `objects`.

use serde::{Deserialize, Deserializer, Serialize};

use super::object::owner_of;
use crate::core::{AttributeKey, Attributes, EntityId, EntityKind, SyncError, SyncResult, Value};

/// Description of one entity in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Entity id.
    #[serde(alias = "game_id")]
    pub id: EntityId,
    /// Type tag.
    #[serde(alias = "game_object_type")]
    pub kind: EntityKind,
    /// Initial members of a container, in order.
    #[serde(
        default,
        alias = "objects",
        deserialize_with = "nullable_members",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub members: Vec<EntityId>,
    /// All remaining fields.
    #[serde(flatten, deserialize_with = "json_attributes")]
    pub attributes: Attributes,
}

impl EntityDescriptor {
    /// Create a descriptor with no attributes.
    pub fn new(id: u64, kind: impl Into<EntityKind>) -> Self {
        Self {
            id: EntityId(id),
            kind: kind.into(),
            members: Vec::new(),
            attributes: Attributes::default(),
        }
    }

    /// Set the `owner` attribute (builder pattern).
    #[must_use]
    pub fn with_owner(self, owner: u64) -> Self {
        self.with_attr("owner", Value::Int(owner as i64))
    }

    /// Set the initial members (builder pattern).
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = u64>) -> Self {
        self.members = members.into_iter().map(EntityId).collect();
        self
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Owning player. `None` when absent, null or not an id.
    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        owner_of(&self.attributes)
    }

    /// Decode one snapshot entry.
    pub fn from_json(json: serde_json::Value) -> SyncResult<Self> {
        serde_json::from_value(json).map_err(|err| SyncError::MalformedDescriptor(err.to_string()))
    }

    /// Decode a snapshot, dropping malformed entries with a warning.
    #[must_use]
    pub fn parse_snapshot(entries: Vec<serde_json::Value>) -> Vec<Self> {
        entries
            .into_iter()
            .filter_map(|entry| match Self::from_json(entry) {
                Ok(descriptor) => Some(descriptor),
                Err(err) => {
                    log::warn!("skipping snapshot entry: {err}");
                    None
                }
            })
            .collect()
    }
}

fn nullable_members<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EntityId>>::deserialize(deserializer)?.unwrap_or_default())
}

// JSON objects have no attribute representation; `Value::from` turns them
// into text instead of failing the entry.
fn json_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(fields
        .into_iter()
        .map(|(k, v)| (AttributeKey::from(k), Value::from(v)))
        .collect())
}
