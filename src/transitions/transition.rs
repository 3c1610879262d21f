//! Server-issued state transitions.
//!
//! Two wire forms are accepted. The tuple form is a JSON array whose first
//! element is the tag:
//! - `["add", entity, container]`
//! - `["set", kind, entity, attribute, value]`
//! - `["remove", entity]`
//! - `[tag, ...args]` for anything else
//!
//! The object form names its fields:
//! - `{"name": "add", "object": entity, "zone": container}`
//! - `{"name": "set", "game_id": entity, "attribute": a, "value": v}`
//!   with an optional `class` (or `game_object_type`) kind hint
//! - `{"name": "remove", "object": entity}`
//!
//! A known tag with bad arguments is malformed. An unknown tag is never
//! malformed: it becomes a [`Transition::Extension`] carrying its raw
//! arguments (the remaining fields as one object, for the object form).

use serde_json::Value as Json;
use smallvec::SmallVec;

use crate::core::{AttributeKey, EntityId, EntityKind, SyncError, SyncResult, Value};

/// A transition with a tag the engine does not interpret.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionTransition {
    /// Wire tag.
    pub tag: String,
    /// Remaining arguments, verbatim.
    pub args: SmallVec<[Json; 4]>,
}

/// One mutation instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Admit `entity` into `container`.
    Add {
        entity: EntityId,
        container: EntityId,
    },
    /// Write an attribute, then run the entity's reaction for it.
    Set {
        /// Kind the server believes the entity has. Informational only.
        kind_hint: Option<EntityKind>,
        entity: EntityId,
        attribute: AttributeKey,
        value: Value,
    },
    /// Declared by the protocol. Applying it changes nothing.
    Remove { entity: EntityId },
    /// Forwarded to the session's extension hook.
    Extension(ExtensionTransition),
}

impl Transition {
    /// Create an `Add` transition.
    #[must_use]
    pub fn add(entity: u64, container: u64) -> Self {
        Self::Add {
            entity: EntityId(entity),
            container: EntityId(container),
        }
    }

    /// Create a `Set` transition.
    #[must_use]
    pub fn set(kind: impl Into<EntityKind>, entity: u64, attribute: &str, value: impl Into<Value>) -> Self {
        Self::Set {
            kind_hint: Some(kind.into()),
            entity: EntityId(entity),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a `Remove` transition.
    #[must_use]
    pub fn remove(entity: u64) -> Self {
        Self::Remove {
            entity: EntityId(entity),
        }
    }

    /// Create an extension transition.
    #[must_use]
    pub fn extension(tag: impl Into<String>, args: impl IntoIterator<Item = Json>) -> Self {
        Self::Extension(ExtensionTransition {
            tag: tag.into(),
            args: args.into_iter().collect(),
        })
    }

    /// Wire tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Add { .. } => "add",
            Self::Set { .. } => "set",
            Self::Remove { .. } => "remove",
            Self::Extension(ext) => &ext.tag,
        }
    }

    /// Entities this transition must resolve.
    #[must_use]
    pub fn entities(&self) -> SmallVec<[EntityId; 2]> {
        match self {
            Self::Add { entity, container } => SmallVec::from_buf([*entity, *container]),
            Self::Set { entity, .. } | Self::Remove { entity } => smallvec::smallvec![*entity],
            Self::Extension(_) => SmallVec::new(),
        }
    }

    /// Encode in tuple form.
    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Add { entity, container } => serde_json::json!(["add", entity.raw(), container.raw()]),
            Self::Set {
                kind_hint,
                entity,
                attribute,
                value,
            } => serde_json::json!([
                "set",
                kind_hint.as_ref().map(EntityKind::as_str),
                entity.raw(),
                attribute.as_str(),
                value.to_json()
            ]),
            Self::Remove { entity } => serde_json::json!(["remove", entity.raw()]),
            Self::Extension(ext) => {
                let mut items = Vec::with_capacity(ext.args.len() + 1);
                items.push(Json::String(ext.tag.clone()));
                items.extend(ext.args.iter().cloned());
                Json::Array(items)
            }
        }
    }

    /// Decode one transition from either wire form.
    pub fn from_json(json: &Json) -> SyncResult<Self> {
        match json {
            Json::Array(items) => Self::from_tuple(items),
            Json::Object(fields) => Self::from_object(fields),
            other => Err(SyncError::MalformedTransition(format!(
                "expected an array or object, got {other}"
            ))),
        }
    }

    /// Decode a batch, dropping malformed records with a warning.
    #[must_use]
    pub fn parse_batch(records: &[Json]) -> Vec<Self> {
        records
            .iter()
            .filter_map(|record| match Self::from_json(record) {
                Ok(transition) => Some(transition),
                Err(err) => {
                    log::warn!("dropping transition {record}: {err}");
                    None
                }
            })
            .collect()
    }

    fn from_tuple(items: &[Json]) -> SyncResult<Self> {
        let tag = items
            .first()
            .and_then(Json::as_str)
            .ok_or_else(|| SyncError::MalformedTransition("missing tag".into()))?;
        let args = &items[1..];

        match tag {
            "add" => {
                expect_arity(tag, args, 2)?;
                Ok(Self::Add {
                    entity: entity_arg(tag, &args[0])?,
                    container: entity_arg(tag, &args[1])?,
                })
            }
            "set" => {
                expect_arity(tag, args, 4)?;
                Ok(Self::Set {
                    kind_hint: kind_arg(&args[0]),
                    entity: entity_arg(tag, &args[1])?,
                    attribute: attribute_arg(tag, &args[2])?,
                    value: Value::from(&args[3]),
                })
            }
            "remove" => {
                expect_arity(tag, args, 1)?;
                Ok(Self::Remove {
                    entity: entity_arg(tag, &args[0])?,
                })
            }
            _ => Ok(Self::extension(tag, args.iter().cloned())),
        }
    }

    fn from_object(fields: &serde_json::Map<String, Json>) -> SyncResult<Self> {
        let tag = fields
            .get("name")
            .and_then(Json::as_str)
            .ok_or_else(|| SyncError::MalformedTransition("missing `name`".into()))?;
        let field = |name: &str| {
            fields
                .get(name)
                .ok_or_else(|| SyncError::MalformedTransition(format!("`{tag}` needs `{name}`")))
        };

        match tag {
            "add" => Ok(Self::Add {
                entity: entity_arg(tag, field("object")?)?,
                container: entity_arg(tag, field("zone")?)?,
            }),
            "set" => Ok(Self::Set {
                kind_hint: ["class", "game_object_type", "kind"]
                    .iter()
                    .find_map(|name| fields.get(*name))
                    .and_then(kind_arg),
                entity: entity_arg(tag, field("game_id")?)?,
                attribute: attribute_arg(tag, field("attribute")?)?,
                value: fields.get("value").map(Value::from).unwrap_or_default(),
            }),
            "remove" => Ok(Self::Remove {
                entity: entity_arg(tag, field("object")?)?,
            }),
            _ => {
                let mut rest = fields.clone();
                rest.remove("name");
                Ok(Self::extension(tag, [Json::Object(rest)]))
            }
        }
    }
}

fn expect_arity(tag: &str, args: &[Json], arity: usize) -> SyncResult<()> {
    if args.len() == arity {
        Ok(())
    } else {
        Err(SyncError::MalformedTransition(format!(
            "`{tag}` takes {arity} arguments, got {}",
            args.len()
        )))
    }
}

fn entity_arg(tag: &str, arg: &Json) -> SyncResult<EntityId> {
    arg.as_u64()
        .map(EntityId)
        .ok_or_else(|| SyncError::MalformedTransition(format!("`{tag}` expects an entity id, got {arg}")))
}

fn attribute_arg(tag: &str, arg: &Json) -> SyncResult<AttributeKey> {
    arg.as_str()
        .map(AttributeKey::from)
        .ok_or_else(|| SyncError::MalformedTransition(format!("`{tag}` expects an attribute name, got {arg}")))
}

fn kind_arg(arg: &Json) -> Option<EntityKind> {
    arg.as_str().map(EntityKind::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tuple_forms() {
        assert_eq!(Transition::from_json(&json!(["add", 5, 9])).unwrap(), Transition::add(5, 9));
        assert_eq!(
            Transition::from_json(&json!(["set", "Card", 7, "faceUp", true])).unwrap(),
            Transition::set("Card", 7, "faceUp", true)
        );
        assert_eq!(Transition::from_json(&json!(["remove", 4])).unwrap(), Transition::remove(4));
    }

    #[test]
    fn test_object_forms() {
        assert_eq!(
            Transition::from_json(&json!({"name": "add", "object": 5, "zone": 9})).unwrap(),
            Transition::add(5, 9)
        );

        let set = Transition::from_json(&json!({
            "name": "set", "game_id": 7, "attribute": "face_up", "value": false
        }))
        .unwrap();
        match set {
            Transition::Set {
                kind_hint,
                entity,
                attribute,
                value,
            } => {
                assert_eq!(kind_hint, None);
                assert_eq!(entity, EntityId(7));
                assert_eq!(attribute.as_str(), "face_up");
                assert_eq!(value, Value::Bool(false));
            }
            other => panic!("expected set, got {other:?}"),
        }

        assert_eq!(
            Transition::from_json(&json!({"name": "remove", "object": 4})).unwrap(),
            Transition::remove(4)
        );
    }

    #[test]
    fn test_object_form_class_hint() {
        let set = Transition::from_json(&json!({
            "name": "set", "class": "Zone", "game_id": 2, "attribute": "owner", "value": 1
        }))
        .unwrap();
        assert_eq!(set, Transition::set("Zone", 2, "owner", 1));
    }

    #[test]
    fn test_unknown_tag_is_extension() {
        let t = Transition::from_json(&json!(["is_over", [1, 2]])).unwrap();
        assert_eq!(t.tag(), "is_over");
        match t {
            Transition::Extension(ext) => assert_eq!(ext.args.as_slice(), &[json!([1, 2])]),
            other => panic!("expected extension, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed() {
        assert!(Transition::from_json(&json!(["add", 5])).is_err());
        assert!(Transition::from_json(&json!(["add", "x", 9])).is_err());
        assert!(Transition::from_json(&json!(["set", "Card", 7, 3, true])).is_err());
        assert!(Transition::from_json(&json!([])).is_err());
        assert!(Transition::from_json(&json!({"name": "add", "object": 5})).is_err());
        assert!(Transition::from_json(&json!(42)).is_err());
    }

    #[test]
    fn test_parse_batch_drops_malformed() {
        let batch = Transition::parse_batch(&[json!(["add", 5, 9]), json!(["add"]), json!(["remove", 5])]);
        assert_eq!(batch, vec![Transition::add(5, 9), Transition::remove(5)]);
    }

    #[test]
    fn test_to_json_tuple_form() {
        assert_eq!(Transition::add(5, 9).to_json(), json!(["add", 5, 9]));
        assert_eq!(
            Transition::set("Card", 7, "faceUp", true).to_json(),
            json!(["set", "Card", 7, "faceUp", true])
        );
        assert_eq!(Transition::extension("is_over", [json!(1)]).to_json(), json!(["is_over", 1]));
    }

    #[test]
    fn test_entities() {
        assert_eq!(Transition::add(5, 9).entities().as_slice(), &[EntityId(5), EntityId(9)]);
        assert_eq!(Transition::remove(4).entities().as_slice(), &[EntityId(4)]);
        assert!(Transition::extension("x", std::iter::empty()).entities().is_empty());
    }
}
