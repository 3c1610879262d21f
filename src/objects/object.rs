//! The entity capability shared by every mirrored game object.
//!
//! Each concrete object (player, zone, card, generic) embeds an
//! [`EntityCore`] holding its identity, attributes, visual handle and
//! attribute reactions, and implements [`GameObject`] on top of it.
//!
//! ## Attribute Writes
//!
//! A write always stores the value first. If the object installed a
//! reaction for that attribute when it was built, the reaction then runs
//! with the updated state. Attributes without a reaction are written
//! silently.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::zone::Zone;
use crate::core::{AttributeKey, Attributes, EntityId, EntityKind, Value};
use crate::presentation::{Presentation, VisualHandle};

/// Reaction to an attribute write, run after the value is stored.
pub type Reaction = Rc<dyn Fn(&EntityCore, &mut dyn Presentation)>;

/// Identity and mutable state shared by all game objects.
pub struct EntityCore {
    /// Server-assigned id. Never changes after construction.
    pub id: EntityId,

    /// Type tag.
    pub kind: EntityKind,

    /// Named attributes mirrored from the server.
    pub attributes: Attributes,

    /// Visual element, if the presentation created one.
    pub visual: Option<VisualHandle>,

    reactions: FxHashMap<AttributeKey, Reaction>,
}

impl EntityCore {
    /// Create the core state for an object.
    #[must_use]
    pub fn new(id: EntityId, kind: EntityKind, attributes: Attributes) -> Self {
        Self {
            id,
            kind,
            attributes,
            visual: None,
            reactions: FxHashMap::default(),
        }
    }

    /// Get an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Owning player, read from the `owner` attribute.
    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        owner_of(&self.attributes)
    }

    /// Install the reaction for an attribute, replacing any previous one.
    pub fn on_set(&mut self, key: impl Into<AttributeKey>, reaction: Reaction) {
        self.reactions.insert(key.into(), reaction);
    }

    /// Check if an attribute has a reaction.
    #[must_use]
    pub fn has_reaction(&self, key: &str) -> bool {
        self.reactions.contains_key(key)
    }

    /// Write an attribute, then run its reaction.
    ///
    /// Returns whether a reaction ran.
    pub fn set_value(&mut self, key: AttributeKey, value: Value, view: &mut dyn Presentation) -> bool {
        let reaction = self.reactions.get(key.as_str()).cloned();
        self.attributes.insert(key, value);
        match reaction {
            Some(reaction) => {
                reaction(self, view);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for EntityCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut reactions: Vec<&str> = self.reactions.keys().map(AttributeKey::as_str).collect();
        reactions.sort_unstable();
        f.debug_struct("EntityCore")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("visual", &self.visual)
            .field("reactions", &reactions)
            .finish()
    }
}

/// Owner id held in an attribute map. Null, negative and non-integer
/// values mean no owner.
pub(crate) fn owner_of(attributes: &Attributes) -> Option<EntityId> {
    attributes
        .get("owner")
        .and_then(Value::as_int)
        .and_then(|id| u64::try_from(id).ok())
        .map(EntityId)
}

/// What a member learns about the container it is admitted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneRef {
    /// Container id.
    pub id: EntityId,
    /// Container's visual element.
    pub visual: Option<VisualHandle>,
}

/// Capability implemented by every mirrored game object.
pub trait GameObject: std::fmt::Debug {
    /// Shared state.
    fn core(&self) -> &EntityCore;

    /// Mutable shared state.
    fn core_mut(&mut self) -> &mut EntityCore;

    /// Server-assigned id.
    fn id(&self) -> EntityId {
        self.core().id
    }

    /// Type tag.
    fn kind(&self) -> &EntityKind {
        &self.core().kind
    }

    /// Get an attribute.
    fn get(&self, key: &str) -> Option<&Value> {
        self.core().get(key)
    }

    /// Visual element.
    fn visual(&self) -> Option<VisualHandle> {
        self.core().visual
    }

    /// Called when this object is admitted into a zone.
    ///
    /// Objects without a visual representation have nothing to move.
    fn add_to_zone(&mut self, _zone: ZoneRef, _view: &mut dyn Presentation) {}

    /// Write an attribute and run its reaction. Returns whether one ran.
    fn set_value(&mut self, key: AttributeKey, value: Value, view: &mut dyn Presentation) -> bool {
        self.core_mut().set_value(key, value, view)
    }

    /// Downcast to a zone.
    fn as_zone(&self) -> Option<&Zone> {
        None
    }

    /// Mutable downcast to a zone.
    fn as_zone_mut(&mut self) -> Option<&mut Zone> {
        None
    }
}
