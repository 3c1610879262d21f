//! Construction of game objects from snapshot descriptors.
//!
//! The factory maps each [`EntityKind`] to a constructor and a
//! [`BuildGroup`]. Snapshots are built group by group (players, then plain
//! objects, then containers) so a container can admit its members while
//! it is being built.
//!
//! Game modules extend the table with their own kinds, or replace the
//! constructor of a standard kind to install extra attribute reactions.

use rustc_hash::FxHashMap;

use super::card::Card;
use super::descriptor::EntityDescriptor;
use super::object::GameObject;
use super::player::{GenericObject, Player};
use super::registry::ObjectRegistry;
use super::zone::Zone;
use crate::core::{EntityKind, SessionConfig, SyncError, SyncResult};
use crate::presentation::Presentation;

/// Construction phase of a kind within a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildGroup {
    /// Built first.
    Player = 0,
    /// Built after players.
    Object = 1,
    /// Built last, once every possible member exists.
    Container = 2,
}

impl BuildGroup {
    /// All groups in build order.
    pub const ORDER: [BuildGroup; 3] = [BuildGroup::Player, BuildGroup::Object, BuildGroup::Container];
}

/// Everything a constructor may touch while building an object.
pub struct BuildContext<'a> {
    /// Objects registered so far in this snapshot.
    pub registry: &'a mut ObjectRegistry,
    /// Presentation layer.
    pub view: &'a mut dyn Presentation,
    /// Session configuration.
    pub config: &'a SessionConfig,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        registry: &'a mut ObjectRegistry,
        view: &'a mut dyn Presentation,
        config: &'a SessionConfig,
    ) -> Self {
        Self {
            registry,
            view,
            config,
        }
    }
}

/// Builds one object from its descriptor.
pub type Constructor = fn(&EntityDescriptor, &mut BuildContext<'_>) -> Box<dyn GameObject>;

#[derive(Clone, Copy)]
struct Blueprint {
    group: BuildGroup,
    build: Constructor,
}

/// Kind-to-constructor table.
#[derive(Clone, Default)]
pub struct ObjectFactory {
    blueprints: FxHashMap<EntityKind, Blueprint>,
}

impl std::fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<(&str, BuildGroup)> = self
            .blueprints
            .iter()
            .map(|(kind, blueprint)| (kind.as_str(), blueprint.group))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("ObjectFactory").field("kinds", &kinds).finish()
    }
}

impl ObjectFactory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for the kinds every deckr game uses: Player, Zone, Card and
    /// Game.
    #[must_use]
    pub fn standard() -> Self {
        let mut factory = Self::new();
        factory.register(EntityKind::Player, BuildGroup::Player, build_player);
        factory.register(EntityKind::Card, BuildGroup::Object, build_card);
        factory.register(EntityKind::Game, BuildGroup::Object, build_generic);
        factory.register(EntityKind::Zone, BuildGroup::Container, build_zone);
        factory
    }

    /// Register a constructor for a kind, replacing any previous one.
    ///
    /// Returns the group of the replaced entry.
    pub fn register(
        &mut self,
        kind: impl Into<EntityKind>,
        group: BuildGroup,
        build: Constructor,
    ) -> Option<BuildGroup> {
        self.blueprints
            .insert(kind.into(), Blueprint { group, build })
            .map(|previous| previous.group)
    }

    /// Check if a kind has a constructor.
    #[must_use]
    pub fn knows(&self, kind: &EntityKind) -> bool {
        self.blueprints.contains_key(kind)
    }

    /// Build group of a kind. Unknown kinds fall in [`BuildGroup::Object`].
    #[must_use]
    pub fn group_of(&self, kind: &EntityKind) -> BuildGroup {
        self.blueprints
            .get(kind)
            .map_or(BuildGroup::Object, |blueprint| blueprint.group)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Split descriptors by build group, keeping their relative order.
    ///
    /// Index `i` of the result holds the descriptors of `BuildGroup::ORDER[i]`.
    #[must_use]
    pub fn partition<'d>(&self, descriptors: &'d [EntityDescriptor]) -> [Vec<&'d EntityDescriptor>; 3] {
        let mut groups: [Vec<&'d EntityDescriptor>; 3] = Default::default();
        for descriptor in descriptors {
            groups[self.group_of(&descriptor.kind) as usize].push(descriptor);
        }
        groups
    }

    /// Build the object a descriptor describes.
    pub fn create(
        &self,
        descriptor: &EntityDescriptor,
        ctx: &mut BuildContext<'_>,
    ) -> SyncResult<Box<dyn GameObject>> {
        match self.blueprints.get(&descriptor.kind) {
            Some(blueprint) => Ok((blueprint.build)(descriptor, ctx)),
            None => {
                log::warn!("no constructor for kind `{}` ({})", descriptor.kind, descriptor.id);
                Err(SyncError::UnknownKind {
                    id: descriptor.id,
                    kind: descriptor.kind.to_string(),
                })
            }
        }
    }
}

/// Standard player constructor.
pub fn build_player(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Box<dyn GameObject> {
    Box::new(Player::new(descriptor, ctx))
}

/// Standard card constructor.
pub fn build_card(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Box<dyn GameObject> {
    Box::new(Card::new(descriptor, ctx))
}

/// Standard zone constructor.
pub fn build_zone(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Box<dyn GameObject> {
    Box::new(Zone::new(descriptor, ctx))
}

/// Constructor for kinds without specialized behavior.
pub fn build_generic(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Box<dyn GameObject> {
    Box::new(GenericObject::new(descriptor, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;
    use crate::presentation::HeadlessView;

    #[test]
    fn test_standard_groups() {
        let factory = ObjectFactory::standard();
        assert_eq!(factory.len(), 4);
        assert_eq!(factory.group_of(&EntityKind::Player), BuildGroup::Player);
        assert_eq!(factory.group_of(&EntityKind::Card), BuildGroup::Object);
        assert_eq!(factory.group_of(&EntityKind::Zone), BuildGroup::Container);
        assert_eq!(factory.group_of(&EntityKind::from("Supply")), BuildGroup::Object);
        assert!(!factory.knows(&EntityKind::from("Supply")));
    }

    #[test]
    fn test_partition_keeps_order() {
        let factory = ObjectFactory::standard();
        let descriptors = vec![
            EntityDescriptor::new(2, "Zone"),
            EntityDescriptor::new(4, "Card"),
            EntityDescriptor::new(1, "Player"),
            EntityDescriptor::new(3, "Card"),
            EntityDescriptor::new(5, "Zone"),
        ];

        let [players, objects, containers] = factory.partition(&descriptors);
        let ids = |group: &[&EntityDescriptor]| group.iter().map(|d| d.id.raw()).collect::<Vec<_>>();

        assert_eq!(ids(&players), vec![1]);
        assert_eq!(ids(&objects), vec![4, 3]);
        assert_eq!(ids(&containers), vec![2, 5]);
    }

    #[test]
    fn test_create_unknown_kind() {
        let factory = ObjectFactory::standard();
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);

        let err = factory
            .create(&EntityDescriptor::new(9, "Supply"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, SyncError::UnknownKind { id: EntityId(9), .. }));
    }

    #[test]
    fn test_register_extension_kind() {
        let mut factory = ObjectFactory::standard();
        assert_eq!(factory.register("Supply", BuildGroup::Container, build_zone), None);
        assert_eq!(
            factory.register("Card", BuildGroup::Object, build_card),
            Some(BuildGroup::Object)
        );

        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
        let supply = factory
            .create(&EntityDescriptor::new(9, "Supply"), &mut ctx)
            .unwrap();

        assert!(supply.as_zone().is_some());
        assert_eq!(factory.group_of(&EntityKind::from("Supply")), BuildGroup::Container);
    }
}
