//! Zones: containers owning an ordered list of member entities.
//!
//! A zone is built after everything it may contain, so its constructor can
//! admit the members listed in the snapshot straight away.
//!
//! ## Membership
//!
//! Admission appends to the member list and moves the member's visual
//! element. It never removes the member from the zone it came from, so an
//! entity moved between zones stays listed in both. The server only ever
//! asks about the destination, and the visual tree is correct because
//! reparenting an element detaches it from its old parent.
//!
//! Ownership is the `owner` attribute, so a `set` transition on it moves the
//! zone to another player (or to nobody, with null).

use super::descriptor::EntityDescriptor;
use super::factory::BuildContext;
use super::object::{EntityCore, GameObject, ZoneRef};
use crate::core::{EntityId, Value};
use crate::presentation::Presentation;

/// A container entity.
#[derive(Debug)]
pub struct Zone {
    core: EntityCore,
    members: Vec<EntityId>,
}

impl Zone {
    /// Build a zone and admit its declared members.
    ///
    /// Declared members that are not registered are skipped with a warning.
    pub fn new(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Self {
        let mut core = EntityCore::new(
            descriptor.id,
            descriptor.kind.clone(),
            descriptor.attributes.clone(),
        );
        core.visual = ctx.view.create_visual_for(&core);

        let mut zone = Self {
            core,
            members: Vec::with_capacity(descriptor.members.len()),
        };

        for &member in &descriptor.members {
            match ctx.registry.get_mut(member) {
                Some(object) => zone.admit(object, ctx.view),
                None => log::warn!(
                    "{} declares member {member} which is not registered, skipping",
                    descriptor.id
                ),
            }
        }
        zone
    }

    /// Admit a member: append it and let it move its visual element here.
    pub fn admit(&mut self, member: &mut dyn GameObject, view: &mut dyn Presentation) {
        self.members.push(member.id());
        member.add_to_zone(self.zone_ref(), view);
    }

    pub(crate) fn push_member(&mut self, member: EntityId) {
        self.members.push(member);
    }

    /// What members learn about this zone on admission.
    #[must_use]
    pub fn zone_ref(&self) -> ZoneRef {
        ZoneRef {
            id: self.core.id,
            visual: self.core.visual,
        }
    }

    /// Zone name, if the server sent one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.core.get("name").and_then(Value::as_text)
    }

    /// Owning player. `None` for shared zones.
    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        self.core.owner()
    }

    /// Check if nobody owns this zone.
    #[must_use]
    pub fn is_unowned(&self) -> bool {
        self.owner().is_none()
    }

    /// Check if `player` owns this zone.
    #[must_use]
    pub fn is_owned_by(&self, player: EntityId) -> bool {
        self.owner() == Some(player)
    }

    /// Members in admission order.
    #[must_use]
    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    /// Check if an entity is listed as a member.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    /// Number of listed members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the zone lists no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl GameObject for Zone {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn as_zone(&self) -> Option<&Zone> {
        Some(self)
    }

    fn as_zone_mut(&mut self) -> Option<&mut Zone> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use crate::objects::{Card, ObjectRegistry};
    use crate::presentation::HeadlessView;

    #[test]
    fn test_new_admits_members_in_order() {
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();

        for id in [3, 4] {
            let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
            let card = Card::new(&EntityDescriptor::new(id, "Card"), &mut ctx);
            registry.register(Box::new(card)).unwrap();
        }

        let descriptor = EntityDescriptor::new(2, "Zone")
            .with_owner(1)
            .with_members([4, 3])
            .with_attr("name", "hand");
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
        let zone = Zone::new(&descriptor, &mut ctx);

        assert_eq!(zone.members(), &[EntityId(4), EntityId(3)]);
        assert_eq!(zone.name(), Some("hand"));
        assert!(zone.is_owned_by(EntityId(1)));
        assert!(!zone.is_unowned());
        assert_eq!(view.child_entities(EntityId(2)), vec![EntityId(4), EntityId(3)]);
    }

    #[test]
    fn test_new_skips_missing_member() {
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();

        let descriptor = EntityDescriptor::new(2, "Zone").with_members([99]);
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
        let zone = Zone::new(&descriptor, &mut ctx);

        assert!(zone.is_empty());
        assert!(zone.is_unowned());
    }

    #[test]
    fn test_owner_changes_with_set() {
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();

        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
        let mut zone = Zone::new(&EntityDescriptor::new(2, "Zone").with_owner(1), &mut ctx);
        assert!(zone.is_owned_by(EntityId(1)));

        zone.set_value("owner".into(), 3.into(), &mut view);
        assert_eq!(zone.owner(), Some(EntityId(3)));
        assert!(!zone.is_owned_by(EntityId(1)));

        zone.set_value("owner".into(), Value::Null, &mut view);
        assert!(zone.is_unowned());
    }
}
