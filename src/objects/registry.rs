//! Id-to-object registry for one session.

use rustc_hash::FxHashMap;

use super::object::GameObject;
use super::zone::Zone;
use crate::core::{DuplicatePolicy, EntityId, SyncError, SyncResult};
use crate::presentation::Presentation;

/// Every game object known to the client, keyed by id.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: FxHashMap<EntityId, Box<dyn GameObject>>,
    policy: DuplicatePolicy,
}

impl ObjectRegistry {
    /// Create an empty registry that overwrites duplicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a duplicate policy.
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            objects: FxHashMap::default(),
            policy,
        }
    }

    /// Duplicate id policy.
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register an object under its id.
    ///
    /// With [`DuplicatePolicy::Overwrite`] the replaced object is returned.
    /// With [`DuplicatePolicy::Reject`] a duplicate leaves the registry
    /// unchanged and fails with [`SyncError::DuplicateId`].
    pub fn register(&mut self, object: Box<dyn GameObject>) -> SyncResult<Option<Box<dyn GameObject>>> {
        let id = object.id();
        match self.policy {
            DuplicatePolicy::Reject if self.objects.contains_key(&id) => {
                Err(SyncError::DuplicateId(id))
            }
            _ => {
                let previous = self.objects.insert(id, object);
                if previous.is_some() {
                    log::warn!("{id} registered twice, replacing the earlier object");
                }
                Ok(previous)
            }
        }
    }

    /// Get an object.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&dyn GameObject> {
        self.objects.get(&id).map(|object| &**object)
    }

    /// Get an object mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn GameObject + 'static)> {
        self.objects.get_mut(&id).map(|object| &mut **object)
    }

    /// Get a zone.
    #[must_use]
    pub fn zone(&self, id: EntityId) -> Option<&Zone> {
        self.objects.get(&id)?.as_zone()
    }

    /// Get a zone mutably.
    pub fn zone_mut(&mut self, id: EntityId) -> Option<&mut Zone> {
        self.objects.get_mut(&id)?.as_zone_mut()
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Registered ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all objects in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn GameObject> {
        self.objects.values().map(|object| &**object)
    }

    /// Admit `member` into the container `container`.
    ///
    /// Both ids are resolved before anything changes, so a failed admission
    /// leaves the registry and the view untouched.
    pub fn admit(
        &mut self,
        member: EntityId,
        container: EntityId,
        view: &mut dyn Presentation,
    ) -> SyncResult<()> {
        let zone = self
            .objects
            .get(&container)
            .ok_or(SyncError::UnresolvedEntity(container))?
            .as_zone()
            .ok_or(SyncError::NotAContainer(container))?
            .zone_ref();

        self.objects
            .get_mut(&member)
            .ok_or(SyncError::UnresolvedEntity(member))?
            .add_to_zone(zone, view);

        if let Some(zone) = self.zone_mut(container) {
            zone.push_member(member);
        }
        Ok(())
    }

    /// Containers listing `entity` as a member, in ascending id order.
    #[must_use]
    pub fn containers_holding(&self, entity: EntityId) -> Vec<EntityId> {
        let mut holders: Vec<EntityId> = self
            .objects
            .values()
            .filter_map(|object| object.as_zone())
            .filter(|zone| zone.contains(entity))
            .map(|zone| zone.id())
            .collect();
        holders.sort_unstable();
        holders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityKind, SessionConfig};
    use crate::objects::{BuildContext, EntityDescriptor, ObjectFactory};
    use crate::presentation::HeadlessView;

    fn populate(registry: &mut ObjectRegistry, view: &mut HeadlessView, descriptors: &[EntityDescriptor]) {
        let factory = ObjectFactory::standard();
        let config = SessionConfig::default();
        for descriptor in descriptors {
            let mut ctx = BuildContext::new(registry, view, &config);
            let object = factory.create(descriptor, &mut ctx).unwrap();
            registry.register(object).unwrap();
        }
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        populate(&mut registry, &mut view, &[EntityDescriptor::new(3, "Card")]);
        populate(&mut registry, &mut view, &[EntityDescriptor::new(3, "Zone")]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(EntityId(3)).unwrap().kind(), &EntityKind::Zone);
    }

    #[test]
    fn test_reject_keeps_first() {
        let mut registry = ObjectRegistry::with_policy(DuplicatePolicy::Reject);
        let mut view = HeadlessView::new();
        populate(&mut registry, &mut view, &[EntityDescriptor::new(3, "Card")]);

        let config = SessionConfig::default();
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
        let again = ObjectFactory::standard()
            .create(&EntityDescriptor::new(3, "Zone"), &mut ctx)
            .unwrap();

        let err = registry.register(again).unwrap_err();
        assert!(matches!(err, SyncError::DuplicateId(EntityId(3))));
        assert_eq!(registry.get(EntityId(3)).unwrap().kind(), &EntityKind::Card);
    }

    #[test]
    fn test_admit_moves_visual_and_keeps_old_listing() {
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        populate(
            &mut registry,
            &mut view,
            &[
                EntityDescriptor::new(3, "Card"),
                EntityDescriptor::new(1, "Zone").with_members([3]),
                EntityDescriptor::new(2, "Zone"),
            ],
        );

        registry.admit(EntityId(3), EntityId(2), &mut view).unwrap();

        assert_eq!(registry.zone(EntityId(2)).unwrap().members(), &[EntityId(3)]);
        assert_eq!(registry.containers_holding(EntityId(3)), vec![EntityId(1), EntityId(2)]);
        assert_eq!(view.parent_entity(EntityId(3)), Some(EntityId(2)));
    }

    #[test]
    fn test_admit_errors_leave_state() {
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        populate(
            &mut registry,
            &mut view,
            &[EntityDescriptor::new(3, "Card"), EntityDescriptor::new(4, "Card")],
        );

        assert!(matches!(
            registry.admit(EntityId(3), EntityId(99), &mut view),
            Err(SyncError::UnresolvedEntity(EntityId(99)))
        ));
        assert!(matches!(
            registry.admit(EntityId(3), EntityId(4), &mut view),
            Err(SyncError::NotAContainer(EntityId(4)))
        ));
        assert_eq!(view.reparent_count(), 0);
        assert_eq!(registry.ids(), vec![EntityId(3), EntityId(4)]);
    }
}
