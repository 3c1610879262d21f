//! Players and other objects without container behavior.

use super::descriptor::EntityDescriptor;
use super::factory::BuildContext;
use super::object::{EntityCore, GameObject};
use crate::core::Value;

/// A seat at the table.
#[derive(Debug)]
pub struct Player {
    core: EntityCore,
}

impl Player {
    /// Build a player. Players normally have no visual element.
    pub fn new(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Self {
        let mut core = EntityCore::new(
            descriptor.id,
            descriptor.kind.clone(),
            descriptor.attributes.clone(),
        );
        core.visual = ctx.view.create_visual_for(&core);
        Self { core }
    }

    /// Display name, if the server sent one.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.core
            .get("nickname")
            .or_else(|| self.core.get("name"))
            .and_then(Value::as_text)
    }
}

impl GameObject for Player {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

/// Any entity without specialized behavior: the game object itself and
/// kinds registered by game modules.
#[derive(Debug)]
pub struct GenericObject {
    core: EntityCore,
}

impl GenericObject {
    pub fn new(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Self {
        let mut core = EntityCore::new(
            descriptor.id,
            descriptor.kind.clone(),
            descriptor.attributes.clone(),
        );
        core.visual = ctx.view.create_visual_for(&core);
        Self { core }
    }
}

impl GameObject for GenericObject {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use crate::objects::ObjectRegistry;
    use crate::presentation::HeadlessView;

    #[test]
    fn test_player_nickname_and_no_visual() {
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);

        let player = Player::new(
            &EntityDescriptor::new(1, "Player").with_attr("nickname", "ada"),
            &mut ctx,
        );
        assert_eq!(player.nickname(), Some("ada"));
        assert!(player.visual().is_none());
    }

    #[test]
    fn test_generic_extension_kind_gets_visual() {
        let config = SessionConfig::default();
        let mut registry = ObjectRegistry::new();
        let mut view = HeadlessView::new();
        let mut ctx = BuildContext::new(&mut registry, &mut view, &config);

        let supply = GenericObject::new(&EntityDescriptor::new(8, "Supply"), &mut ctx);
        assert!(supply.visual().is_some());
        assert_eq!(supply.kind().as_str(), "Supply");
    }
}
