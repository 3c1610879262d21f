//! Cards: entities with a face state rendered as an image.
//!
//! A card shows its front image while its face attribute is truthy and its
//! back image otherwise. The image source is the configured asset root joined
//! with the file name held in the front or back attribute.

use std::rc::Rc;

use super::descriptor::EntityDescriptor;
use super::factory::BuildContext;
use super::object::{EntityCore, GameObject, ZoneRef};
use crate::core::{SessionConfig, Value};
use crate::presentation::Presentation;

/// Attribute names and asset root a card renders its face with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFaces {
    asset_root: String,
    face_attribute: String,
    front_attribute: String,
    back_attribute: String,
}

impl CardFaces {
    /// Take the face settings from a session configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            asset_root: config.asset_root.clone(),
            face_attribute: config.face_attribute.clone(),
            front_attribute: config.front_attribute.clone(),
            back_attribute: config.back_attribute.clone(),
        }
    }

    /// Attribute carrying the face state.
    #[must_use]
    pub fn face_attribute(&self) -> &str {
        &self.face_attribute
    }

    /// Check if a card shows its front.
    #[must_use]
    pub fn is_face_up(&self, core: &EntityCore) -> bool {
        core.get(&self.face_attribute).is_some_and(Value::is_truthy)
    }

    /// Image source for the face currently shown, if the file name is known.
    #[must_use]
    pub fn image_src(&self, core: &EntityCore) -> Option<String> {
        let attribute = if self.is_face_up(core) {
            &self.front_attribute
        } else {
            &self.back_attribute
        };
        core.get(attribute)
            .and_then(Value::as_text)
            .map(|file| format!("{}{}", self.asset_root, file))
    }

    /// Push the face state and image source to the card's element.
    pub fn render(&self, core: &EntityCore, view: &mut dyn Presentation) {
        let Some(handle) = core.visual else {
            return;
        };
        match self.image_src(core) {
            Some(src) => view.set_visual_attribute(handle, "src", &Value::Text(src)),
            None => log::debug!("{} has no image for its current face", core.id),
        }
        view.set_visual_attribute(
            handle,
            &self.face_attribute,
            &Value::Bool(self.is_face_up(core)),
        );
    }
}

/// A card entity.
#[derive(Debug)]
pub struct Card {
    core: EntityCore,
    faces: Rc<CardFaces>,
}

impl Card {
    /// Build a card, render its face and install the face reaction.
    pub fn new(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Self {
        let mut core = EntityCore::new(
            descriptor.id,
            descriptor.kind.clone(),
            descriptor.attributes.clone(),
        );
        core.visual = ctx.view.create_visual_for(&core);

        let faces = Rc::new(CardFaces::from_config(ctx.config));
        faces.render(&core, ctx.view);

        let reaction = faces.clone();
        core.on_set(
            faces.face_attribute(),
            Rc::new(move |core: &EntityCore, view: &mut dyn Presentation| {
                reaction.render(core, view);
            }),
        );

        Self { core, faces }
    }

    /// Check if the card shows its front.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.faces.is_face_up(&self.core)
    }

    /// Front image file name.
    #[must_use]
    pub fn front_face(&self) -> Option<&str> {
        self.core.get(&self.faces.front_attribute).and_then(Value::as_text)
    }

    /// Back image file name.
    #[must_use]
    pub fn back_face(&self) -> Option<&str> {
        self.core.get(&self.faces.back_attribute).and_then(Value::as_text)
    }

    /// Image source of the face currently shown.
    #[must_use]
    pub fn image_src(&self) -> Option<String> {
        self.faces.image_src(&self.core)
    }
}

impl GameObject for Card {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn add_to_zone(&mut self, zone: ZoneRef, view: &mut dyn Presentation) {
        match (self.core.visual, zone.visual) {
            (Some(card), Some(container)) => view.reparent(card, container),
            _ => log::trace!("{} joined {} without a visual move", self.core.id, zone.id),
        }
    }
}
