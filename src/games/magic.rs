//! Magic bindings.
//!
//! Clicking a card in hand plays it; clicking any other card activates its
//! ability. Cards also track a `tapped` attribute, mirrored onto their
//! visual element.

use std::rc::Rc;

use crate::core::Value;
use crate::objects::{BuildContext, BuildGroup, Card, EntityCore, EntityDescriptor, GameObject};
use crate::presentation::{ActionRequest, Presentation, UiEvent};
use crate::session::Session;

/// Attribute marking a tapped permanent.
pub const TAPPED: &str = "tapped";

/// Register the magic card constructor and UI callbacks.
pub fn install<P: Presentation>(session: &mut Session<P>) {
    session
        .factory_mut()
        .register("Card", BuildGroup::Object, build_magic_card);
    session.register_callback("click", "card", Rc::new(card_on_click));
}

/// A standard card plus a reaction showing the tapped state.
pub fn build_magic_card(descriptor: &EntityDescriptor, ctx: &mut BuildContext<'_>) -> Box<dyn GameObject> {
    let mut card = Card::new(descriptor, ctx);
    card.core_mut().on_set(
        TAPPED,
        Rc::new(|core: &EntityCore, view: &mut dyn Presentation| {
            if let Some(handle) = core.visual {
                let tapped = core.get(TAPPED).is_some_and(Value::is_truthy);
                view.set_visual_attribute(handle, TAPPED, &Value::Bool(tapped));
            }
        }),
    );
    Box::new(card)
}

fn card_on_click(event: &mut UiEvent<'_>) {
    let Some(card) = event.target.entity else {
        return;
    };
    let in_hand = event.parent.is_some_and(|parent| parent.has_class("hand"));
    let action = if in_hand { "play_card" } else { "activate_ability" };
    event.request(ActionRequest::new(action).with_arg("card", card.raw()));
}
