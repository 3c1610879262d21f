//! Solitaire bindings.
//!
//! Click-to-select, click-to-move:
//! - clicking the deck draws and clears the selection,
//! - clicking a face-up card selects it, or deselects it if it was the
//!   selected card, or (with another card selected) acts as a click on the
//!   card's zone,
//! - clicking a zone asks to move the selected card there, unless the zone
//!   already holds it.
//!
//! Face-down cards ignore clicks.

use std::rc::Rc;

use crate::presentation::{ActionRequest, Presentation, Selection, UiEvent, UiTarget};
use crate::session::Session;

/// Register the solitaire UI callbacks.
pub fn install<P: Presentation>(session: &mut Session<P>) {
    let face_attribute = session.config().face_attribute.clone();

    session.register_callback(
        "click",
        "deck",
        Rc::new(|event: &mut UiEvent<'_>| {
            event.request(ActionRequest::new("draw"));
            event.selection.clear();
        }),
    );
    session.register_callback(
        "click",
        "card",
        Rc::new(move |event: &mut UiEvent<'_>| card_on_click(event, &face_attribute)),
    );
    session.register_callback(
        "click",
        "zone",
        Rc::new(|event: &mut UiEvent<'_>| {
            if let Some(request) = move_request(event.selection, event.target) {
                event.request(request);
            }
        }),
    );
}

fn card_on_click(event: &mut UiEvent<'_>, face_attribute: &str) {
    let face_up = event
        .target
        .attribute(face_attribute)
        .is_some_and(|value| value.is_truthy());
    if !face_up {
        log::debug!("clicked on a face-down card");
        return;
    }
    let Some(card) = event.target.entity else {
        return;
    };

    if event.selection.is_empty() {
        event.selection.select_only(card);
    } else if event.selection.contains(card) {
        event.selection.toggle(card);
    } else if let Some(zone) = event.parent {
        if let Some(request) = move_request(event.selection, zone) {
            event.request(request);
        }
    }
}

fn move_request(selection: &Selection, zone: &UiTarget) -> Option<ActionRequest> {
    let card = selection.first()?;
    let target = zone.entity?;
    if zone.members.contains(&card) {
        return None;
    }
    log::debug!("requesting move of {card} to {target}");
    Some(
        ActionRequest::new("move_cards")
            .with_arg("card", card.raw())
            .with_arg("target_zone", target.raw()),
    )
}
