//! Hearts bindings.
//!
//! Clicking a card in a hand plays it. Clicking the play zone takes the
//! trick. Cards already on the table ignore clicks.

use std::rc::Rc;

use crate::presentation::{ActionRequest, Presentation, UiEvent};
use crate::session::Session;

/// Register the hearts UI callbacks.
pub fn install<P: Presentation>(session: &mut Session<P>) {
    session.register_callback("click", "card", Rc::new(card_on_click));
    session.register_callback("click", "play_zone", Rc::new(play_zone_on_click));
}

fn card_on_click(event: &mut UiEvent<'_>) {
    if !event.parent.is_some_and(|parent| parent.has_class("hand")) {
        return;
    }
    if let Some(card) = event.target.entity {
        event.request(ActionRequest::new("play_card").with_arg("card", card.raw()));
    }
}

fn play_zone_on_click(event: &mut UiEvent<'_>) {
    event.request(ActionRequest::new("take_trick"));
}
