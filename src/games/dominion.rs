//! Dominion bindings.
//!
//! While the server expects nothing, clicking a card plays it and clicking a
//! supply pile buys from it. While it waits for information, clicks answer
//! instead. A single card or pile is sent at once. A list of cards is
//! collected in the selection and sent with [`send_selected`].
//!
//! Clicks on elements of the wrong type for the pending question are
//! ignored.

use std::rc::Rc;

use crate::core::EntityId;
use crate::presentation::{ActionRequest, ExpectedAction, Presentation, Selection, UiEvent};
use crate::session::Session;

/// Register the dominion UI callbacks.
pub fn install<P: Presentation>(session: &mut Session<P>) {
    session.register_callback("click", "card", Rc::new(card_on_click));
    session.register_callback("click", "supply", Rc::new(supply_on_click));
}

/// Request to move on to the next turn phase.
#[must_use]
pub fn next_phase() -> ActionRequest {
    ActionRequest::new("next_phase")
}

/// Send the selected cards as the answer to a pending list question.
#[must_use]
pub fn send_selected(expected: &ExpectedAction, selection: &Selection) -> Option<ActionRequest> {
    if !expected.wants_information() {
        return None;
    }
    expected.answer_with_selection(selection)
}

/// Answer a yes/no question addressed to `player`.
#[must_use]
pub fn confirm(expected: &ExpectedAction, player: EntityId, answer: bool) -> Option<ActionRequest> {
    if !expected.wants_information() || !expected.is_question_for(player) {
        return None;
    }
    expected.answer(answer)
}

fn card_on_click(event: &mut UiEvent<'_>) {
    let Some(card) = event.target.entity else {
        return;
    };
    match event.expected.filter(|expected| expected.wants_information()) {
        Some(expected) => pick(event, expected, card),
        None => event.request(ActionRequest::new("play_card").with_arg("card", card.raw())),
    }
}

fn supply_on_click(event: &mut UiEvent<'_>) {
    let Some(pile) = event.target.entity else {
        return;
    };
    match event.expected.filter(|expected| expected.wants_information()) {
        Some(expected) => pick(event, expected, pile),
        None => event.request(ActionRequest::new("buy").with_arg("buy_zone", pile.raw())),
    }
}

fn pick(event: &mut UiEvent<'_>, expected: &ExpectedAction, entity: EntityId) {
    let accepted = expected
        .target_class()
        .is_some_and(|class| event.target.has_class(&class));
    if !accepted {
        log::debug!("{entity} is not a valid answer for {:?}", expected.expects);
        return;
    }

    if expected.expects_many() {
        event.selection.toggle(entity);
    } else if let Some(request) = expected.answer(entity.raw()) {
        event.request(request);
    }
}
