//! Actions the server is waiting for.
//!
//! Some games pause for a player's answer (discard some cards, pick a pile,
//! confirm a choice). The server announces this with an `expected_action`
//! event whose payload is positional:
//! `[action, information_name, expected_type, player, prompt]`, or null once
//! nothing is expected any more. Trailing entries may be missing.

use serde::Deserialize;

use super::{ActionRequest, Selection};
use crate::core::EntityId;

/// Action name for answering the server's question.
pub const SEND_INFORMATION: &str = "send_information";

/// An action the server expects next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExpectedAction {
    /// Expected action name.
    pub action: String,
    /// Argument name the answer is sent under.
    #[serde(default)]
    pub information: Option<String>,
    /// Type of the answer: `Card`, `Cards`, `Supply`, `Bool`, ...
    #[serde(default)]
    pub expects: Option<String>,
    /// Player asked, if the server named one.
    #[serde(default)]
    pub player: Option<EntityId>,
    /// Question shown to the player.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl ExpectedAction {
    /// Create an information request for `information` of type `expects`.
    pub fn information(information: impl Into<String>, expects: impl Into<String>) -> Self {
        Self {
            action: SEND_INFORMATION.to_string(),
            information: Some(information.into()),
            expects: Some(expects.into()),
            ..Self::default()
        }
    }

    /// Set the player asked (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: u64) -> Self {
        self.player = Some(EntityId(player));
        self
    }

    /// Check if this asks the player to send information.
    #[must_use]
    pub fn wants_information(&self) -> bool {
        self.action == SEND_INFORMATION && self.information.is_some()
    }

    /// Check if the answer is a list of cards collected by selection.
    #[must_use]
    pub fn expects_many(&self) -> bool {
        self.expects.as_deref() == Some("Cards")
    }

    /// Check if the answer is a yes/no for `player`.
    #[must_use]
    pub fn is_question_for(&self, player: EntityId) -> bool {
        self.expects.as_deref() == Some("Bool") && self.player == Some(player)
    }

    /// Element class a clicked answer must carry.
    #[must_use]
    pub fn target_class(&self) -> Option<String> {
        if self.expects_many() {
            return Some("card".to_string());
        }
        self.expects.as_deref().map(str::to_lowercase)
    }

    /// Answer request carrying `value` under the information name.
    pub fn answer(&self, value: impl Into<serde_json::Value>) -> Option<ActionRequest> {
        let name = self.information.as_deref()?;
        Some(ActionRequest::new(SEND_INFORMATION).with_arg(name, value))
    }

    /// Answer request carrying the selected entities as a list.
    #[must_use]
    pub fn answer_with_selection(&self, selection: &Selection) -> Option<ActionRequest> {
        let ids: Vec<u64> = selection.items().iter().map(|id| id.raw()).collect();
        self.answer(ids)
    }
}
