//! Socket event vocabulary.
//!
//! Every message is an event name plus a JSON payload. [`ServerMessage`]
//! decodes inbound events; [`ClientMessage`] encodes outbound ones.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::core::{SessionConfig, SyncError, SyncResult};
use crate::objects::EntityDescriptor;
use crate::presentation::{ActionRequest, ExpectedAction};
use crate::transitions::Transition;

/// A seat and the name shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerName {
    pub id: u64,
    pub nickname: String,
}

/// Event received from the server.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    /// A player started the game.
    Start,
    /// Full snapshot.
    State(Vec<EntityDescriptor>),
    /// Incremental batch.
    StateTransitions(Vec<Transition>),
    /// Final result, not interpreted.
    GameOver(Json),
    /// Error text from the server.
    Error(String),
    /// Roster of the room.
    PlayerNames(Vec<PlayerName>),
    /// The local player's seat.
    PlayerNick(PlayerName),
    /// What the server waits for next; `None` clears it.
    ExpectedAction(Option<ExpectedAction>),
    /// The room was closed or the player was removed.
    LeaveGame,
}

impl ServerMessage {
    /// Decode an inbound event.
    ///
    /// Malformed snapshot entries and transitions are dropped individually;
    /// the payload as a whole must still have the right shape.
    pub fn from_event(name: &str, payload: Json) -> SyncResult<Self> {
        match name {
            "start" => Ok(Self::Start),
            "state" => Ok(Self::State(EntityDescriptor::parse_snapshot(
                list_payload(name, payload)?,
            ))),
            "state_transitions" => Ok(Self::StateTransitions(Transition::parse_batch(
                &list_payload(name, payload)?,
            ))),
            "game_over" => Ok(Self::GameOver(payload)),
            "error" => Ok(Self::Error(match payload {
                Json::String(text) => text,
                other => other.to_string(),
            })),
            "player_names" => Ok(Self::PlayerNames(serde_json::from_value(payload)?)),
            "player_nick" => Ok(Self::PlayerNick(serde_json::from_value(payload)?)),
            "expected_action" => Ok(Self::ExpectedAction(serde_json::from_value(payload)?)),
            "leave_game" => Ok(Self::LeaveGame),
            _ => Err(SyncError::UnknownEvent(name.to_string())),
        }
    }

    /// Event name on the wire.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::State(_) => "state",
            Self::StateTransitions(_) => "state_transitions",
            Self::GameOver(_) => "game_over",
            Self::Error(_) => "error",
            Self::PlayerNames(_) => "player_names",
            Self::PlayerNick(_) => "player_nick",
            Self::ExpectedAction(_) => "expected_action",
            Self::LeaveGame => "leave_game",
        }
    }
}

fn list_payload(name: &str, payload: Json) -> SyncResult<Vec<Json>> {
    match payload {
        Json::Array(items) => Ok(items),
        other => {
            let reason = format!("`{name}` payload must be a list, got {other}");
            Err(if name == "state" {
                SyncError::MalformedDescriptor(reason)
            } else {
                SyncError::MalformedTransition(reason)
            })
        }
    }
}

/// Event sent to the server.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientMessage {
    /// Enter a game room as a player.
    Join { game_room_id: u64, player_id: u64 },
    /// Start the game.
    Start,
    /// Ask for a full snapshot.
    RequestState,
    /// Perform a game action.
    Action(ActionRequest),
    /// Leave the room.
    LeaveGame,
    /// Close the room for everyone.
    DestroyGame,
    /// Give up the current game.
    AbandonShip,
}

impl ClientMessage {
    /// Join message for a configured session.
    #[must_use]
    pub fn join(config: &SessionConfig) -> Self {
        Self::Join {
            game_room_id: config.game_room_id,
            player_id: config.player_id,
        }
    }

    /// Event name on the wire.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Start => "start",
            Self::RequestState => "request_state",
            Self::Action(_) => "action",
            Self::LeaveGame => "leave_game",
            Self::DestroyGame => "destroy_game",
            Self::AbandonShip => "abandon_ship",
        }
    }

    /// JSON payload. Messages without a payload send `null`.
    ///
    /// An action's payload is its argument map with `action_name` added.
    #[must_use]
    pub fn payload(&self) -> Json {
        match self {
            Self::Join {
                game_room_id,
                player_id,
            } => serde_json::json!({
                "game_room_id": game_room_id,
                "player_id": player_id,
            }),
            Self::Action(request) => {
                let mut args = request.args.clone();
                args.insert("action_name".to_string(), Json::String(request.name.clone()));
                Json::Object(args)
            }
            Self::Start
            | Self::RequestState
            | Self::LeaveGame
            | Self::DestroyGame
            | Self::AbandonShip => Json::Null,
        }
    }
}
