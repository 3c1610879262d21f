//! Glue between a socket and a session.

use std::sync::mpsc;

use serde_json::Value as Json;

use super::message::{ClientMessage, PlayerName, ServerMessage};
use crate::core::{SessionConfig, SyncResult};
use crate::presentation::{ActionRequest, Presentation};
use crate::session::Session;

/// Outbound message sink.
pub trait Emitter {
    /// Send one message. Delivery failures are the sink's to report.
    fn emit(&mut self, message: ClientMessage);
}

impl Emitter for Vec<ClientMessage> {
    fn emit(&mut self, message: ClientMessage) {
        self.push(message);
    }
}

impl Emitter for mpsc::Sender<ClientMessage> {
    fn emit(&mut self, message: ClientMessage) {
        if let Err(mpsc::SendError(message)) = self.send(message) {
            log::warn!("transport closed, dropping `{}`", message.event_name());
        }
    }
}

/// An event as it arrives from the socket, before decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundEvent {
    pub name: String,
    pub payload: Json,
}

impl InboundEvent {
    pub fn new(name: impl Into<String>, payload: Json) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Routes server events into a [`Session`] and client requests out to an
/// [`Emitter`].
///
/// Also tracks the room roster and the local player's seat.
#[derive(Debug, Default)]
pub struct TransportAdapter<E: Emitter> {
    emitter: E,
    roster: Vec<PlayerName>,
    me: Option<PlayerName>,
    left: bool,
}

impl<E: Emitter> TransportAdapter<E> {
    pub fn new(emitter: E) -> Self {
        Self {
            emitter,
            roster: Vec::new(),
            me: None,
            left: false,
        }
    }

    /// Send a message.
    pub fn send(&mut self, message: ClientMessage) {
        log::trace!("emit `{}`", message.event_name());
        self.emitter.emit(message);
    }

    /// Join the configured game room.
    pub fn join(&mut self, config: &SessionConfig) {
        log::info!("joining room {} as player {}", config.game_room_id, config.player_id);
        self.send(ClientMessage::join(config));
    }

    pub fn start(&mut self) {
        self.send(ClientMessage::Start);
    }

    pub fn request_state(&mut self) {
        self.send(ClientMessage::RequestState);
    }

    /// Ask the server to perform an action.
    pub fn make_action(&mut self, request: ActionRequest) {
        self.send(ClientMessage::Action(request));
    }

    /// Send every request produced by a UI event. Returns how many were sent.
    pub fn dispatch(&mut self, requests: impl IntoIterator<Item = ActionRequest>) -> usize {
        let mut sent = 0;
        for request in requests {
            self.make_action(request);
            sent += 1;
        }
        sent
    }

    pub fn leave(&mut self) {
        self.send(ClientMessage::LeaveGame);
    }

    pub fn destroy_game(&mut self) {
        self.send(ClientMessage::DestroyGame);
    }

    /// Give up the current game.
    pub fn abandon_ship(&mut self) {
        self.send(ClientMessage::AbandonShip);
    }

    /// Decode and handle one inbound event.
    pub fn handle_event<P: Presentation>(
        &mut self,
        session: &mut Session<P>,
        name: &str,
        payload: Json,
    ) -> SyncResult<()> {
        let message = ServerMessage::from_event(name, payload).map_err(|err| {
            log::warn!("cannot decode `{name}`: {err}");
            err
        })?;
        self.handle(session, message)
    }

    /// Handle one decoded server message.
    pub fn handle<P: Presentation>(&mut self, session: &mut Session<P>, message: ServerMessage) -> SyncResult<()> {
        match message {
            ServerMessage::Start => {
                log::info!("game started, requesting state");
                self.request_state();
            }
            ServerMessage::State(descriptors) => {
                log::info!("received state: {} objects", descriptors.len());
                session.load_snapshot(&descriptors)?;
            }
            ServerMessage::StateTransitions(batch) => {
                log::debug!("applying {} transitions", batch.len());
                session.apply_transitions(&batch);
            }
            ServerMessage::GameOver(result) => {
                log::info!("game over");
                session.view_mut().game_over(&result);
            }
            ServerMessage::Error(text) => log::warn!("server error: {text}"),
            ServerMessage::PlayerNames(names) => self.roster = names,
            ServerMessage::PlayerNick(me) => self.me = Some(me),
            ServerMessage::ExpectedAction(expected) => {
                log::debug!("server expects {expected:?}");
                session.view_mut().expected_action(expected.as_ref());
            }
            ServerMessage::LeaveGame => {
                log::info!("left the game");
                self.left = true;
            }
        }
        Ok(())
    }

    /// Handle every event queued on `inbound`, in arrival order.
    ///
    /// Returns the number of events drained. Failures are logged and do not
    /// stop the drain.
    pub fn pump<P: Presentation>(&mut self, session: &mut Session<P>, inbound: &mpsc::Receiver<InboundEvent>) -> usize {
        let mut drained = 0;
        while let Ok(event) = inbound.try_recv() {
            if let Err(err) = self.handle_event(session, &event.name, event.payload) {
                log::debug!("event `{}` failed: {err}", event.name);
            }
            drained += 1;
        }
        drained
    }

    /// Room roster from the last `player_names`.
    #[must_use]
    pub fn roster(&self) -> &[PlayerName] {
        &self.roster
    }

    /// Nickname of a seat.
    #[must_use]
    pub fn nickname(&self, id: u64) -> Option<&str> {
        self.roster
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.nickname.as_str())
    }

    /// The local player's seat, once the server announced it.
    #[must_use]
    pub fn my_player(&self) -> Option<&PlayerName> {
        self.me.as_ref()
    }

    #[must_use]
    pub fn has_left(&self) -> bool {
        self.left
    }

    #[must_use]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }
}
