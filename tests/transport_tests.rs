//! Transport adapter integration tests.
//!
//! These tests feed raw socket events through a `TransportAdapter` and
//! check the session state and the outbound messages.

use std::sync::mpsc;
use std::thread;

use deckr_client::core::{EntityId, SessionConfig, SyncError, Value};
use deckr_client::objects::GameObject;
use deckr_client::presentation::{ActionRequest, ExpectedAction, HeadlessView};
use deckr_client::session::Session;
use deckr_client::transport::{ClientMessage, InboundEvent, TransportAdapter};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup() -> (TransportAdapter<Vec<ClientMessage>>, Session<HeadlessView>) {
    init_logging();
    (
        TransportAdapter::new(Vec::new()),
        Session::new(SessionConfig::new(12, 1), HeadlessView::new()),
    )
}

fn server_snapshot() -> serde_json::Value {
    json!([
        {"game_id": 1, "game_object_type": "Player", "nickname": "ada"},
        {"game_id": 2, "game_object_type": "Zone", "owner": 1, "objects": [3], "name": "hand"},
        {"game_id": 3, "game_object_type": "Card", "face_up": false,
         "front_face": "QS.png", "back_face": "back.png"},
        {"game_id": 4, "game_object_type": "Zone", "owner": null, "objects": [], "name": "play_zone"},
    ])
}

// =============================================================================
// Outbound Tests
// =============================================================================

/// Test the join, start and action sequence.
#[test]
fn test_outbound_sequence() {
    let (mut adapter, session) = setup();
    adapter.join(session.config());
    adapter.start();
    adapter.make_action(ActionRequest::new("draw"));
    adapter.leave();

    let events: Vec<_> = adapter.emitter().iter().map(ClientMessage::event_name).collect();
    assert_eq!(events, vec!["join", "start", "action", "leave_game"]);
    assert_eq!(
        adapter.emitter()[0].payload(),
        json!({"game_room_id": 12, "player_id": 1})
    );
    assert_eq!(adapter.emitter()[2].payload(), json!({"action_name": "draw"}));
}

/// Test that requests collected from UI events are all sent.
#[test]
fn test_dispatch_requests() {
    let (mut adapter, _session) = setup();
    let sent = adapter.dispatch(vec![
        ActionRequest::new("play_card").with_arg("card", 3),
        ActionRequest::new("take_trick"),
    ]);
    assert_eq!(sent, 2);
    assert_eq!(adapter.emitter().len(), 2);
}

// =============================================================================
// Inbound Tests
// =============================================================================

/// Test a full game flow over server-named fields.
#[test]
fn test_inbound_game_flow() {
    let (mut adapter, mut session) = setup();

    adapter.handle_event(&mut session, "start", serde_json::Value::Null).unwrap();
    assert_eq!(adapter.emitter(), &vec![ClientMessage::RequestState]);

    adapter.handle_event(&mut session, "state", server_snapshot()).unwrap();
    assert_eq!(session.registry().len(), 4);

    adapter
        .handle_event(
            &mut session,
            "state_transitions",
            json!([
                {"name": "add", "object": 3, "zone": 4},
                ["set", "Card", 3, "face_up", true],
            ]),
        )
        .unwrap();

    let card = session.get(EntityId(3)).unwrap();
    assert_eq!(card.get("face_up"), Some(&Value::Bool(true)));
    assert_eq!(
        session.registry().zone(EntityId(4)).unwrap().members(),
        &[EntityId(3)]
    );
    let handle = session.view().handle_for(EntityId(3)).unwrap();
    assert_eq!(
        session.view().attribute(handle, "src"),
        Some(&Value::from("/static/deckr/cards/QS.png"))
    );

    adapter
        .handle_event(&mut session, "game_over", json!([["ada", true, 1]]))
        .unwrap();
    assert_eq!(session.view().game_result(), Some(&json!([["ada", true, 1]])));
}

/// Test that a second state message is reported but harmless.
#[test]
fn test_second_state_reported() {
    let (mut adapter, mut session) = setup();
    adapter.handle_event(&mut session, "state", server_snapshot()).unwrap();

    let result = adapter.handle_event(&mut session, "state", server_snapshot());
    assert!(matches!(result, Err(SyncError::AlreadyPopulated)));
    assert_eq!(session.registry().len(), 4);
}

/// Test that the expected action reaches the view and null clears it.
#[test]
fn test_expected_action_event() {
    let (mut adapter, mut session) = setup();
    adapter.handle_event(&mut session, "state", server_snapshot()).unwrap();
    session.view_mut().selection_mut().toggle(EntityId(3));

    adapter
        .handle_event(
            &mut session,
            "expected_action",
            json!(["send_information", "cards", "Cards", 1, "Discard cards"]),
        )
        .unwrap();
    let expected = session.view().expected().unwrap();
    assert!(expected.expects_many());
    assert_eq!(expected.prompt.as_deref(), Some("Discard cards"));
    assert!(session.view().selection().is_empty());

    let answer = ExpectedAction::information("cards", "Cards").answer(json!([3]));
    adapter.dispatch(answer);
    assert_eq!(
        adapter.emitter().last().map(ClientMessage::payload),
        Some(json!({"action_name": "send_information", "cards": [3]}))
    );

    adapter
        .handle_event(&mut session, "expected_action", serde_json::Value::Null)
        .unwrap();
    assert!(session.view().expected().is_none());
}

/// Test that abandoning the game sends its own event.
#[test]
fn test_abandon_ship() {
    let (mut adapter, _session) = setup();
    adapter.abandon_ship();
    assert_eq!(adapter.emitter(), &vec![ClientMessage::AbandonShip]);
    assert_eq!(adapter.emitter()[0].event_name(), "abandon_ship");
}

/// Test that the snapshot owner of a zone is read from its attribute.
#[test]
fn test_zone_owner_from_state() {
    let (mut adapter, mut session) = setup();
    adapter.handle_event(&mut session, "state", server_snapshot()).unwrap();

    assert_eq!(
        session.registry().zone(EntityId(2)).unwrap().owner(),
        Some(EntityId(1))
    );
    assert!(session.registry().zone(EntityId(4)).unwrap().is_unowned());
}

/// Test that unknown events are rejected.
#[test]
fn test_unknown_event() {
    let (mut adapter, mut session) = setup();
    let result = adapter.handle_event(&mut session, "chat", json!({"msg": "hi"}));
    assert!(matches!(result, Err(SyncError::UnknownEvent(_))));
}

/// Test that server errors are logged, not returned.
#[test]
fn test_server_error_is_not_fatal() {
    let (mut adapter, mut session) = setup();
    adapter
        .handle_event(&mut session, "error", json!("not your turn"))
        .unwrap();
    assert!(adapter.emitter().is_empty());
}

// =============================================================================
// Channel Tests
// =============================================================================

/// Test that events produced on another thread are applied in order.
#[test]
fn test_pump_preserves_order() {
    let (mut adapter, mut session) = setup();
    let (tx, rx) = mpsc::channel();

    let producer = thread::spawn(move || {
        tx.send(InboundEvent::new("state", server_snapshot())).unwrap();
        tx.send(InboundEvent::new("state_transitions", json!([["add", 3, 4]])))
            .unwrap();
        tx.send(InboundEvent::new("bogus", serde_json::Value::Null)).unwrap();
        tx.send(InboundEvent::new("state_transitions", json!([["add", 3, 2]])))
            .unwrap();
    });
    producer.join().unwrap();

    assert_eq!(adapter.pump(&mut session, &rx), 4);
    assert_eq!(
        session.registry().zone(EntityId(2)).unwrap().members(),
        &[EntityId(3), EntityId(3)]
    );
    assert_eq!(session.view().parent_entity(EntityId(3)), Some(EntityId(2)));
}

/// Test that outbound messages can go through a channel.
#[test]
fn test_sender_emitter() {
    init_logging();
    let (tx, rx) = mpsc::channel::<ClientMessage>();
    let mut adapter = TransportAdapter::new(tx);
    adapter.request_state();
    adapter.destroy_game();

    let received: Vec<ClientMessage> = rx.try_iter().collect();
    assert_eq!(received, vec![ClientMessage::RequestState, ClientMessage::DestroyGame]);
}
