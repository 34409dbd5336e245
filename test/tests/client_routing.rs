//! Client side of the boundary: deferred requests, acknowledgements,
//! timeouts and resyncs.

use std::time::{Duration, Instant};

use coffer_client::{ClientConfig, RequestTimeoutEvent, UnknownDeltaEvent, TIMEOUT_MESSAGE};
use coffer_server::{InventoryServerError, OpenState};
use coffer_shared::{
    ClientMessage, ContainerDelta, ContainerId, ContainerKind, ObjectRef, PlayerRef,
    ServerMessage, Slot, SlotChange,
};
use coffer_test::{
    assert_mirrors_server, assert_refused, exchange_packets, init_logging, TestServer, WOOD,
};

#[test]
fn requests_before_binding_are_flushed_in_order() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect_unbound(1);

    alice.client.open_local_quick().unwrap();
    alice.client.open_local_main().unwrap();
    let ack = alice.on_ack();
    alice.client.pickup(WOOD, 4, 0, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.client.deferred_count(), 3);
    assert!(alice.acks().is_empty());

    server.server.spawn_player(alice.player).unwrap();
    alice.client.bind_local(alice.player).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.acks(), vec![(true, String::new())]);
    let main = alice.main_id();
    assert_eq!(alice.slot(&main, 0), Some(Slot::new(WOOD, 4)));
    assert_mirrors_server!(server, alice, main);
    assert_mirrors_server!(server, alice, alice.quick_id());
}

#[test]
fn opens_sent_before_spawn_wait_for_the_containers() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);

    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    let main = alice.main_id();
    assert_eq!(
        server.server.open_state(&alice.player, &main),
        OpenState::PendingOpen
    );

    server.server.spawn_player(alice.player).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert!(alice.client.is_open(&main));
}

#[test]
fn unacknowledged_requests_time_out_once() {
    init_logging();
    let mut server = TestServer::new();
    let config = ClientConfig {
        operation_timeout: Some(Duration::from_secs(1)),
        ..ClientConfig::default()
    };
    let mut alice = server.connect_with(1, config);
    alice.client.bind_local(alice.player).unwrap();
    server.server.spawn_player(alice.player).unwrap();

    let ack = alice.on_ack();
    let request_id = alice.client.pickup(WOOD, 1, 0, ack).unwrap();
    alice.client.tick(Instant::now() + Duration::from_secs(2));

    assert_eq!(alice.acks(), vec![(false, TIMEOUT_MESSAGE.to_string())]);
    let mut events = alice.client.take_events();
    let timeouts: Vec<_> = events.read::<RequestTimeoutEvent>().collect();
    assert_eq!(timeouts, vec![request_id]);

    // the late acknowledgement finds nothing to complete
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_eq!(alice.acks().len(), 1);
    assert_eq!(alice.client.pending_count(), 0);
}

#[test]
fn full_resync_sends_own_containers() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    server.server.add_item_to_player(alice.player, WOOD, 12, 0).unwrap();

    alice.client.request_full_resync().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    let (quick, main) = (alice.quick_id(), alice.main_id());
    assert!(alice.client.is_open(&quick));
    assert_mirrors_server!(server, alice, quick);
    assert_mirrors_server!(server, alice, main);
    assert_eq!(alice.client.capacity(&main), Some(24));
    assert_eq!(
        server.server.view().watched_by(&alice.player).len(),
        2
    );
}

#[test]
fn partial_identities_resolve_to_cached_snapshots() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    let chest = server.server.spawn_chest(ObjectRef::new(12)).unwrap();

    alice.client.open(&chest).unwrap();
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    let by_object = ContainerId::new(ContainerKind::Chest, PlayerRef::new(77), ObjectRef::new(12));
    assert_eq!(
        alice.client.snapshot_resolved(&by_object).map(|snapshot| snapshot.id),
        Some(chest)
    );

    // an unset owner is filled in with the local player
    let unowned = ContainerId::player_main(PlayerRef::NONE);
    assert_eq!(
        alice.client.snapshot(&unowned).map(|snapshot| snapshot.id),
        Some(alice.main_id())
    );
}

#[test]
fn deltas_for_unopened_containers_are_reported() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    let chest = ContainerId::of_object(ContainerKind::Chest, ObjectRef::new(5));

    let mut delta = ContainerDelta::new(chest, 0);
    delta.push(SlotChange::new(0, Slot::new(WOOD, 1)), 1);
    alice
        .client
        .receive_message(ServerMessage::delta(&delta))
        .unwrap();

    let mut events = alice.client.take_events();
    let unknown: Vec<_> = events.read::<UnknownDeltaEvent>().collect();
    assert_eq!(unknown, vec![chest]);
}

#[test]
fn requests_without_a_service_are_refused() {
    init_logging();
    let mut server = TestServer::without_service();
    let mut alice = server.connect(1);
    let main = alice.main_id();

    let ack = alice.on_ack();
    alice.client.transfer(&main, 0, &main, 1, 1, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_refused!(alice, "no_server");

    let ack = alice.on_ack();
    alice.client.pickup(WOOD, 1, 0, ack).unwrap();
    let ack = alice.on_ack();
    alice.client.reload(0, ack).unwrap();
    let ack = alice.on_ack();
    alice.client.drop_item(0, 1, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    let acks = alice.acks();
    assert_eq!(acks.len(), 4);
    assert!(acks
        .iter()
        .all(|(ok, message)| !ok && message.as_str() == "no_server"));

    // opens are ignored rather than queued
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_eq!(
        server.server.open_state(&alice.player, &main),
        OpenState::Unopened
    );
}

#[test]
fn messages_from_unknown_players_are_rejected() {
    init_logging();
    let mut server = TestServer::new();
    let stranger = PlayerRef::new(404);

    assert_eq!(
        server
            .server
            .receive_message(stranger, ClientMessage::FullResync, Instant::now()),
        Err(InventoryServerError::UnknownSession { player: stranger })
    );
}
