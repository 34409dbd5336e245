//! Server-driven control: viewer scopes, despawns and service binding.

use coffer_client::ContainerChangedEvent;
use coffer_server::OpenState;
use coffer_test::{
    assert_mirrors_server, assert_refused, exchange_packets, exchange_packets_n_times,
    init_logging, test_catalog, TestServer, PISTOL, WOOD,
};

#[test]
fn scope_include_bypasses_access_checks() {
    init_logging();
    let mut server = TestServer::new();
    let alice = server.join(1);
    let mut bob = server.join(2);
    let alice_main = alice.main_id();

    server.server.viewer_scope_mut(bob.player).include(&alice_main);
    assert!(server.server.viewer_scope_mut(bob.player).has(&alice_main));

    server.server.add_item_to_player(alice.player, WOOD, 3, 0).unwrap();
    exchange_packets(&mut server, &mut [&mut bob]);
    assert_eq!(bob.slot(&alice_main, 0), Some(coffer_shared::Slot::new(WOOD, 3)));
    assert_mirrors_server!(server, bob, alice_main);

    server.server.viewer_scope_mut(bob.player).exclude(&alice_main);
    assert_eq!(
        server.server.open_state(&bob.player, &alice_main),
        OpenState::Closed
    );
    assert!(server.server.view().watchers(&alice_main).is_empty());
}

#[test]
fn scope_clear_releases_every_watch() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    let chest = server.server.spawn_chest(coffer_shared::ObjectRef::new(4)).unwrap();
    let (quick, main) = (alice.quick_id(), alice.main_id());

    server
        .server
        .viewer_scope_mut(alice.player)
        .include(&quick)
        .include(&main)
        .include(&chest);
    exchange_packets(&mut server, &mut [&mut alice]);
    assert!(alice.client.is_open(&chest));
    assert_eq!(server.server.view().watched_by(&alice.player).len(), 3);

    server.server.viewer_scope_mut(alice.player).clear();
    assert!(server.server.view().watched_by(&alice.player).is_empty());
    assert_eq!(server.server.open_state(&alice.player, &chest), OpenState::Closed);
}

#[test]
fn clearing_player_containers_is_mirrored() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    alice.client.open_local_quick().unwrap();
    alice.client.open_local_main().unwrap();
    server.server.add_item_to_player(alice.player, WOOD, 12, 0).unwrap();
    server.server.add_item_to_player(alice.player, PISTOL, 1, 5).unwrap();
    exchange_packets_n_times(&mut server, &mut [&mut alice], 2);

    server.server.clear_player_containers(alice.player).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    let (quick, main) = (alice.quick_id(), alice.main_id());
    assert_eq!(server.server.container(&quick).unwrap().non_empty_count(), 0);
    assert_eq!(server.server.container(&main).unwrap().non_empty_count(), 0);
    assert_mirrors_server!(server, alice, quick);
    assert_mirrors_server!(server, alice, main);
}

#[test]
fn despawned_players_close_their_watchers() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    let main = alice.main_id();
    assert_eq!(server.server.open_state(&alice.player, &main), OpenState::Open);

    server.server.despawn_player(alice.player);

    assert!(server.server.container(&main).is_none());
    assert!(server.server.container(&alice.quick_id()).is_none());
    assert_eq!(server.server.open_state(&alice.player, &main), OpenState::Closed);
}

#[test]
fn respawned_players_can_reopen_their_inventory() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    alice.client.open_local_quick().unwrap();
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    let (quick, main) = (alice.quick_id(), alice.main_id());

    server.server.despawn_player(alice.player);
    server.server.spawn_player(alice.player).unwrap();

    // the client still caches the old snapshots
    assert!(alice.client.is_open(&main));
    alice.client.open_local_quick().unwrap();
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_eq!(server.server.open_state(&alice.player, &main), OpenState::Open);
    assert_eq!(server.server.open_state(&alice.player, &quick), OpenState::Open);

    server.server.add_item_to_player(alice.player, WOOD, 3, 0).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.slot(&main, 0), Some(coffer_shared::Slot::new(WOOD, 3)));
    assert_mirrors_server!(server, alice, main);
    assert_mirrors_server!(server, alice, quick);
}

#[test]
fn service_can_be_unbound_and_rebound() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);

    assert!(server.server.unbind_service().is_some());
    assert!(!server.server.has_service());

    let ack = alice.on_ack();
    alice.client.pickup(WOOD, 2, 0, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_refused!(alice, "no_server");

    server.server.bind_service(test_catalog());
    let ack = alice.on_ack();
    alice.client.pickup(WOOD, 2, 0, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);
    assert_eq!(alice.last_ack(), Some((true, String::new())));
    assert_eq!(
        server.slot(&alice.main_id(), 0),
        Some(coffer_shared::Slot::new(WOOD, 2))
    );
}

#[test]
fn resync_sends_a_fresh_snapshot_to_every_watcher() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    let mut bob = server.join(2);
    let chest = server.server.spawn_chest(coffer_shared::ObjectRef::new(6)).unwrap();

    alice.client.open(&chest).unwrap();
    bob.client.open(&chest).unwrap();
    exchange_packets(&mut server, &mut [&mut alice, &mut bob]);
    alice.client.take_events();

    assert_eq!(server.server.resync_container(&chest), 2);
    assert_eq!(server.server.resync_container(&bob.quick_id()), 0);
    exchange_packets(&mut server, &mut [&mut alice, &mut bob]);

    let mut events = alice.client.take_events();
    let changes: Vec<_> = events.read::<ContainerChangedEvent>().collect();
    assert_eq!(changes, vec![chest]);
    assert_mirrors_server!(server, alice, chest);
    assert_mirrors_server!(server, bob, chest);
}
