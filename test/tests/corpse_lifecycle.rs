//! Corpses: packed from a dead player's inventory, looted, and despawned
//! once empty.

use coffer_server::{CorpseDespawnedEvent, InventoryServerError, OpenState, ServerEvent};
use coffer_shared::{ContainerKind, InventoryError, ObjectRef};
use coffer_test::{
    assert_mirrors_server, exchange_packets, init_logging, TestServer, PISTOL, WOOD,
};

#[test]
fn corpse_takes_everything_the_player_carried() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.join(1);
    let mut bob = server.join(2);

    server.server.add_item_to_player(alice.player, PISTOL, 1, 9).unwrap();
    server.server.add_item_to_player(alice.player, WOOD, 14, 0).unwrap();
    alice.client.open_local_quick().unwrap();
    alice.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    let object = ObjectRef::new(50);
    let corpse = server
        .server
        .spawn_corpse_from_player(alice.player, object)
        .unwrap()
        .expect("alice carried items");
    assert_eq!(corpse.kind, ContainerKind::Corpse);

    let container = server.server.container(&corpse).unwrap();
    assert_eq!(container.capacity(), 3);
    assert_eq!(container.slot(0).unwrap().ammo(), 9);

    // the player's own containers were cleared and the clear was mirrored
    exchange_packets(&mut server, &mut [&mut alice, &mut bob]);
    let (quick, main) = (alice.quick_id(), alice.main_id());
    assert_eq!(server.server.container(&main).unwrap().non_empty_count(), 0);
    assert_mirrors_server!(server, alice, quick);
    assert_mirrors_server!(server, alice, main);

    bob.client.open(&corpse).unwrap();
    exchange_packets(&mut server, &mut [&mut bob]);
    assert_mirrors_server!(server, bob, corpse);
}

#[test]
fn looting_the_last_stack_despawns_the_corpse() {
    init_logging();
    let mut server = TestServer::new();
    let alice = server.join(1);
    let mut bob = server.join(2);

    server.server.add_item_to_player(alice.player, WOOD, 4, 0).unwrap();
    let object = ObjectRef::new(51);
    let corpse = server
        .server
        .spawn_corpse_from_player(alice.player, object)
        .unwrap()
        .unwrap();

    bob.client.open(&corpse).unwrap();
    bob.client.open_local_main().unwrap();
    exchange_packets(&mut server, &mut [&mut bob]);

    let main = bob.main_id();
    let ack = bob.on_ack();
    bob.client.transfer(&corpse, 0, &main, 0, 0, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut bob]);

    assert_eq!(bob.last_ack(), Some((true, String::new())));
    assert!(server.server.container(&corpse).is_none());
    assert_eq!(server.server.open_state(&bob.player, &corpse), OpenState::Closed);
    assert_mirrors_server!(server, bob, main);

    let mut events = server.server.take_events();
    assert!(CorpseDespawnedEvent::has(&events));
    let despawned: Vec<_> = events.read::<CorpseDespawnedEvent>().collect();
    assert_eq!(despawned, vec![object]);
}

#[test]
fn empty_handed_players_leave_no_corpse() {
    init_logging();
    let mut server = TestServer::new();
    let alice = server.join(1);

    let corpse = server
        .server
        .spawn_corpse_from_player(alice.player, ObjectRef::new(52))
        .unwrap();
    assert_eq!(corpse, None);
    assert_eq!(server.server.registry().len(), 2);
}

#[test]
fn corpses_need_spawned_player_containers() {
    init_logging();
    let mut server = TestServer::new();
    let alice = server.connect(1);

    assert_eq!(
        server
            .server
            .spawn_corpse_from_player(alice.player, ObjectRef::new(53)),
        Err(InventoryServerError::Inventory(
            InventoryError::PlayerContainersMissing
        ))
    );
}
