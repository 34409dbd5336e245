//! Transfers requested by a client, validated by the server and mirrored
//! back through deltas.

use coffer_server::Container;
use coffer_shared::{ContainerId, ContainerKind, ItemState, ObjectRef, PlayerRef, Slot};
use coffer_test::{
    assert_mirrors_server, assert_refused, exchange_packets, init_logging, TestClient,
    TestServer, SHIELD, SWORD, WOOD,
};

fn spawn(server: &mut TestServer, player: PlayerRef, quick: Container, main: Container) {
    assert_eq!(quick.id(), &ContainerId::player_quick(player));
    assert_eq!(main.id(), &ContainerId::player_main(player));
    server.server.register_container(quick).unwrap();
    server.server.register_container(main).unwrap();
}

fn open_own(server: &mut TestServer, client: &mut TestClient) {
    client.client.open_local_quick().unwrap();
    client.client.open_local_main().unwrap();
    exchange_packets(server, &mut [client]);
}

#[test]
fn partial_move_into_empty_slot_of_same_container() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    spawn(
        &mut server,
        alice.player,
        Container::player_quick(alice.player, 4),
        Container::player_main(alice.player, 4).with_slot(0, Slot::new(WOOD, 5)),
    );
    open_own(&mut server, &mut alice);

    let main = alice.main_id();
    assert_eq!(alice.slot(&main, 0), Some(Slot::new(WOOD, 5)));

    let ack = alice.on_ack();
    alice.client.transfer(&main, 0, &main, 2, 3, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.last_ack(), Some((true, String::new())));
    assert_eq!(server.slot(&main, 0), Some(Slot::new(WOOD, 2)));
    assert_eq!(server.slot(&main, 2), Some(Slot::new(WOOD, 3)));
    assert_eq!(server.server.container(&main).unwrap().version(), 2);
    assert_mirrors_server!(server, alice, main);
}

#[test]
fn move_into_another_container_updates_both_watchers() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    let mut bob = server.connect(2);
    spawn(
        &mut server,
        alice.player,
        Container::player_quick(alice.player, 4),
        Container::player_main(alice.player, 4).with_slot(1, Slot::new(WOOD, 5)),
    );
    let chest = server.server.spawn_chest(ObjectRef::new(40)).unwrap();

    open_own(&mut server, &mut alice);
    alice.client.open(&chest).unwrap();
    bob.client.open(&chest).unwrap();
    exchange_packets(&mut server, &mut [&mut alice, &mut bob]);
    assert!(bob.client.is_open(&chest));

    let main = alice.main_id();
    let ack = alice.on_ack();
    alice.client.transfer(&main, 1, &chest, 0, 3, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice, &mut bob]);

    assert_eq!(alice.last_ack(), Some((true, String::new())));
    assert_eq!(bob.slot(&chest, 0), Some(Slot::new(WOOD, 3)));
    assert_eq!(alice.slot(&main, 1), Some(Slot::new(WOOD, 2)));
    assert_mirrors_server!(server, alice, main);
    assert_mirrors_server!(server, alice, chest);
    assert_mirrors_server!(server, bob, chest);

    // bob never watched alice's main inventory
    assert!(bob.client.snapshot(&main).is_none());
}

#[test]
fn whole_stack_merges_into_free_space() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    spawn(
        &mut server,
        alice.player,
        Container::player_quick(alice.player, 4).with_slot(3, Slot::new(WOOD, 4)),
        Container::player_main(alice.player, 4).with_slot(0, Slot::new(WOOD, 5)),
    );
    open_own(&mut server, &mut alice);

    let (quick, main) = (alice.quick_id(), alice.main_id());
    let ack = alice.on_ack();
    alice.client.transfer(&main, 0, &quick, 3, 0, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.last_ack(), Some((true, String::new())));
    assert!(server.slot(&main, 0).unwrap().is_empty());
    assert_eq!(server.slot(&quick, 3), Some(Slot::new(WOOD, 9)));
    assert_mirrors_server!(server, alice, quick);
    assert_mirrors_server!(server, alice, main);
}

#[test]
fn single_items_swap_with_their_state() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    spawn(
        &mut server,
        alice.player,
        Container::player_quick(alice.player, 4)
            .with_slot(0, Slot::with_state(SWORD, 1, ItemState::new(0, 40)))
            .with_slot(1, Slot::new(SHIELD, 1)),
        Container::player_main(alice.player, 4),
    );
    open_own(&mut server, &mut alice);

    let quick = alice.quick_id();
    let ack = alice.on_ack();
    alice.client.transfer(&quick, 0, &quick, 1, 1, ack).unwrap();
    exchange_packets(&mut server, &mut [&mut alice]);

    assert_eq!(alice.last_ack(), Some((true, String::new())));
    assert_eq!(server.slot(&quick, 0), Some(Slot::new(SHIELD, 1)));
    assert_eq!(
        server.slot(&quick, 1),
        Some(Slot::with_state(SWORD, 1, ItemState::new(0, 40)))
    );
    assert_mirrors_server!(server, alice, quick);
}

#[test]
fn refusals_leave_everything_untouched() {
    init_logging();
    let mut server = TestServer::new();
    let mut alice = server.connect(1);
    let bob = server.connect(2);
    spawn(
        &mut server,
        alice.player,
        Container::player_quick(alice.player, 4).with_slot(0, Slot::new(SWORD, 1)),
        Container::player_main(alice.player, 4).with_slot(0, Slot::new(WOOD, 5)),
    );
    spawn(
        &mut server,
        bob.player,
        Container::player_quick(bob.player, 4),
        Container::player_main(bob.player, 4),
    );
    open_own(&mut server, &mut alice);

    let (quick, main) = (alice.quick_id(), alice.main_id());
    let missing = ContainerId::of_object(ContainerKind::Chest, ObjectRef::new(99));

    let refusals = [
        (main, 0, quick, 0, 2, "partial_swap_not_supported"),
        (main, 0, main, 0, 1, "same_slot"),
        (main, 1, main, 2, 1, "empty"),
        (main, 9, main, 2, 1, "bad_index"),
        (main, -1, main, 2, 1, "bad_index"),
        (missing, 0, main, 2, 1, "from_not_found"),
        (main, 0, missing, 2, 1, "to_not_found"),
        (main, 0, ContainerId::player_main(bob.player), 0, 1, "no_access"),
    ];

    for (from, from_index, to, to_index, amount, reason) in refusals {
        let ack = alice.on_ack();
        alice
            .client
            .transfer(&from, from_index, &to, to_index, amount, ack)
            .unwrap();
        exchange_packets(&mut server, &mut [&mut alice]);
        assert_refused!(alice, reason);
    }

    assert_eq!(server.server.container(&main).unwrap().version(), 0);
    assert_eq!(server.server.container(&quick).unwrap().version(), 0);
    assert_mirrors_server!(server, alice, main);
    assert_mirrors_server!(server, alice, quick);
}
