//! Replication integration test
//!
//! Два App: authority (сервер) и observer (клиент). Транспорт заменён
//! ручной перекачкой OutgoingGuardState → IncomingGuardState через JSON.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fpsgame_simulation::replication::GuardStateReplicated;
use fpsgame_simulation::*;

const LEVEL: &str = r#"{
    "guards": [
        { "position": [0.0, 0.0, 0.0], "network_id": 10 },
        { "position": [6.0, 0.0, 0.0], "network_id": 11 }
    ],
    "pawns": [{ "position": [0.0, 0.0, -5.0] }]
}"#;

fn create_app(role: NetRole) -> (App, SpawnedLevel) {
    let mut app = create_headless_app();
    app.add_plugins((SimulationPlugin, HeadlessTacticalPlugin))
        .insert_resource(role)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));
    app.update();

    let level = LevelDescription::from_json_str(LEVEL).expect("level parses");
    let spawned = spawn_level(app.world_mut(), &level).expect("level spawns");
    (app, spawned)
}

/// Один тик сервера + доставка сообщений клиенту + тик клиента
///
/// Возвращает сколько GuardStateChanged сработало на клиенте.
fn pump(server: &mut App, client: &mut App) -> usize {
    server.update();

    let messages: Vec<_> = server
        .world_mut()
        .resource_mut::<Events<OutgoingGuardState>>()
        .drain()
        .collect();
    for OutgoingGuardState(message) in messages {
        let wire = serde_json::to_string(&message).expect("serializes");
        let received: GuardStateReplicated = serde_json::from_str(&wire).expect("deserializes");
        client.world_mut().send_event(IncomingGuardState(received));
    }

    client.update();
    client
        .world_mut()
        .resource_mut::<Events<GuardStateChanged>>()
        .drain()
        .count()
}

fn state(app: &App, guard: Entity) -> GuardState {
    *app.world().get::<GuardState>(guard).expect("guard has GuardState")
}

#[test]
fn test_observer_follows_authority() {
    let (mut server, server_level) = create_app(NetRole::Authority);
    let (mut client, client_level) = create_app(NetRole::Observer);
    let mut client_hooks = 0;

    client_hooks += pump(&mut server, &mut client);

    server.world_mut().send_event(PerceptionEvent::NoiseHeard {
        observer: server_level.guards[0],
        instigator: None,
        location: Vec3::new(0.0, 0.0, 4.0),
        volume: 1.0,
    });
    client_hooks += pump(&mut server, &mut client);

    assert_eq!(state(&server, server_level.guards[0]), GuardState::Suspicious);
    assert_eq!(state(&client, client_level.guards[0]), GuardState::Suspicious);
    assert_eq!(state(&client, client_level.guards[1]), GuardState::Idle);

    server.world_mut().send_event(PerceptionEvent::PawnSeen {
        observer: server_level.guards[0],
        pawn: Some(server_level.pawns[0]),
    });
    for _ in 0..300 {
        client_hooks += pump(&mut server, &mut client);
    }

    assert_eq!(state(&client, client_level.guards[0]), GuardState::Alerted);
    // Idle → Suspicious → Alerted: по одному hook'у на переход
    assert_eq!(client_hooks, 2);
}

#[test]
fn test_observer_does_not_run_guard_ai() {
    let (mut client, client_level) = create_app(NetRole::Observer);
    let guard = client_level.guards[0];

    client.world_mut().send_event(PerceptionEvent::NoiseHeard {
        observer: guard,
        instigator: None,
        location: Vec3::new(0.0, 0.0, 4.0),
        volume: 1.0,
    });
    for _ in 0..10 {
        client.update();
    }

    // Решения принимает только authority
    assert_eq!(state(&client, guard), GuardState::Idle);
    assert!(client.world().resource::<MissionDirector>().outcome().is_none());
}

#[test]
fn test_late_observer_syncs_from_snapshot() {
    let (mut server, server_level) = create_app(NetRole::Authority);
    server.world_mut().send_event(PerceptionEvent::PawnSeen {
        observer: server_level.guards[1],
        pawn: Some(server_level.pawns[0]),
    });
    server.update();
    assert_eq!(state(&server, server_level.guards[1]), GuardState::Alerted);

    let (mut client, client_level) = create_app(NetRole::Observer);
    for message in replication::guard_state_snapshot(server.world_mut()) {
        client.world_mut().send_event(IncomingGuardState(message));
    }
    client.update();

    assert_eq!(state(&client, client_level.guards[0]), GuardState::Idle);
    assert_eq!(state(&client, client_level.guards[1]), GuardState::Alerted);
}
