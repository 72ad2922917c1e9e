//! Headless симуляция FPSGame
//!
//! Запускает Bevy App без рендера: один охранник патрулирует, на 2-й секунде
//! слышит шум, на 7-й видит игрока.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use fpsgame_simulation::{
    create_headless_app, log_error, log_info, spawn_level, GuardState, HeadlessTacticalPlugin,
    LevelDescription, MissionDirector, PerceptionEvent, SimulationPlugin,
};

const LEVEL: &str = r#"{
    "patrol_points": [
        { "name": "gate", "position": [6.0, 0.0, 0.0] },
        { "name": "yard", "position": [-6.0, 0.0, 0.0] }
    ],
    "guards": [{
        "position": [0.0, 0.0, 0.0],
        "first_patrol_point": "gate",
        "second_patrol_point": "yard",
        "network_id": 1
    }],
    "pawns": [{ "position": [0.0, 0.0, 12.0] }],
    "objectives": [{ "position": [0.0, 0.0, -12.0] }]
}"#;

const TICKS: u32 = 600;
const NOISE_TICK: u32 = 120;
const SIGHTING_TICK: u32 = 420;

fn main() {
    let level = match LevelDescription::from_json_str(LEVEL) {
        Ok(level) => level,
        Err(err) => {
            log_error(&format!("Failed to parse level: {err}"));
            return;
        }
    };

    let mut app = create_headless_app();
    app.add_plugins((SimulationPlugin, HeadlessTacticalPlugin))
        // Один update = один fixed tick
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    let spawned = match spawn_level(app.world_mut(), &level) {
        Ok(spawned) => spawned,
        Err(err) => {
            log_error(&format!("Failed to spawn level: {err}"));
            return;
        }
    };

    let (Some(&guard), Some(&player)) = (spawned.guards.first(), spawned.pawns.first()) else {
        log_error("Level has no guard or no player");
        return;
    };

    log_info(&format!("Starting FPSGame headless simulation ({TICKS} ticks)"));

    let mut last_state = GuardState::Idle;
    for tick in 0..TICKS {
        if tick == NOISE_TICK {
            app.world_mut().send_event(PerceptionEvent::NoiseHeard {
                observer: guard,
                instigator: Some(player),
                location: Vec3::new(4.0, 0.0, 4.0),
                volume: 1.0,
            });
        }
        if tick == SIGHTING_TICK {
            app.world_mut().send_event(PerceptionEvent::PawnSeen {
                observer: guard,
                pawn: Some(player),
            });
        }

        app.update();

        let world = app.world();
        let state = world.get::<GuardState>(guard).copied().unwrap_or_default();
        if state != last_state || tick % 60 == 0 {
            let position = world
                .get::<Transform>(guard)
                .map(|transform| transform.translation)
                .unwrap_or_default();
            log_info(&format!("Tick {tick}: guard {state:?} at {position:.2}"));
            last_state = state;
        }
    }

    let outcome = app.world().resource::<MissionDirector>().outcome();
    log_info(&format!("Simulation complete! Mission outcome: {outcome:?}"));
}
