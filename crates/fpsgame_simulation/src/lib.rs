//! FPSGame Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (strategic layer) для stealth FPS:
//! охранники, objective, итог миссии, репликация состояния охранников.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (guard FSM, mission rules, replication)
//! - Engine = tactical layer (sensing, navigation, physics, rendering)
//!
//! Для headless запуска и тестов tactical layer заменяет HeadlessTacticalPlugin.

use bevy::prelude::*;

// Публичные модули
pub mod ai;
pub mod components;
pub mod level;
pub mod logger;
pub mod mission;
pub mod objective;
pub mod replication;
pub mod tactical;

// Re-export основных типов для удобства
pub use ai::{
    DebugMarker, Guard, GuardAiPlugin, GuardAiSystems, GuardConfig, GuardState, GuardStateChanged,
    MarkerKind, PatrolPoint, PatrolRoute, PerceptionEvent,
};
pub use components::*;
pub use level::{spawn_level, LevelDescription, LevelError, SpawnedLevel};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use mission::{MissionCompleted, MissionDirector, MissionPlugin};
pub use objective::{ActorOverlapBegin, Objective, ObjectivePlugin, PickupEffectRequested};
pub use replication::{
    IncomingGuardState, NetRole, NetworkId, OutgoingGuardState, ReplicationPlugin,
};
pub use tactical::HeadlessTacticalPlugin;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Tactical layer не входит: в игре его даёт engine, в headless —
/// HeadlessTacticalPlugin.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((
                ReplicationPlugin,
                GuardAiPlugin,
                MissionPlugin,
                ObjectivePlugin,
            ));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
