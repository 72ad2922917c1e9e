//! Guard AI module
//!
//! Охранник: три состояния (Idle → Suspicious → Alerted), реакция на
//! сенсоры, патруль между двумя точками в Idle.
//!
//! Tactical layer (engine) отвечает за sensing, navigation, физику;
//! сюда приходят только PerceptionEvent, отсюда уходят MovementCommand,
//! GuardStateChanged и DebugMarker.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use systems::*;

use crate::mission::MissionCompleted;
use crate::replication::{is_authority, ReplicationRegistry};

/// Набор guard систем (для упорядочивания других плагинов относительно AI)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuardAiSystems;

/// Guard AI Plugin
///
/// Регистрирует guard системы в FixedUpdate, только на authority.
/// Порядок выполнения:
/// 1. guard_begin_play — OriginalRotation + первая patrol точка
/// 2. tick_suspicion_timers — reset orientation по таймауту
/// 3. react_to_perception — PawnSeen / NoiseHeard
/// 4. patrol_idle_guards — приказы движения для Idle
///
/// Таймер тикает ДО реакции: взведённый в этом тике таймер начинает
/// отсчёт со следующего тика.
pub struct GuardAiPlugin;

impl Plugin for GuardAiPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GuardState>()
            .register_type::<GuardConfig>()
            .register_type::<PatrolRoute>();

        app.add_event::<PerceptionEvent>()
            .add_event::<GuardStateChanged>()
            .add_event::<DebugMarker>()
            .add_event::<MissionCompleted>();

        app.init_resource::<ReplicationRegistry>();
        app.world_mut()
            .resource_mut::<ReplicationRegistry>()
            .register::<GuardState>();

        app.add_systems(
            FixedUpdate,
            (
                guard_begin_play,
                tick_suspicion_timers,
                react_to_perception,
                patrol_idle_guards,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(GuardAiSystems)
                .run_if(is_authority),
        );
    }
}
