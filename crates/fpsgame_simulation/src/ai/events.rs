//! AI Events — перцепция от tactical layer и hooks для presentation
//!
//! Engine sensing (pawn sensing component) → PerceptionEvent → guard FSM
//! Guard FSM → GuardStateChanged / DebugMarker → presentation layer

use bevy::prelude::*;

use super::components::GuardState;

/// События сенсоров охранника (engine sensing callbacks)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PerceptionEvent {
    /// Охранник увидел pawn'а
    PawnSeen {
        /// Entity охранника (у кого сенсор)
        observer: Entity,
        /// Кого увидели (None — сенсор отдал пустую ссылку)
        pawn: Option<Entity>,
    },

    /// Охранник услышал шум
    NoiseHeard {
        observer: Entity,
        /// Кто нашумел (может отсутствовать, FSM его не использует)
        instigator: Option<Entity>,
        /// Где нашумели (world coordinates)
        location: Vec3,
        volume: f32,
    },
}

/// OnStateChanged hook
///
/// Пишется ровно один раз на каждый реальный переход (set с тем же
/// значением ничего не генерирует). На observer'ах — тоже, через replication.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardStateChanged {
    pub guard: Entity,
    pub previous: GuardState,
    pub current: GuardState,
}

/// Вид debug маркера (presentation выбирает цвет)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Жёлтая сфера на позиции замеченного pawn'а
    PawnSeen,
    /// Красная сфера в точке шума
    NoiseHeard,
}

/// Диагностическая сфера (debug draw), на логику не влияет
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DebugMarker {
    pub kind: MarkerKind,
    pub position: Vec3,
    pub radius: f32,
    pub lifetime_secs: f32,
}
