//! Movement компоненты: команды перемещения, скорость

use bevy::prelude::*;

/// Команда движения для актора (выполняется navigation collaborator'ом)
///
/// Архитектура:
/// - ECS система пишет MovementCommand (high-level intent)
/// - Tactical layer (engine navigation) читает и строит путь сам
/// - Наличие компонента = у актора есть movement controller
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Нет активного приказа
    Idle,
    /// Двигаться к entity, считать прибытием попадание в acceptance_radius
    MoveToEntity {
        target: Entity,
        acceptance_radius: f32,
    },
    /// Остановиться немедленно (сбросить текущий путь)
    Stop,
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

impl MovementCommand {
    /// Entity к которой сейчас идём (если есть)
    pub fn target(&self) -> Option<Entity> {
        match self {
            MovementCommand::MoveToEntity { target, .. } => Some(*target),
            MovementCommand::Idle | MovementCommand::Stop => None,
        }
    }
}

/// Скорость движения актора (метры/сек)
///
/// Используется headless navigation; engine navigation берёт свою.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 2.0 } // 2 m/s — базовая скорость ходьбы
    }
}
