//! Базовые компоненты pawn'ов: Pawn, InputState

use bevy::prelude::*;

/// Pawn — любой персонаж в мире, которого могут заметить сенсоры охраны
/// (игрок, NPC-союзник, заложник).
///
/// Автоматически добавляет InputState через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(InputState)]
pub struct Pawn;

/// Принимает ли pawn ввод прямо сейчас
///
/// Используется как эвристика "это игрок": NPC ввод не принимают.
/// Mission director выключает ввод у pawn'а, завершившего миссию.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct InputState {
    pub enabled: bool,
}

impl InputState {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default_is_disabled() {
        // NPC по умолчанию не принимают ввод
        assert!(!InputState::default().enabled);
        assert!(InputState::enabled().enabled);
        assert_eq!(InputState::disabled(), InputState::default());
    }

    #[test]
    fn test_pawn_requires_input_state() {
        let mut world = World::new();
        let pawn = world.spawn(Pawn).id();

        let input = world.get::<InputState>(pawn).copied();
        assert_eq!(input, Some(InputState::disabled()));
    }
}
