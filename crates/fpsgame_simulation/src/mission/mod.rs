//! Mission outcome — game mode collaborator
//!
//! Охранник не знает как устроен game mode: он видит только MissionReporter
//! (capability, резолвится ECS один раз на систему, без downcast'ов).
//! Если MissionDirector не вставлен в мир — отчёт молча игнорируется.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::InputState;

/// Итог миссии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionOutcome {
    /// Pawn, из-за которого миссия завершилась
    pub instigator: Entity,
    pub success: bool,
}

/// Game mode: хранит итог миссии
///
/// Фиксируется первый итог, повторные завершения игнорируются
/// (несколько охранников могут увидеть игрока в один тик).
#[derive(Resource, Debug, Default)]
pub struct MissionDirector {
    outcome: Option<MissionOutcome>,
}

impl MissionDirector {
    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Записать итог. `None` если миссия уже завершена.
    pub fn record(&mut self, instigator: Entity, success: bool) -> Option<MissionOutcome> {
        if self.outcome.is_some() {
            return None;
        }

        let outcome = MissionOutcome {
            instigator,
            success,
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }
}

/// Событие: миссия завершена (UI, камера, отключение ввода)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionCompleted {
    pub instigator: Entity,
    pub success: bool,
}

/// Capability "сообщить итог миссии"
#[derive(SystemParam)]
pub struct MissionReporter<'w> {
    director: Option<ResMut<'w, MissionDirector>>,
    completed: EventWriter<'w, MissionCompleted>,
}

impl MissionReporter<'_> {
    /// `true` если итог принят (game mode есть и миссия ещё не завершена)
    pub fn complete_mission(&mut self, instigator: Entity, success: bool) -> bool {
        let Some(director) = self.director.as_mut() else {
            return false;
        };

        let Some(outcome) = director.record(instigator, success) else {
            return false;
        };

        crate::log_info(&format!(
            "🏁 Mission completed: instigator {:?}, success = {}",
            outcome.instigator, outcome.success
        ));

        self.completed.write(MissionCompleted {
            instigator: outcome.instigator,
            success: outcome.success,
        });
        true
    }
}

/// Система: pawn, завершивший миссию, перестаёт принимать ввод
pub fn disable_instigator_input(
    mut completed: EventReader<MissionCompleted>,
    mut inputs: Query<&mut InputState>,
) {
    for event in completed.read() {
        let Ok(mut input) = inputs.get_mut(event.instigator) else {
            continue;
        };

        input.set_if_neq(InputState::disabled());
    }
}

/// Mission Plugin
///
/// Вставляет MissionDirector; guard FSM находит его через MissionReporter.
pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MissionDirector>()
            .add_event::<MissionCompleted>()
            .add_systems(
                FixedUpdate,
                disable_instigator_input.after(crate::ai::GuardAiSystems),
            );
    }
}
