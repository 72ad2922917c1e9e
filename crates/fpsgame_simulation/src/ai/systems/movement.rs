//! Guard patrol movement.

use bevy::prelude::*;

use crate::ai::{Guard, GuardConfig, GuardState, PatrolPoint, PatrolRoute};
use crate::components::MovementCommand;

/// Система: патруль между двумя точками (только в Idle)
///
/// NOTE: прототип. Никакого path planning — только выбор цели и приказ
/// MoveToEntity, путь строит navigation collaborator.
///
/// - нет текущей точки / у точки нет Transform → ничего
/// - нет movement controller (MovementCommand) → ничего
/// - ближе acceptance_radius → переключаем first ↔ second, приказа в этот тик нет
/// - иначе MoveToEntity (пишем только при изменении, иначе Changed спамит)
pub fn patrol_idle_guards(
    mut guards: Query<
        (
            Entity,
            &GuardState,
            &Transform,
            &GuardConfig,
            &mut PatrolRoute,
            Option<&mut MovementCommand>,
        ),
        With<Guard>,
    >,
    destinations: Query<&Transform, With<PatrolPoint>>,
) {
    for (entity, state, transform, config, mut route, command) in guards.iter_mut() {
        if *state != GuardState::Idle {
            continue;
        }

        let Some(destination) = route.current else {
            continue;
        };

        let Ok(destination_transform) = destinations.get(destination) else {
            continue;
        };

        let Some(mut command) = command else {
            continue;
        };

        let distance = transform
            .translation
            .distance(destination_transform.translation);

        if distance < config.acceptance_radius {
            let next = route.next_after(destination);
            route.current = next;

            crate::log(&format!(
                "🚶 Guard {:?} reached patrol point {:?}, next = {:?}",
                entity, destination, next
            ));
        } else {
            command.set_if_neq(MovementCommand::MoveToEntity {
                target: destination,
                acceptance_radius: config.acceptance_radius,
            });
        }
    }
}
