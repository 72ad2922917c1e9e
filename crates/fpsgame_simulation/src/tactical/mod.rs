//! Headless tactical layer
//!
//! В игре navigation и overlap'ы считает движок. Для headless симуляции
//! и тестов — простые заменители:
//! - headless_navigation: прямая к цели MoveToEntity, без pathfinding
//! - detect_trigger_overlaps: сфера objective vs позиции pawn'ов
//!
//! Подключается явно (HeadlessTacticalPlugin), SimulationPlugin его не включает.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::ai::GuardAiSystems;
use crate::components::{MovementCommand, MovementSpeed, Pawn};
use crate::objective::{handle_objective_overlaps, ActorOverlapBegin, ObjectiveTrigger};

/// Система: исполнить MovementCommand по прямой
///
/// Идём до самой цели (шаг обрезается по дистанции), чтобы проверка
/// прибытия `distance < acceptance_radius` гарантированно сработала.
/// Целью может быть любой актор с Transform, в том числе другой mover:
/// позиции целей снимаются до того, как кто-либо сдвинулся в этом тике.
pub fn headless_navigation(
    time: Res<Time>,
    mut actors: ParamSet<(
        Query<(Entity, &mut Transform, &MovementCommand, Option<&MovementSpeed>)>,
        Query<&Transform>,
    )>,
) {
    let delta = time.delta_secs();

    let orders: Vec<(Entity, Entity)> = actors
        .p0()
        .iter()
        .filter_map(|(entity, _, command, _)| command.target().map(|target| (entity, target)))
        .collect();

    let destinations: Vec<(Entity, Vec3)> = {
        let targets = actors.p1();
        orders
            .into_iter()
            .filter_map(|(entity, target)| {
                targets
                    .get(target)
                    .ok()
                    .map(|transform| (entity, transform.translation))
            })
            .collect()
    };

    let mut movers = actors.p0();
    for (entity, destination) in destinations {
        let Ok((_, mut transform, _, speed)) = movers.get_mut(entity) else {
            continue;
        };

        let to_target = destination - transform.translation;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            continue;
        }

        let speed = speed.copied().unwrap_or_default().speed;
        let step = (speed * delta).min(distance);
        transform.translation += to_target / distance * step;
    }
}

/// Система: pawn вошёл в сферу objective → ActorOverlapBegin
///
/// Событие только на вход: пока pawn внутри, повторов нет.
pub fn detect_trigger_overlaps(
    pawns: Query<(Entity, &Transform), With<Pawn>>,
    triggers: Query<(Entity, &Transform, &ObjectiveTrigger)>,
    mut inside: Local<HashSet<(Entity, Entity)>>,
    mut overlaps: EventWriter<ActorOverlapBegin>,
) {
    let mut current = HashSet::new();

    for (actor, trigger_transform, trigger) in triggers.iter() {
        for (other, pawn_transform) in pawns.iter() {
            let distance = trigger_transform
                .translation
                .distance(pawn_transform.translation);

            if distance <= trigger.radius {
                current.insert((actor, other));
            }
        }
    }

    // Детерминированный порядок событий
    let mut entered: Vec<_> = current.difference(&inside).copied().collect();
    entered.sort();
    for (actor, other) in entered {
        overlaps.write(ActorOverlapBegin { actor, other });
    }

    *inside = current;
}

/// Headless Tactical Plugin
///
/// Navigation после guard решений; overlap'ы до обработки objective.
pub struct HeadlessTacticalPlugin;

impl Plugin for HeadlessTacticalPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActorOverlapBegin>().add_systems(
            FixedUpdate,
            (
                headless_navigation.after(GuardAiSystems),
                detect_trigger_overlaps.before(handle_objective_overlaps),
            ),
        );
    }
}
