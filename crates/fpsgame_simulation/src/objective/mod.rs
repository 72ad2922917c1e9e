//! Objective — pickup trigger
//!
//! Mesh и particle system живут в presentation layer; здесь только
//! sphere trigger и запрос на проигрывание pickup эффекта.
//! Что происходит с objective после pickup (перенос, удаление) — не решено,
//! поэтому актор остаётся в мире и просто перестаёт реагировать.

use bevy::prelude::*;

/// Objective актор
///
/// Автоматически добавляет ObjectiveTrigger и Transform через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, ObjectiveTrigger)]
pub struct Objective;

/// Sphere trigger вокруг objective
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ObjectiveTrigger {
    /// Радиус сферы (метры)
    pub radius: f32,
    /// Уже сработал (trigger once)
    pub triggered: bool,
}

impl Default for ObjectiveTrigger {
    fn default() -> Self {
        Self::new(0.75)
    }
}

impl ObjectiveTrigger {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            triggered: false,
        }
    }
}

/// Overlap begin от физики (NotifyActorBeginOverlap)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorOverlapBegin {
    /// Актор, чей коллайдер пересекли
    pub actor: Entity,
    /// Кто пересёк
    pub other: Entity,
}

/// Запрос presentation layer: проиграть pickup эффект
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickupEffectRequested {
    pub objective: Entity,
    pub location: Vec3,
}

/// Система: overlap с objective → pickup эффект (один раз)
pub fn handle_objective_overlaps(
    mut overlaps: EventReader<ActorOverlapBegin>,
    mut objectives: Query<(&Transform, &mut ObjectiveTrigger), With<Objective>>,
    mut effects: EventWriter<PickupEffectRequested>,
) {
    for overlap in overlaps.read() {
        let Ok((transform, mut trigger)) = objectives.get_mut(overlap.actor) else {
            continue;
        };

        if trigger.triggered {
            continue;
        }
        trigger.triggered = true;

        crate::log_info(&format!(
            "✨ Objective {:?} picked up by {:?}",
            overlap.actor, overlap.other
        ));

        effects.write(PickupEffectRequested {
            objective: overlap.actor,
            location: transform.translation,
        });
    }
}

/// Objective Plugin
pub struct ObjectivePlugin;

impl Plugin for ObjectivePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ObjectiveTrigger>()
            .add_event::<ActorOverlapBegin>()
            .add_event::<PickupEffectRequested>()
            .add_systems(FixedUpdate, handle_objective_overlaps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn objective_world() -> World {
        let mut world = World::new();
        world.init_resource::<Events<ActorOverlapBegin>>();
        world.init_resource::<Events<PickupEffectRequested>>();
        world
    }

    #[test]
    fn test_objective_requires_trigger() {
        let mut world = World::new();
        let objective = world.spawn(Objective).id();

        assert_eq!(
            world.get::<ObjectiveTrigger>(objective),
            Some(&ObjectiveTrigger::new(0.75))
        );
    }

    #[test]
    fn test_overlap_plays_effect_once() {
        let mut world = objective_world();
        let objective = world
            .spawn((Objective, Transform::from_xyz(4.0, 0.0, 2.0)))
            .id();
        let player = world.spawn_empty().id();

        world.send_event(ActorOverlapBegin { actor: objective, other: player });
        world.send_event(ActorOverlapBegin { actor: objective, other: player });
        world
            .run_system_once(handle_objective_overlaps)
            .expect("system runs");

        let effects: Vec<_> = world
            .resource::<Events<PickupEffectRequested>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(
            effects,
            vec![PickupEffectRequested {
                objective,
                location: Vec3::new(4.0, 0.0, 2.0),
            }]
        );
        assert!(world.get::<ObjectiveTrigger>(objective).expect("trigger").triggered);
        // Объект не удаляется
        assert!(world.get_entity(objective).is_ok());
    }

    #[test]
    fn test_overlap_with_non_objective_is_ignored() {
        let mut world = objective_world();
        let crate_box = world.spawn(Transform::default()).id();
        let player = world.spawn_empty().id();

        world.send_event(ActorOverlapBegin { actor: crate_box, other: player });
        world
            .run_system_once(handle_objective_overlaps)
            .expect("system runs");

        assert!(world.resource::<Events<PickupEffectRequested>>().is_empty());
    }
}
