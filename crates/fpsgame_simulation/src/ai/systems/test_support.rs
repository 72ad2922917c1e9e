//! Test harness: bare World + guard systems в порядке GuardAiPlugin.

use std::time::Duration;

use bevy::prelude::*;

use crate::ai::*;
use crate::components::{InputState, MovementCommand, Pawn};
use crate::mission::{MissionCompleted, MissionDirector};

pub(super) const TICK: f32 = 1.0 / 60.0;

pub(super) struct GuardHarness {
    pub world: World,
    schedule: Schedule,
}

impl GuardHarness {
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<Events<PerceptionEvent>>();
        world.init_resource::<Events<DebugMarker>>();
        world.init_resource::<Events<GuardStateChanged>>();
        world.init_resource::<Events<MissionCompleted>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                guard_begin_play,
                tick_suspicion_timers,
                react_to_perception,
                patrol_idle_guards,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    pub fn with_mission_director(mut self) -> Self {
        self.world.init_resource::<MissionDirector>();
        self
    }

    pub fn spawn_guard(&mut self, position: Vec3, yaw: f32) -> Entity {
        self.world
            .spawn((
                Guard,
                Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
                MovementCommand::Idle,
            ))
            .id()
    }

    pub fn spawn_patrolling_guard(
        &mut self,
        position: Vec3,
        first: Option<Entity>,
        second: Option<Entity>,
    ) -> Entity {
        self.world
            .spawn((
                Guard,
                Transform::from_translation(position),
                PatrolRoute::new(first, second),
                MovementCommand::Idle,
            ))
            .id()
    }

    pub fn spawn_patrol_point(&mut self, position: Vec3) -> Entity {
        self.world
            .spawn((PatrolPoint, Transform::from_translation(position)))
            .id()
    }

    pub fn spawn_pawn(&mut self, position: Vec3, input_enabled: bool) -> Entity {
        self.world
            .spawn((
                Pawn,
                Transform::from_translation(position),
                InputState {
                    enabled: input_enabled,
                },
            ))
            .id()
    }

    pub fn send(&mut self, event: PerceptionEvent) {
        self.world.send_event(event);
    }

    pub fn hear(&mut self, guard: Entity, location: Vec3) {
        self.send(PerceptionEvent::NoiseHeard {
            observer: guard,
            instigator: None,
            location,
            volume: 1.0,
        });
    }

    pub fn see(&mut self, guard: Entity, pawn: Option<Entity>) {
        self.send(PerceptionEvent::PawnSeen {
            observer: guard,
            pawn,
        });
    }

    /// Продвинуть время на `secs` и прогнать системы один раз
    pub fn step(&mut self, secs: f32) {
        self.world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        self.schedule.run(&mut self.world);
    }

    pub fn state(&self, guard: Entity) -> GuardState {
        *self.world.get::<GuardState>(guard).expect("guard has GuardState")
    }

    pub fn rotation(&self, guard: Entity) -> Quat {
        self.world.get::<Transform>(guard).expect("guard has Transform").rotation
    }

    pub fn command(&self, guard: Entity) -> Option<MovementCommand> {
        self.world.get::<MovementCommand>(guard).copied()
    }

    pub fn route(&self, guard: Entity) -> PatrolRoute {
        *self.world.get::<PatrolRoute>(guard).expect("guard has PatrolRoute")
    }

    pub fn set_translation(&mut self, entity: Entity, position: Vec3) {
        self.world
            .get_mut::<Transform>(entity)
            .expect("entity has Transform")
            .translation = position;
    }

    /// Забрать все события типа E, записанные с прошлого drain
    pub fn drain<E: Event>(&mut self) -> Vec<E> {
        self.world.resource_mut::<Events<E>>().drain().collect()
    }
}
