//! Guard FSM systems (begin play, state setter, suspicion timeout).

use bevy::prelude::*;

use crate::ai::{
    Guard, GuardState, GuardStateChanged, GuardStimulus, OriginalRotation, PatrolRoute,
    SuspicionTimer,
};

/// Единственная точка записи GuardState
///
/// Equality guard: то же значение → ничего (ни change detection, ни hook).
/// Реальный переход → ровно один GuardStateChanged.
/// Используется и на authority, и на observer (replication).
pub fn set_guard_state(
    guard: Entity,
    state: &mut Mut<GuardState>,
    new_state: GuardState,
    changed: &mut EventWriter<GuardStateChanged>,
) -> bool {
    let previous = **state;
    if !state.set_if_neq(new_state) {
        return false;
    }

    crate::log_info(&format!(
        "🛡️ Guard {:?}: {:?} → {:?}",
        guard, previous, new_state
    ));

    changed.write(GuardStateChanged {
        guard,
        previous,
        current: new_state,
    });
    true
}

/// Система: begin play
///
/// Для только что появившихся охранников запоминаем исходный поворот
/// и начинаем патруль с первой точки.
pub fn guard_begin_play(
    mut guards: Query<(&Transform, &mut OriginalRotation, &mut PatrolRoute), Added<Guard>>,
) {
    for (transform, mut original, mut route) in guards.iter_mut() {
        original.0 = transform.rotation;
        route.current = route.first;
    }
}

/// Система: тик таймеров подозрения → reset orientation
///
/// Таймер живёт на охраннике, а не в глобальном timer manager:
/// новый шум просто заменяет его (см. react_to_perception).
pub fn tick_suspicion_timers(
    time: Res<Time>,
    mut guards: Query<
        (
            Entity,
            &mut GuardState,
            &mut Transform,
            &mut SuspicionTimer,
            &OriginalRotation,
        ),
        With<Guard>,
    >,
    mut state_changed: EventWriter<GuardStateChanged>,
) {
    let delta = time.delta();

    for (entity, mut state, mut transform, mut timer, original) in guards.iter_mut() {
        if !timer.is_armed() {
            continue;
        }

        if !timer.tick(delta) {
            continue;
        }

        reset_orientation(
            entity,
            &mut state,
            &mut transform,
            original,
            &mut state_changed,
        );
    }
}

/// Reset orientation: вернуть исходный поворот и Idle (кроме Alerted)
fn reset_orientation(
    entity: Entity,
    state: &mut Mut<GuardState>,
    transform: &mut Mut<Transform>,
    original: &OriginalRotation,
    state_changed: &mut EventWriter<GuardStateChanged>,
) {
    let Some(next) = state.on_stimulus(GuardStimulus::SuspicionExpired) else {
        return;
    };

    transform.rotation = original.0;
    set_guard_state(entity, state, next, state_changed);
}
