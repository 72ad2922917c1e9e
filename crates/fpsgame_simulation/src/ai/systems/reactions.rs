//! Guard reactions to perception (seen pawn, heard noise).

use bevy::prelude::*;

use super::fsm::set_guard_state;
use crate::ai::{
    yaw_towards, DebugMarker, Guard, GuardConfig, GuardState, GuardStateChanged, GuardStimulus,
    MarkerKind, PerceptionEvent, SuspicionTimer,
};
use crate::components::{InputState, MovementCommand};
use crate::mission::MissionReporter;

/// Система: реакция охранника на PerceptionEvent
///
/// PawnSeen:
/// - пустая ссылка / pawn без Transform → игнор
/// - жёлтый маркер на pawn'е
/// - pawn принимает ввод (эвристика "это игрок") → провал миссии
/// - Alerted безусловно
///
/// NoiseHeard (игнор целиком если уже Alerted):
/// - Stop текущему приказу движения
/// - красный маркер в точке шума
/// - yaw-only поворот к шуму
/// - clear + set таймера подозрения
/// - Suspicious
///
/// Pawn'ом может быть любой актор с Transform, в том числе другой охранник.
pub fn react_to_perception(
    mut perception_events: EventReader<PerceptionEvent>,
    mut actors: ParamSet<(
        Query<
            (
                &mut GuardState,
                &mut Transform,
                &mut SuspicionTimer,
                &GuardConfig,
                Option<&mut MovementCommand>,
            ),
            With<Guard>,
        >,
        Query<(&Transform, Option<&InputState>)>,
    )>,
    mut mission: MissionReporter,
    mut markers: EventWriter<DebugMarker>,
    mut state_changed: EventWriter<GuardStateChanged>,
) {
    for event in perception_events.read() {
        match event {
            PerceptionEvent::PawnSeen { observer, pawn } => {
                let Some(pawn) = *pawn else {
                    continue;
                };

                // Сначала читаем pawn'а: им может быть другой охранник или сам observer
                let Ok((pawn_transform, takes_input)) = actors.p1().get(pawn).map(|(transform, input)| {
                    (*transform, input.is_some_and(|input| input.enabled))
                }) else {
                    continue;
                };

                let mut guards = actors.p0();
                let Ok((mut state, _, mut timer, config, _)) = guards.get_mut(*observer) else {
                    continue;
                };

                markers.write(DebugMarker {
                    kind: MarkerKind::PawnSeen,
                    position: pawn_transform.translation,
                    radius: config.marker_radius,
                    lifetime_secs: config.marker_lifetime_secs,
                });

                // TODO: заменить эвристику явным маркером игрока, когда появится possession
                if takes_input {
                    mission.complete_mission(pawn, false);
                }

                if let Some(next) = state.on_stimulus(GuardStimulus::PawnSeen) {
                    // Alerted не сбрасывается: отложенный reset orientation больше не нужен
                    timer.clear();
                    set_guard_state(*observer, &mut state, next, &mut state_changed);
                }
            }

            PerceptionEvent::NoiseHeard {
                observer,
                location,
                volume,
                ..
            } => {
                let mut guards = actors.p0();
                let Ok((mut state, mut transform, mut timer, config, command)) =
                    guards.get_mut(*observer)
                else {
                    continue;
                };

                let Some(next) = state.on_stimulus(GuardStimulus::NoiseHeard) else {
                    continue;
                };

                if let Some(mut command) = command {
                    command.set_if_neq(MovementCommand::Stop);
                }

                markers.write(DebugMarker {
                    kind: MarkerKind::NoiseHeard,
                    position: *location,
                    radius: config.marker_radius,
                    lifetime_secs: config.marker_lifetime_secs,
                });

                if let Some(rotation) = yaw_towards(transform.translation, *location) {
                    transform.rotation = rotation;
                }

                timer.arm(config.suspicion_timeout_secs);

                crate::log(&format!(
                    "🔊 Guard {:?} heard noise at {:?} (volume {:.2})",
                    observer, location, volume
                ));

                set_guard_state(*observer, &mut state, next, &mut state_changed);
            }
        }
    }
}
