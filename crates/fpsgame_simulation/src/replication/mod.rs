//! Replication — authority → observers, однонаправленно
//!
//! Транспорт вне scope: authority пишет OutgoingGuardState, сеть (внешняя)
//! доставляет сообщения и пишет IncomingGuardState на observer'е.
//! Только authority принимает решения (guard FSM), observer только применяет.
//!
//! Применение идёт через тот же set_guard_state: equality guard + OnStateChanged
//! срабатывают на клиентах так же, как на сервере.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{set_guard_state, Guard, GuardAiSystems, GuardState, GuardStateChanged};

/// Роль мира в сети
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetRole {
    /// Сервер / single-player: пишет реплицируемые значения
    #[default]
    Authority,
    /// Клиент: только применяет пришедшие значения
    Observer,
}

/// Run condition: мир — authority (без NetRole считаем single-player)
pub fn is_authority(role: Option<Res<NetRole>>) -> bool {
    role.is_none_or(|role| *role == NetRole::Authority)
}

/// Run condition: мир — observer
pub fn is_observer(role: Option<Res<NetRole>>) -> bool {
    role.is_some_and(|role| *role == NetRole::Observer)
}

/// Стабильный сетевой ID актора (одинаковый на authority и observer'ах)
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect, Serialize,
    Deserialize,
)]
#[reflect(Component)]
pub struct NetworkId(pub u64);

/// Декларация реплицируемых свойств (для сетевого слоя)
#[derive(Resource, Debug, Default)]
pub struct ReplicationRegistry {
    properties: Vec<&'static str>,
}

impl ReplicationRegistry {
    pub fn register<T: Component>(&mut self) {
        let name = std::any::type_name::<T>();
        if !self.properties.contains(&name) {
            self.properties.push(name);
        }
    }

    pub fn is_replicated<T: Component>(&self) -> bool {
        self.properties.contains(&std::any::type_name::<T>())
    }

    pub fn properties(&self) -> &[&'static str] {
        &self.properties
    }
}

/// Сообщение репликации GuardState (сериализуется транспортом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStateReplicated {
    pub net_id: NetworkId,
    pub state: GuardState,
}

/// Authority → сеть
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingGuardState(pub GuardStateReplicated);

/// Сеть → observer
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingGuardState(pub GuardStateReplicated);

/// Система (authority): каждый переход сетевого охранника → сообщение
///
/// Идём по GuardStateChanged, а не по Changed<GuardState>: два перехода
/// в одном тике дают два сообщения, observer увидит оба hook'а.
pub fn collect_guard_state_updates(
    mut changes: EventReader<GuardStateChanged>,
    ids: Query<&NetworkId, With<Guard>>,
    mut outgoing: EventWriter<OutgoingGuardState>,
) {
    for change in changes.read() {
        let Ok(net_id) = ids.get(change.guard) else {
            continue;
        };

        outgoing.write(OutgoingGuardState(GuardStateReplicated {
            net_id: *net_id,
            state: change.current,
        }));
    }
}

/// Система (observer): применить пришедшие состояния
pub fn apply_replicated_guard_states(
    mut incoming: EventReader<IncomingGuardState>,
    mut guards: Query<(Entity, &NetworkId, &mut GuardState), With<Guard>>,
    mut state_changed: EventWriter<GuardStateChanged>,
) {
    for IncomingGuardState(message) in incoming.read() {
        let Some((entity, _, mut state)) = guards
            .iter_mut()
            .find(|(_, net_id, _)| **net_id == message.net_id)
        else {
            crate::log_warning(&format!(
                "Replication: no guard with {:?}, dropping {:?}",
                message.net_id, message.state
            ));
            continue;
        };

        set_guard_state(entity, &mut state, message.state, &mut state_changed);
    }
}

/// Полный снапшот состояний сетевых охранников (initial sync для нового observer'а)
///
/// Сортировка по NetworkId — детерминированный порядок.
pub fn guard_state_snapshot(world: &mut World) -> Vec<GuardStateReplicated> {
    let mut query = world.query_filtered::<(&NetworkId, &GuardState), With<Guard>>();
    let mut snapshot: Vec<_> = query
        .iter(world)
        .map(|(net_id, state)| GuardStateReplicated {
            net_id: *net_id,
            state: *state,
        })
        .collect();

    snapshot.sort_by_key(|message| message.net_id);
    snapshot
}

/// Replication Plugin
///
/// GuardState регистрируется GuardAiPlugin; здесь — роль, сообщения и системы.
pub struct ReplicationPlugin;

impl Plugin for ReplicationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NetRole>()
            .init_resource::<ReplicationRegistry>()
            .register_type::<NetworkId>()
            .add_event::<GuardStateChanged>()
            .add_event::<OutgoingGuardState>()
            .add_event::<IncomingGuardState>()
            .add_systems(
                FixedUpdate,
                (
                    collect_guard_state_updates
                        .after(GuardAiSystems)
                        .run_if(is_authority),
                    apply_replicated_guard_states.run_if(is_observer),
                ),
            );
    }
}
