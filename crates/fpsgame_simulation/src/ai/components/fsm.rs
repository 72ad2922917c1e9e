//! Guard FSM components (state, transition table, config, patrol route, timers).

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние охранника
///
/// Реплицируется наблюдателям (visual sync индикатора над головой).
/// Alerted — терминальное: шум и таймаут подозрения его не сбрасывают.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum GuardState {
    /// Патрулирует между двумя точками
    #[default]
    Idle,
    /// Услышал шум, смотрит в его сторону, ждёт таймаут
    Suspicious,
    /// Увидел pawn'а — выхода из состояния нет
    Alerted,
}

/// Стимулы, которые двигают FSM охранника
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStimulus {
    /// Сенсор увидел pawn'а
    PawnSeen,
    /// Сенсор услышал шум
    NoiseHeard,
    /// Таймер подозрения истёк (reset orientation)
    SuspicionExpired,
}

impl GuardState {
    /// Таблица переходов.
    ///
    /// `None` — стимул отклонён целиком: обработчик не должен делать
    /// побочных эффектов (поворот, таймер, маркер).
    /// `Some(state)` может совпадать с текущим состоянием — тогда
    /// `set_guard_state` ничего не делает.
    pub fn on_stimulus(self, stimulus: GuardStimulus) -> Option<GuardState> {
        use GuardState::*;
        use GuardStimulus::*;

        match (self, stimulus) {
            (_, PawnSeen) => Some(Alerted),
            (Alerted, NoiseHeard | SuspicionExpired) => None,
            (Idle | Suspicious, NoiseHeard) => Some(Suspicious),
            (Idle | Suspicious, SuspicionExpired) => Some(Idle),
        }
    }

    pub fn is_alerted(self) -> bool {
        self == GuardState::Alerted
    }
}

/// Маркер охранника
///
/// Автоматически добавляет всё состояние FSM через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    GuardState,
    GuardConfig,
    OriginalRotation,
    SuspicionTimer,
    PatrolRoute
)]
pub struct Guard;

/// Параметры охранника (level data может переопределить)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct GuardConfig {
    /// Через сколько секунд без нового шума подозрение сбрасывается
    pub suspicion_timeout_secs: f32,
    /// Радиус прибытия к patrol точке (метры)
    pub acceptance_radius: f32,
    /// Радиус debug сферы (метры)
    pub marker_radius: f32,
    /// Время жизни debug сферы (секунды)
    pub marker_lifetime_secs: f32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            suspicion_timeout_secs: 3.0,
            acceptance_radius: 1.0,
            marker_radius: 0.32,
            marker_lifetime_secs: 10.0,
        }
    }
}

/// Поворот охранника на момент begin play (сюда возвращаемся после подозрения)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct OriginalRotation(pub Quat);

/// Единственный отложенный reset orientation
///
/// Новый шум заменяет таймер целиком (clear + set), таймеры не копятся.
#[derive(Component, Debug, Clone, Default)]
pub struct SuspicionTimer {
    timer: Option<Timer>,
}

impl SuspicionTimer {
    /// (Пере)взвести one-shot таймер
    pub fn arm(&mut self, seconds: f32) {
        self.timer = Some(Timer::from_seconds(seconds, TimerMode::Once));
    }

    pub fn clear(&mut self) {
        self.timer = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Продвинуть таймер. `true` ровно один раз — в тик срабатывания,
    /// после чего таймер разоружается.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        if timer.tick(delta).just_finished() {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

/// Патрульный маршрут: две точки из level data + текущая цель
///
/// NOTE: прототип, path planning целиком на navigation collaborator.
/// Не использовать как образец для боевого movement кода.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub first: Option<Entity>,
    pub second: Option<Entity>,
    /// Куда идём сейчас (выставляется в begin play, меняется только при прибытии)
    pub current: Option<Entity>,
}

impl PatrolRoute {
    pub fn new(first: Option<Entity>, second: Option<Entity>) -> Self {
        Self {
            first,
            second,
            current: None,
        }
    }

    /// Следующая цель после прибытия в `arrived`: first ↔ second
    pub fn next_after(&self, arrived: Entity) -> Option<Entity> {
        if Some(arrived) == self.first {
            self.second
        } else {
            self.first
        }
    }
}

/// Patrol точка (waypoint), расставляется level data
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct PatrolPoint;

/// Yaw-only поворот "лицом к точке" (forward = -Z, up = +Y).
///
/// `None` если точка строго над/под `from` — горизонтального направления нет.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<Quat> {
    let direction = to - from;
    let horizontal = Vec3::new(direction.x, 0.0, direction.z);

    if horizontal.length_squared() <= f32::EPSILON {
        return None;
    }

    Some(Quat::from_rotation_y(f32::atan2(-horizontal.x, -horizontal.z)))
}
