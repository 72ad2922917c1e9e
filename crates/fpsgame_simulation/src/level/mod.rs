//! Level data — расстановка акторов из JSON
//!
//! Формат:
//! ```json
//! {
//!   "patrol_points": [{ "name": "gate", "position": [10.0, 0.0, 0.0] }],
//!   "guards": [{
//!     "position": [0.0, 0.0, 0.0],
//!     "yaw_degrees": 90.0,
//!     "first_patrol_point": "gate",
//!     "config": { "suspicion_timeout_secs": 5.0 },
//!     "network_id": 1
//!   }],
//!   "pawns": [{ "position": [5.0, 0.0, 5.0] }],
//!   "objectives": [{ "position": [0.0, 0.0, -8.0], "radius": 1.0 }]
//! }
//! ```
//!
//! Вся валидация до первого spawn: битый level не оставляет полу-мир.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::{Guard, GuardConfig, PatrolPoint, PatrolRoute};
use crate::components::{InputState, MovementCommand, MovementSpeed, Pawn};
use crate::objective::{Objective, ObjectiveTrigger};
use crate::replication::NetworkId;

/// Ошибки загрузки level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("guard #{guard} references unknown patrol point '{name}'")]
    UnknownPatrolPoint { guard: usize, name: String },

    #[error("patrol point '{0}' is declared more than once")]
    DuplicatePatrolPoint(String),

    #[error("{what} is not a finite number")]
    NonFiniteValue { what: String },

    #[error("{what} must not be negative")]
    NegativeValue { what: String },

    #[error("network id {0} is used by more than one guard")]
    DuplicateNetworkId(u64),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDescription {
    pub patrol_points: Vec<PatrolPointDescription>,
    pub guards: Vec<GuardDescription>,
    pub pawns: Vec<PawnDescription>,
    pub objectives: Vec<ObjectiveDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolPointDescription {
    pub name: String,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardDescription {
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub first_patrol_point: Option<String>,
    #[serde(default)]
    pub second_patrol_point: Option<String>,
    /// Частичный config: недостающие поля берутся из GuardConfig::default()
    #[serde(default)]
    pub config: Option<GuardConfig>,
    #[serde(default)]
    pub network_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnDescription {
    pub position: [f32; 3],
    /// false — NPC pawn (ввод выключен)
    #[serde(default = "input_enabled_default")]
    pub input_enabled: bool,
}

fn input_enabled_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDescription {
    pub position: [f32; 3],
    #[serde(default)]
    pub radius: Option<f32>,
}

impl LevelDescription {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Проверить level целиком (имена, ссылки, числа)
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut names = HashMap::new();
        for point in &self.patrol_points {
            check_position(&format!("patrol point '{}' position", point.name), point.position)?;
            if names.insert(point.name.as_str(), ()).is_some() {
                return Err(LevelError::DuplicatePatrolPoint(point.name.clone()));
            }
        }

        let mut network_ids = Vec::new();
        for (index, guard) in self.guards.iter().enumerate() {
            check_position(&format!("guard #{index} position"), guard.position)?;
            check_finite(&format!("guard #{index} yaw_degrees"), guard.yaw_degrees)?;

            for name in [&guard.first_patrol_point, &guard.second_patrol_point]
                .into_iter()
                .flatten()
            {
                if !names.contains_key(name.as_str()) {
                    return Err(LevelError::UnknownPatrolPoint {
                        guard: index,
                        name: name.clone(),
                    });
                }
            }

            if let Some(config) = &guard.config {
                check_config(index, config)?;
            }

            if let Some(id) = guard.network_id {
                if network_ids.contains(&id) {
                    return Err(LevelError::DuplicateNetworkId(id));
                }
                network_ids.push(id);
            }
        }

        for (index, pawn) in self.pawns.iter().enumerate() {
            check_position(&format!("pawn #{index} position"), pawn.position)?;
        }

        for (index, objective) in self.objectives.iter().enumerate() {
            check_position(&format!("objective #{index} position"), objective.position)?;
            if let Some(radius) = objective.radius {
                check_non_negative(&format!("objective #{index} radius"), radius)?;
            }
        }

        Ok(())
    }
}

fn check_finite(what: &str, value: f32) -> Result<(), LevelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LevelError::NonFiniteValue { what: what.to_string() })
    }
}

fn check_non_negative(what: &str, value: f32) -> Result<(), LevelError> {
    check_finite(what, value)?;
    if value < 0.0 {
        return Err(LevelError::NegativeValue { what: what.to_string() });
    }
    Ok(())
}

fn check_position(what: &str, position: [f32; 3]) -> Result<(), LevelError> {
    position.iter().try_for_each(|value| check_finite(what, *value))
}

fn check_config(guard: usize, config: &GuardConfig) -> Result<(), LevelError> {
    let fields = [
        ("suspicion_timeout_secs", config.suspicion_timeout_secs),
        ("acceptance_radius", config.acceptance_radius),
        ("marker_radius", config.marker_radius),
        ("marker_lifetime_secs", config.marker_lifetime_secs),
    ];

    for (field, value) in fields {
        check_non_negative(&format!("guard #{guard} config.{field}"), value)?;
    }
    Ok(())
}

/// Что заспавнено (в порядке описания)
#[derive(Debug, Clone, Default)]
pub struct SpawnedLevel {
    pub patrol_points: HashMap<String, Entity>,
    pub guards: Vec<Entity>,
    pub pawns: Vec<Entity>,
    pub objectives: Vec<Entity>,
}

/// Заспавнить level в мир
///
/// Guard получает movement controller (MovementCommand + MovementSpeed);
/// OriginalRotation и первая patrol точка выставятся в guard_begin_play.
pub fn spawn_level(world: &mut World, level: &LevelDescription) -> Result<SpawnedLevel, LevelError> {
    level.validate()?;

    let mut spawned = SpawnedLevel::default();

    for point in &level.patrol_points {
        let entity = world
            .spawn((
                PatrolPoint,
                Name::new(point.name.clone()),
                Transform::from_translation(Vec3::from_array(point.position)),
            ))
            .id();
        spawned.patrol_points.insert(point.name.clone(), entity);
    }

    let lookup = |name: &Option<String>| {
        name.as_ref()
            .and_then(|name| spawned.patrol_points.get(name).copied())
    };

    let mut guards = Vec::with_capacity(level.guards.len());
    for guard in &level.guards {
        let transform = Transform::from_translation(Vec3::from_array(guard.position))
            .with_rotation(Quat::from_rotation_y(guard.yaw_degrees.to_radians()));
        let route = PatrolRoute::new(
            lookup(&guard.first_patrol_point),
            lookup(&guard.second_patrol_point),
        );

        let mut entity = world.spawn((
            Guard,
            transform,
            route,
            guard.config.unwrap_or_default(),
            MovementCommand::Idle,
            MovementSpeed::default(),
        ));
        if let Some(id) = guard.network_id {
            entity.insert(NetworkId(id));
        }
        guards.push(entity.id());
    }
    spawned.guards = guards;

    for pawn in &level.pawns {
        let entity = world
            .spawn((
                Pawn,
                Transform::from_translation(Vec3::from_array(pawn.position)),
                InputState {
                    enabled: pawn.input_enabled,
                },
            ))
            .id();
        spawned.pawns.push(entity);
    }

    for objective in &level.objectives {
        let trigger = objective
            .radius
            .map(ObjectiveTrigger::new)
            .unwrap_or_default();
        let entity = world
            .spawn((
                Objective,
                Transform::from_translation(Vec3::from_array(objective.position)),
                trigger,
            ))
            .id();
        spawned.objectives.push(entity);
    }

    crate::log_info(&format!(
        "Level spawned: {} guards, {} patrol points, {} pawns, {} objectives",
        spawned.guards.len(),
        spawned.patrol_points.len(),
        spawned.pawns.len(),
        spawned.objectives.len()
    ));

    Ok(spawned)
}
