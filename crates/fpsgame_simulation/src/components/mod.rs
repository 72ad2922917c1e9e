//! ECS Components общие для нескольких доменов
//!
//! Организация по доменам:
//! - actor: pawn'ы и их ввод (Pawn, InputState)
//! - movement: movement controller capability (MovementCommand, MovementSpeed)
//!
//! Guard-специфичные компоненты живут в crate::ai, objective — в crate::objective.

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
