//! Guard AI systems (strategic layer logic)

pub mod fsm;
pub mod movement;
pub mod reactions;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod test_support;

// Re-export all systems
pub use fsm::*;
pub use movement::*;
pub use reactions::*;
