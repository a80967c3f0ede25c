//! Application layer - turn orchestration.
//!
//! Coordinates the pure turn engine with the recognizer and conversation
//! store ports.

mod dialog_manager;
mod error;

pub use dialog_manager::{DialogManager, TurnReport};
pub use error::EngineError;
