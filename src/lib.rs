// shiftcheck - Phased shift checklist engine
// Opening, repeatable during-shift cycles, closing and a verification gate

pub mod cli;
pub mod config;
pub mod engine;
pub mod logging;
pub mod models;
pub mod state;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::ShiftcheckConfig;
pub use engine::{Confirmations, GateVerdict, PhaseEngine, RenderModel, Screen};
pub use models::{ChecklistDefinition, Phase, SessionState};
pub use state::{FileStateStore, MemoryStateStore, StateStore};
