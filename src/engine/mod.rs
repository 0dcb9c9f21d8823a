//! Shift workflow engine
//!
//! - `transition`: pure command application and the phase-completion rule
//! - `batch`: windowed multi-item completion
//! - `gate`: closing verification
//! - `render`: display model
//! - `phase_engine`: persistence-backed command surface

pub mod batch;
pub mod gate;
pub mod render;
pub mod transition;

mod phase_engine;

pub use batch::BatchSlot;
pub use gate::{Confirmations, GateVerdict};
pub use phase_engine::{EngineSettings, PhaseEngine};
pub use render::{RenderModel, Screen};
pub use transition::{Command, Transition, Workflow, DEFAULT_BATCH_WINDOW};
