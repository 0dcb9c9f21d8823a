pub mod checklist;
pub mod item_log;
pub mod phase;
pub mod session;

pub use checklist::ChecklistDefinition;
pub use item_log::{ItemLog, ItemRecord, Resolution, DEFAULT_LOG_LIMIT, NO_DETAILS};
pub use phase::{phase_label, Phase};
pub use session::{Note, Prompt, SessionState, SCHEMA_VERSION};
