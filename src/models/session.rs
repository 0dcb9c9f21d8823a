//! SessionState - the single mutable aggregate persisted on every command

use super::{ChecklistDefinition, ItemLog, Phase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current persisted schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Conversational sub-state that replaces normal item display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prompt {
    /// "Run another floor cycle?"
    Cycle,
    /// "Go to Closing?"
    Closing,
}

/// Free-text shift note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub ts: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub schema_version: u32,

    pub phase: Phase,

    pub current_item_index: usize,

    #[serde(flatten)]
    pub log: ItemLog,

    pub during_shift_cycles_completed: u32,

    /// Pending prompt, if any
    pub prompt: Option<Prompt>,

    /// Incremented on every phase entry
    pub visit: u32,

    pub batch_mode: bool,

    pub notes: Vec<Note>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            phase: Phase::Opening,
            current_item_index: 0,
            log: ItemLog::default(),
            during_shift_cycles_completed: 0,
            prompt: None,
            visit: 1,
            batch_mode: false,
            notes: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a phase at its first item, starting a new visit
    pub fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.current_item_index = 0;
        self.prompt = None;
        self.visit = self.visit.saturating_add(1);
    }

    /// Text of the current task, `None` when the list is exhausted or a prompt is pending
    pub fn current_task<'a>(&self, definition: &'a ChecklistDefinition) -> Option<&'a str> {
        if self.prompt.is_some() {
            return None;
        }
        definition.item(self.phase, self.current_item_index)
    }

    /// Whether the active phase's list has been walked to its end
    pub fn phase_exhausted(&self, definition: &ChecklistDefinition) -> bool {
        self.current_item_index >= definition.len(self.phase)
    }

    /// Clamp the cursor into the active list and drop a prompt that is not
    /// sitting at the end of the during-shift list.
    ///
    /// Returns `true` when something had to change.
    pub fn normalize(&mut self, definition: &ChecklistDefinition) -> bool {
        let mut changed = false;

        let len = definition.len(self.phase);
        if self.current_item_index > len {
            self.current_item_index = len;
            changed = true;
        }

        let at_cycle_end = self.phase == Phase::DuringShift && self.current_item_index == len;
        if self.prompt.is_some() && !at_cycle_end {
            self.prompt = None;
            changed = true;
        }

        changed
    }
}
