//! Append-only audit log of resolved checklist items.
//!
//! Each record snapshots the item text at resolution time, so a later change
//! to the checklist definition does not rewrite history. Records carry the
//! phase visit they were resolved in; an item is resolved at most once per
//! visit across all three outcome lists.

use super::{phase_label, Phase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder stored when a blocker is reported without details
pub const NO_DETAILS: &str = "(no details)";

/// Default number of records shown in the log view
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// How an item was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Completed,
    Skipped,
    Blocked,
}

/// One resolved item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub phase: Phase,
    pub index: usize,
    pub text: String,

    /// Only present on blocked records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker: Option<String>,

    pub ts: DateTime<Utc>,

    #[serde(default)]
    pub visit: u32,
}

impl ItemRecord {
    fn matches(&self, phase: Phase, index: usize, visit: u32) -> bool {
        self.phase == phase && self.index == index && self.visit == visit
    }

    /// `- [PHASE N] text` with ` :: blocker` for blocked records
    pub fn log_line(&self) -> String {
        let mut line = format!(
            "- [{} {}] {}",
            phase_label(self.phase.as_str()),
            self.index + 1,
            self.text
        );
        if let Some(blocker) = &self.blocker {
            line.push_str(" :: ");
            line.push_str(blocker);
        }
        line
    }
}

/// The three outcome lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLog {
    #[serde(default)]
    pub completed_items: Vec<ItemRecord>,

    #[serde(default)]
    pub blocked_items: Vec<ItemRecord>,

    #[serde(default)]
    pub skipped_items: Vec<ItemRecord>,
}

impl ItemLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome recorded for an item in the given visit, if any
    pub fn resolution(&self, phase: Phase, index: usize, visit: u32) -> Option<Resolution> {
        if self.completed_items.iter().any(|r| r.matches(phase, index, visit)) {
            Some(Resolution::Completed)
        } else if self.skipped_items.iter().any(|r| r.matches(phase, index, visit)) {
            Some(Resolution::Skipped)
        } else if self.blocked_items.iter().any(|r| r.matches(phase, index, visit)) {
            Some(Resolution::Blocked)
        } else {
            None
        }
    }

    pub fn is_resolved(&self, phase: Phase, index: usize, visit: u32) -> bool {
        self.resolution(phase, index, visit).is_some()
    }

    /// Append a record unless the item is already resolved in this visit.
    ///
    /// Returns `true` when a record was appended. Blocked records with an
    /// empty (after trimming) blocker get [`NO_DETAILS`].
    pub fn record(
        &mut self,
        resolution: Resolution,
        phase: Phase,
        index: usize,
        visit: u32,
        text: &str,
        blocker: Option<&str>,
    ) -> bool {
        if self.is_resolved(phase, index, visit) {
            return false;
        }

        let blocker = match resolution {
            Resolution::Blocked => Some(
                blocker
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .unwrap_or(NO_DETAILS)
                    .to_string(),
            ),
            _ => None,
        };

        let record = ItemRecord {
            phase,
            index,
            text: text.to_string(),
            blocker,
            ts: Utc::now(),
            visit,
        };

        match resolution {
            Resolution::Completed => self.completed_items.push(record),
            Resolution::Skipped => self.skipped_items.push(record),
            Resolution::Blocked => self.blocked_items.push(record),
        }
        true
    }

    pub fn recent_blocked(&self, n: usize) -> &[ItemRecord] {
        tail(&self.blocked_items, n)
    }

    pub fn recent_skipped(&self, n: usize) -> &[ItemRecord] {
        tail(&self.skipped_items, n)
    }

    pub fn is_empty(&self) -> bool {
        self.completed_items.is_empty() && self.blocked_items.is_empty() && self.skipped_items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.completed_items.len() + self.blocked_items.len() + self.skipped_items.len()
    }

    /// Blocked and skipped sections, or `(none)` when both are empty
    pub fn render(&self, limit: usize) -> String {
        let mut lines = Vec::new();

        if !self.blocked_items.is_empty() {
            lines.push("BLOCKED:".to_string());
            lines.extend(self.recent_blocked(limit).iter().map(ItemRecord::log_line));
            lines.push(String::new());
        }

        if !self.skipped_items.is_empty() {
            lines.push("SKIPPED:".to_string());
            lines.extend(self.recent_skipped(limit).iter().map(ItemRecord::log_line));
            lines.push(String::new());
        }

        if lines.is_empty() {
            return "(none)".to_string();
        }
        lines.join("\n").trim().to_string()
    }
}

fn tail(records: &[ItemRecord], n: usize) -> &[ItemRecord] {
    &records[records.len().saturating_sub(n)..]
}
