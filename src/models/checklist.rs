//! Checklist definition: the ordered item texts of each working phase.

use super::Phase;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const OPENING: &[&str] = &[
    "Fill ice for bartenders",
    "Walk parking lot for trash",
    "Make sure bathrooms / dressing room is clean",
    "Make sure all dishes are washed in the kitchen",
    "Make sure kitchen is clean",
    "Check toilet paper and paper towels",
    "Make sure bar & stage have clean rags",
];

const DURING_SHIFT: &[&str] = &[
    "Make sure chairs are pushed in",
    "Take any glasses to bar",
    "Help girls with ones on stage",
    "Keep eye on floor — no phones and/or photos",
    "Wipe all chairs with disinfectant spray (bottle is pre-mixed and labeled)",
];

const CLOSING: &[&str] = &[
    "Spray all booths and carpet in booths",
    "Use mop to clean stage / bathrooms / dressing (use hot water & bleach). BE SURE TO CHANGE THE WATER AFTER EACH AREA. SHOULD NOT BE USING DIRTY WATER TO CLEAN",
    "Kitchen needs to be clean",
    "Mop behind bar",
    "Clean floor around stage",
    "Clean the floor around the DJ area",
    "Check cigarette holder out front",
    "Take out trash and recycling",
];

/// Ordered item lists per working phase. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDefinition {
    #[serde(default)]
    opening: Vec<String>,

    #[serde(default)]
    during_shift: Vec<String>,

    #[serde(default)]
    closing: Vec<String>,
}

impl Default for ChecklistDefinition {
    fn default() -> Self {
        Self::new(
            OPENING.iter().map(|s| s.to_string()).collect(),
            DURING_SHIFT.iter().map(|s| s.to_string()).collect(),
            CLOSING.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl ChecklistDefinition {
    pub fn new(opening: Vec<String>, during_shift: Vec<String>, closing: Vec<String>) -> Self {
        Self {
            opening,
            during_shift,
            closing,
        }
    }

    /// Load a definition from a YAML file with `opening`, `during_shift` and `closing` keys
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read checklist {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse checklist {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Items of a phase; `done` has none
    pub fn items(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Opening => &self.opening,
            Phase::DuringShift => &self.during_shift,
            Phase::Closing => &self.closing,
            Phase::Done => &[],
        }
    }

    pub fn len(&self, phase: Phase) -> usize {
        self.items(phase).len()
    }

    pub fn item(&self, phase: Phase, index: usize) -> Option<&str> {
        self.items(phase).get(index).map(String::as_str)
    }
}
