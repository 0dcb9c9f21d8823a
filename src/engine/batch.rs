//! Batch completion over a sliding window of the active phase's items.
//!
//! Batch mode only completes items; skip and block stay single-item.

use crate::models::{ChecklistDefinition, Resolution, SessionState};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One item inside the batch window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSlot {
    /// Absolute index within the phase list
    pub index: usize,
    pub text: String,
    /// Already resolved in the current visit
    pub resolved: bool,
}

/// Up to `size` items starting at the cursor; empty when there is no current task
pub fn window(definition: &ChecklistDefinition, state: &SessionState, size: usize) -> Vec<BatchSlot> {
    if state.current_task(definition).is_none() {
        return Vec::new();
    }

    let start = state.current_item_index;
    definition
        .items(state.phase)
        .iter()
        .enumerate()
        .skip(start)
        .take(size)
        .map(|(index, text)| BatchSlot {
            index,
            text: text.clone(),
            resolved: state.log.is_resolved(state.phase, index, state.visit),
        })
        .collect()
}

/// Complete the selected window indices, then move the cursor to the first
/// unresolved item at or after its prior position.
///
/// Returns `true` when the state changed.
pub fn submit(
    definition: &ChecklistDefinition,
    state: &mut SessionState,
    size: usize,
    indices: &[usize],
) -> bool {
    if state.current_task(definition).is_none() {
        debug!("No current task; ignoring batch");
        return false;
    }

    let start = state.current_item_index;
    let end = (start + size).min(definition.len(state.phase));
    let selected: BTreeSet<usize> = indices.iter().copied().collect();

    let mut appended = 0;
    for index in selected {
        if !(start..end).contains(&index) {
            warn!(index, start, end, "Batch index outside the window; ignoring");
            continue;
        }
        let Some(text) = definition.item(state.phase, index) else {
            continue;
        };
        if state
            .log
            .record(Resolution::Completed, state.phase, index, state.visit, text, None)
        {
            appended += 1;
        }
    }

    skip_resolved(definition, state);
    debug!(appended, cursor = state.current_item_index, "Batch applied");

    appended > 0 || state.current_item_index != start
}

/// Move the cursor forward past items already resolved in this visit
pub fn skip_resolved(definition: &ChecklistDefinition, state: &mut SessionState) {
    let len = definition.len(state.phase);
    while state.current_item_index < len
        && state
            .log
            .is_resolved(state.phase, state.current_item_index, state.visit)
    {
        state.current_item_index += 1;
    }
}
