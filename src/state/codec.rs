//! Persisted-state codec.
//!
//! Decoding never fails: malformed input falls back to defaults, and each
//! known field is decoded on its own so one bad field does not discard the
//! rest of the record.

use crate::models::{ItemRecord, Note, Phase, SessionState, SCHEMA_VERSION};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Decode a persisted record, recovering to defaults where needed
pub fn decode_state(raw: &str) -> SessionState {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Persisted state is not valid JSON; starting fresh");
            return SessionState::default();
        }
    };

    let Value::Object(map) = value else {
        warn!("Persisted state is not an object; starting fresh");
        return SessionState::default();
    };

    let mut state = SessionState::default();

    if let Some(version) = field::<u32>(&map, "schema_version") {
        if version != SCHEMA_VERSION {
            warn!(
                version,
                expected = SCHEMA_VERSION,
                "Unknown schema version in persisted state; reading it as current"
            );
        }
    }

    let mut phase_known = true;
    if let Some(raw_phase) = map.get("phase") {
        match raw_phase.as_str().map(str::parse::<Phase>) {
            Some(Ok(phase)) => state.phase = phase,
            _ => {
                warn!(phase = %raw_phase, "Unrecognized phase in persisted state; restarting at opening");
                phase_known = false;
            }
        }
    }

    if phase_known {
        if let Some(index) = field::<usize>(&map, "current_item_index") {
            state.current_item_index = index;
        }
    }

    state.log.completed_items = records(&map, "completed_items");
    state.log.blocked_items = records(&map, "blocked_items");
    state.log.skipped_items = records(&map, "skipped_items");

    if let Some(cycles) = field(&map, "during_shift_cycles_completed") {
        state.during_shift_cycles_completed = cycles;
    }
    if let Some(prompt) = field(&map, "prompt") {
        state.prompt = prompt;
    }
    if let Some(visit) = field(&map, "visit") {
        state.visit = visit;
    }
    if let Some(batch_mode) = field(&map, "batch_mode") {
        state.batch_mode = batch_mode;
    }
    state.notes = list::<Note>(&map, "notes");

    // Prompts belong to during_shift; the list position is checked against the checklist on load
    if state.prompt.is_some() && state.phase != Phase::DuringShift {
        warn!(phase = %state.phase, "Dropping prompt persisted outside during_shift");
        state.prompt = None;
    }

    state
}

/// Encode the full state for persistence
pub fn encode_state(state: &SessionState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(field = key, error = %e, "Ignoring ill-typed field in persisted state");
            None
        }
    }
}

fn list<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Vec<T> {
    let Some(value) = map.get(key) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        warn!(field = key, "Expected an array in persisted state");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(field = key, error = %e, "Dropping malformed entry");
                None
            }
        })
        .collect()
}

fn records(map: &Map<String, Value>, key: &str) -> Vec<ItemRecord> {
    list(map, key)
}
