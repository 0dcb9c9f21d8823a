//! Integration tests for the shift workflow
//!
//! Drives a file-backed engine through:
//! - The full opening → during shift → closing → verification flow
//! - Cycle and closing prompt answers
//! - Batch completion with gaps
//! - Verification gate rejections
//! - Reset and reload from disk

use shiftcheck::engine::{Confirmations, EngineSettings, GateVerdict, PhaseEngine, Screen};
use shiftcheck::models::{ChecklistDefinition, Phase, Prompt, SessionState};
use shiftcheck::state::FileStateStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn state_path(dir: &TempDir) -> PathBuf {
    dir.path().join("shift/state.json")
}

fn open(path: &Path) -> PhaseEngine<FileStateStore> {
    PhaseEngine::open(
        ChecklistDefinition::default(),
        FileStateStore::new(path),
        EngineSettings::default(),
    )
    .unwrap()
}

fn open_with(path: &Path, definition: ChecklistDefinition) -> PhaseEngine<FileStateStore> {
    PhaseEngine::open(definition, FileStateStore::new(path), EngineSettings::default()).unwrap()
}

#[test]
fn test_end_to_end_shift() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));

    engine.start().unwrap();
    for _ in 0..7 {
        engine.complete().unwrap();
    }
    assert_eq!(engine.state().phase, Phase::DuringShift);
    assert_eq!(engine.state().current_item_index, 0);
    assert_eq!(engine.state().prompt, None);

    for _ in 0..5 {
        engine.complete().unwrap();
    }
    assert_eq!(engine.state().prompt, Some(Prompt::Cycle));
    assert_eq!(engine.state().during_shift_cycles_completed, 1);

    engine.answer_cycle_prompt(false).unwrap();
    assert_eq!(engine.state().prompt, Some(Prompt::Closing));

    engine.answer_closing_prompt(true).unwrap();
    assert_eq!(engine.state().phase, Phase::Closing);
    assert_eq!(engine.state().current_item_index, 0);

    for _ in 0..8 {
        engine.complete().unwrap();
    }
    assert_eq!(engine.state().phase, Phase::Closing);
    assert_eq!(engine.render().screen, Screen::Verification);

    let verdict = engine.verify(Confirmations::all()).unwrap();
    assert_eq!(verdict, GateVerdict::Cleared { blocked_on_record: 0 });
    assert_eq!(engine.state().phase, Phase::Done);
    assert_eq!(engine.render().screen, Screen::Done);
    assert_eq!(engine.state().log.completed_items.len(), 20);
}

#[test]
fn test_cycle_law() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));

    for _ in 0..12 {
        engine.complete().unwrap();
    }
    engine.answer_cycle_prompt(true).unwrap();

    assert_eq!(engine.state().phase, Phase::DuringShift);
    assert_eq!(engine.state().current_item_index, 0);
    assert_eq!(engine.state().prompt, None);
    assert_eq!(engine.state().during_shift_cycles_completed, 1);

    for _ in 0..5 {
        engine.skip().unwrap();
    }
    assert_eq!(engine.state().during_shift_cycles_completed, 2);
    assert_eq!(engine.state().log.skipped_items.len(), 5);
}

#[test]
fn test_closing_prompt_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));

    for _ in 0..12 {
        engine.complete().unwrap();
    }
    engine.answer_cycle_prompt(false).unwrap();
    let model = engine.answer_closing_prompt(false).unwrap();

    assert_eq!(engine.state().phase, Phase::DuringShift);
    assert_eq!(engine.state().current_item_index, 5);
    assert_eq!(model.screen, Screen::CyclePrompt);
    assert_eq!(engine.state().during_shift_cycles_completed, 1);

    // The prompt survives a reload
    drop(engine);
    let engine = open(&state_path(&temp_dir));
    assert_eq!(engine.state().prompt, Some(Prompt::Cycle));
}

#[test]
fn test_no_task_commands_are_noops() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));
    for _ in 0..12 {
        engine.complete().unwrap();
    }

    let before = engine.state().clone();
    engine.complete().unwrap();
    engine.skip().unwrap();
    engine.block("no key").unwrap();
    engine.submit_batch(&[0, 1]).unwrap();

    assert_eq!(engine.state(), &before);
}

#[test]
fn test_batch_gap_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let definition = ChecklistDefinition::new(
        vec![],
        vec!["A".into(), "B".into(), "C".into(), "D".into(), "E".into()],
        vec!["Z".into()],
    );
    let mut engine = open_with(&state_path(&temp_dir), definition);
    assert_eq!(engine.state().phase, Phase::DuringShift);

    engine.submit_batch(&[1, 3]).unwrap();
    assert_eq!(engine.state().log.completed_items.len(), 2);
    assert_eq!(engine.state().current_item_index, 0);

    // Completing A moves past the already-completed B
    engine.complete().unwrap();
    assert_eq!(engine.state().current_item_index, 2);

    engine.skip().unwrap();
    assert_eq!(engine.state().current_item_index, 4);
    assert_eq!(engine.state().log.total(), 4);

    engine.block("").unwrap();
    assert_eq!(engine.state().prompt, Some(Prompt::Cycle));
}

#[test]
fn test_batch_to_end_of_list_completes_phase() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));
    engine.set_batch_mode(true).unwrap();

    let model = engine.render();
    let window = model.batch_window.unwrap();
    assert_eq!(window.len(), 5);

    engine.submit_batch(&[0, 1, 2, 3, 4]).unwrap();
    assert_eq!(engine.state().current_item_index, 5);

    engine.submit_batch(&[5, 6]).unwrap();
    assert_eq!(engine.state().phase, Phase::DuringShift);
    assert_eq!(engine.state().current_item_index, 0);
}

#[test]
fn test_gate_rejections_keep_closing() {
    let temp_dir = TempDir::new().unwrap();
    let definition = ChecklistDefinition::new(vec![], vec!["A".into()], vec!["Z".into()]);
    let mut engine = open_with(&state_path(&temp_dir), definition);

    engine.complete().unwrap();
    engine.answer_cycle_prompt(false).unwrap();
    engine.answer_closing_prompt(true).unwrap();

    // Not open yet
    assert_eq!(
        engine.verify(Confirmations::all()).unwrap(),
        GateVerdict::NotApplicable
    );

    engine.block("mop bucket broken").unwrap();

    for confirmations in [
        Confirmations::new(false, true, true),
        Confirmations::new(true, false, true),
        Confirmations::new(true, true, false),
    ] {
        let verdict = engine.verify(confirmations).unwrap();
        assert!(matches!(verdict, GateVerdict::Rejected { .. }));
        assert_eq!(engine.state().phase, Phase::Closing);
    }

    // Self-attested: cleared despite a blocked record
    let verdict = engine.verify(Confirmations::all()).unwrap();
    assert_eq!(verdict, GateVerdict::Cleared { blocked_on_record: 1 });
    assert_eq!(engine.state().phase, Phase::Done);
}

#[test]
fn test_reset_law() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    let mut engine = open(&path);

    for _ in 0..10 {
        engine.block("short staffed").unwrap();
    }
    engine.add_note("fridge alarm").unwrap();
    assert!(path.exists());

    engine.reset().unwrap();

    assert!(!path.exists());
    assert_eq!(engine.state(), &SessionState::default());
    assert!(engine.state().log.is_empty());

    let reopened = open(&path);
    assert_eq!(reopened.state().phase, Phase::Opening);
    assert_eq!(reopened.state().current_item_index, 0);
}

#[test]
fn test_start_keeps_log_across_restart() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));

    engine.complete().unwrap();
    engine.skip().unwrap();
    engine.start().unwrap();

    assert_eq!(engine.state().current_item_index, 0);
    assert_eq!(engine.state().log.total(), 2);

    // The restarted visit may resolve the same items again
    engine.block("ice machine down").unwrap();
    assert_eq!(engine.state().log.blocked_items.len(), 1);
    assert_eq!(engine.state().current_item_index, 1);
}

#[test]
fn test_log_view_and_strict_prompt() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&state_path(&temp_dir));

    let model = engine.render();
    assert_eq!(
        model.task_prompt.as_deref(),
        Some("[OPENING] Step 1/7: Fill ice for bartenders\nReply: done | blocked | skip")
    );

    engine.block("").unwrap();
    let model = engine.skip().unwrap();

    assert_eq!(
        model.log,
        "BLOCKED:\n- [OPENING 1] Fill ice for bartenders :: (no details)\n\nSKIPPED:\n- [OPENING 2] Walk parking lot for trash"
    );
    assert_eq!(model.step_meta.as_deref(), Some("Step 3/7"));
}

#[test]
fn test_corrupt_state_file_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{\"phase\": \"closing\", \"current_item_index\": \"three\"").unwrap();

    let engine = open(&path);
    assert_eq!(engine.state(), &SessionState::default());
}
