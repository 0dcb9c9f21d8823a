//! Render model: what a front end shows for a given state

use super::batch::{self, BatchSlot};
use super::gate::{self, CLEARED_MESSAGE};
use crate::models::{phase_label, ChecklistDefinition, Phase, Prompt, SessionState};
use serde::Serialize;

const REPLY_LINE: &str = "Reply: done | blocked | skip";

/// The main panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Screen {
    /// A task awaits done / blocked / skip
    Task { text: String },
    CyclePrompt,
    ClosingPrompt,
    /// Closing list exhausted; verification gate open
    Verification,
    Done,
    NoActiveTask,
}

impl Screen {
    pub fn message(&self) -> String {
        match self {
            Screen::Task { text } => text.clone(),
            Screen::CyclePrompt => {
                "During Shift cycle complete.\nRun another floor cycle? (yes/no)".to_string()
            }
            Screen::ClosingPrompt => "Go to Closing? (yes/no)".to_string(),
            Screen::Verification => {
                "Closing checklist complete. Run verification below.".to_string()
            }
            Screen::Done => CLEARED_MESSAGE.to_string(),
            Screen::NoActiveTask => "No active task.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub phase: Phase,
    pub phase_label: String,

    /// `Step X/Y`, only while a task is shown
    pub step_meta: Option<String>,

    pub screen: Screen,

    /// Strict task prompt, only while a task is shown
    pub task_prompt: Option<String>,

    /// Present when batch mode is on and a task is shown
    pub batch_window: Option<Vec<BatchSlot>>,

    pub cycles_completed: u32,

    pub log: String,

    pub notes: Vec<String>,
}

/// `Step {index+1}/{total}`
pub fn step_meta(definition: &ChecklistDefinition, phase: Phase, index: usize) -> String {
    format!("Step {}/{}", index + 1, definition.len(phase))
}

/// `[PHASE] Step X/Y: task` followed by the reply line
pub fn strict_line(definition: &ChecklistDefinition, state: &SessionState) -> String {
    let task = definition
        .item(state.phase, state.current_item_index)
        .unwrap_or("(no task)");
    format!(
        "[{}] {}: {}\n{}",
        phase_label(state.phase.as_str()),
        step_meta(definition, state.phase, state.current_item_index),
        task,
        REPLY_LINE
    )
}

pub fn screen(definition: &ChecklistDefinition, state: &SessionState) -> Screen {
    match state.prompt {
        Some(Prompt::Cycle) => return Screen::CyclePrompt,
        Some(Prompt::Closing) => return Screen::ClosingPrompt,
        None => {}
    }

    if let Some(text) = state.current_task(definition) {
        return Screen::Task {
            text: text.to_string(),
        };
    }

    if gate::is_open(definition, state) {
        return Screen::Verification;
    }
    match state.phase {
        Phase::Done => Screen::Done,
        _ => Screen::NoActiveTask,
    }
}

pub fn render(
    definition: &ChecklistDefinition,
    state: &SessionState,
    batch_size: usize,
    log_limit: usize,
) -> RenderModel {
    let screen = screen(definition, state);
    let has_task = matches!(screen, Screen::Task { .. });

    RenderModel {
        phase: state.phase,
        phase_label: phase_label(state.phase.as_str()),
        step_meta: has_task.then(|| step_meta(definition, state.phase, state.current_item_index)),
        task_prompt: has_task.then(|| strict_line(definition, state)),
        batch_window: (has_task && state.batch_mode)
            .then(|| batch::window(definition, state, batch_size)),
        screen,
        cycles_completed: state.during_shift_cycles_completed,
        log: state.log.render(log_limit),
        notes: state.notes.iter().map(|n| n.text.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_LOG_LIMIT;

    #[test]
    fn test_strict_line_format() {
        let def = ChecklistDefinition::default();
        let state = SessionState::new();

        assert_eq!(
            strict_line(&def, &state),
            "[OPENING] Step 1/7: Fill ice for bartenders\nReply: done | blocked | skip"
        );
    }

    #[test]
    fn test_strict_line_during_shift() {
        let def = ChecklistDefinition::default();
        let mut state = SessionState::new();
        state.enter_phase(Phase::DuringShift);
        state.current_item_index = 1;

        assert_eq!(
            strict_line(&def, &state),
            "[DURING SHIFT] Step 2/5: Take any glasses to bar\nReply: done | blocked | skip"
        );
    }

    #[test]
    fn test_render_task() {
        let def = ChecklistDefinition::default();
        let model = render(&def, &SessionState::new(), 5, DEFAULT_LOG_LIMIT);

        assert_eq!(model.phase_label, "OPENING");
        assert_eq!(model.step_meta.as_deref(), Some("Step 1/7"));
        assert_eq!(
            model.screen,
            Screen::Task {
                text: "Fill ice for bartenders".to_string()
            }
        );
        assert_eq!(model.batch_window, None);
        assert_eq!(model.log, "(none)");
    }

    #[test]
    fn test_render_batch_window_when_enabled() {
        let def = ChecklistDefinition::default();
        let mut state = SessionState::new();
        state.batch_mode = true;
        state.current_item_index = 4;

        let model = render(&def, &state, 5, DEFAULT_LOG_LIMIT);
        let window = model.batch_window.unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].index, 4);
    }

    #[test]
    fn test_render_prompts_hide_task() {
        let def = ChecklistDefinition::default();
        let mut state = SessionState::new();
        state.enter_phase(Phase::DuringShift);
        state.current_item_index = 5;
        state.prompt = Some(Prompt::Cycle);
        state.batch_mode = true;

        let model = render(&def, &state, 5, DEFAULT_LOG_LIMIT);
        assert_eq!(model.screen, Screen::CyclePrompt);
        assert_eq!(model.step_meta, None);
        assert_eq!(model.task_prompt, None);
        assert_eq!(model.batch_window, None);

        state.prompt = Some(Prompt::Closing);
        assert_eq!(screen(&def, &state), Screen::ClosingPrompt);
    }

    #[test]
    fn test_render_verification_and_done() {
        let def = ChecklistDefinition::default();
        let mut state = SessionState::new();
        state.enter_phase(Phase::Closing);
        state.current_item_index = 8;
        assert_eq!(screen(&def, &state), Screen::Verification);

        state.enter_phase(Phase::Done);
        let model = render(&def, &state, 5, DEFAULT_LOG_LIMIT);
        assert_eq!(model.screen, Screen::Done);
        assert_eq!(model.phase_label, "DONE");
    }
}
