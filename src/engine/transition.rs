//! Pure state transitions: (definition, state, command) -> new state.
//!
//! Nothing here touches storage or the terminal. Commands issued in a
//! sub-state where they make no sense leave the state untouched.

use super::batch;
use super::gate::{self, Confirmations, GateVerdict};
use crate::models::{ChecklistDefinition, Note, Phase, Prompt, Resolution, SessionState};
use chrono::Utc;
use tracing::{debug, info};

/// Default batch window size
pub const DEFAULT_BATCH_WINDOW: usize = 5;

/// A command accepted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Complete,
    Skip,
    Block(String),
    AnswerCyclePrompt(bool),
    AnswerClosingPrompt(bool),
    SubmitBatch(Vec<usize>),
    Verify(Confirmations),
    SetBatchMode(bool),
    AddNote(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Complete => "complete",
            Command::Skip => "skip",
            Command::Block(_) => "block",
            Command::AnswerCyclePrompt(_) => "answer-cycle-prompt",
            Command::AnswerClosingPrompt(_) => "answer-closing-prompt",
            Command::SubmitBatch(_) => "submit-batch",
            Command::Verify(_) => "verify",
            Command::SetBatchMode(_) => "set-batch-mode",
            Command::AddNote(_) => "add-note",
        }
    }
}

/// Result of applying one command
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,

    /// Whether the state differs from the input
    pub changed: bool,

    /// Gate verdict, for `Verify` only
    pub verdict: Option<GateVerdict>,
}

/// The phase workflow over one checklist definition
#[derive(Debug, Clone, Copy)]
pub struct Workflow<'a> {
    definition: &'a ChecklistDefinition,
    batch_window: usize,
}

impl<'a> Workflow<'a> {
    pub fn new(definition: &'a ChecklistDefinition) -> Self {
        Self {
            definition,
            batch_window: DEFAULT_BATCH_WINDOW,
        }
    }

    pub fn with_batch_window(mut self, size: usize) -> Self {
        self.batch_window = size;
        self
    }

    pub fn apply(&self, state: SessionState, command: Command) -> Transition {
        let before = state.clone();
        let mut state = state;
        let mut verdict = None;

        debug!(command = command.name(), phase = %state.phase, index = state.current_item_index, "Applying command");

        match command {
            Command::Start => {
                state.enter_phase(Phase::Opening);
                self.settle(&mut state);
            }
            Command::Complete => self.resolve_current(&mut state, Resolution::Completed, None),
            Command::Skip => self.resolve_current(&mut state, Resolution::Skipped, None),
            Command::Block(reason) => {
                self.resolve_current(&mut state, Resolution::Blocked, Some(reason.as_str()))
            }
            Command::AnswerCyclePrompt(yes) => self.answer_cycle(&mut state, yes),
            Command::AnswerClosingPrompt(yes) => self.answer_closing(&mut state, yes),
            Command::SubmitBatch(indices) => {
                if batch::submit(self.definition, &mut state, self.batch_window, &indices) {
                    self.settle(&mut state);
                }
            }
            Command::Verify(confirmations) => {
                let result = gate::evaluate(self.definition, &state, confirmations);
                if result.is_cleared() {
                    info!("Verification passed; shift done");
                    state.enter_phase(Phase::Done);
                }
                verdict = Some(result);
            }
            Command::SetBatchMode(on) => state.batch_mode = on,
            Command::AddNote(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    state.notes.push(Note {
                        text: text.to_string(),
                        ts: Utc::now(),
                    });
                }
            }
        }

        let changed = state != before;
        Transition {
            state,
            changed,
            verdict,
        }
    }

    /// Apply the phase-completion rule until the state is stable.
    ///
    /// Opening flows straight into during_shift; an exhausted during_shift
    /// list counts a cycle and raises the cycle prompt; closing waits for the
    /// gate. An empty list completes at index 0.
    pub fn settle(&self, state: &mut SessionState) {
        while state.prompt.is_none() && state.phase_exhausted(self.definition) {
            match state.phase {
                Phase::Opening => {
                    info!("Opening complete; moving to during shift");
                    state.enter_phase(Phase::DuringShift);
                }
                Phase::DuringShift => {
                    state.during_shift_cycles_completed += 1;
                    state.prompt = Some(Prompt::Cycle);
                    info!(
                        cycles = state.during_shift_cycles_completed,
                        "During shift cycle complete"
                    );
                }
                Phase::Closing | Phase::Done => break,
            }
        }
    }

    fn resolve_current(&self, state: &mut SessionState, resolution: Resolution, blocker: Option<&str>) {
        let Some(text) = state.current_task(self.definition) else {
            debug!("No current task; ignoring");
            return;
        };

        state.log.record(
            resolution,
            state.phase,
            state.current_item_index,
            state.visit,
            text,
            blocker,
        );
        state.current_item_index += 1;
        batch::skip_resolved(self.definition, state);
        self.settle(state);
    }

    fn answer_cycle(&self, state: &mut SessionState, yes: bool) {
        if state.prompt != Some(Prompt::Cycle) {
            debug!("No cycle prompt pending; ignoring");
            return;
        }

        if yes {
            state.enter_phase(Phase::DuringShift);
            self.settle(state);
        } else {
            state.prompt = Some(Prompt::Closing);
        }
    }

    fn answer_closing(&self, state: &mut SessionState, yes: bool) {
        if state.prompt != Some(Prompt::Closing) {
            debug!("No closing prompt pending; ignoring");
            return;
        }

        if yes {
            info!("Moving to closing");
            state.enter_phase(Phase::Closing);
            self.settle(state);
        } else {
            // Back to the end of the during-shift list: the cycle prompt is
            // shown again, but no cycle was completed
            state.phase = Phase::DuringShift;
            state.current_item_index = self.definition.len(Phase::DuringShift);
            state.prompt = Some(Prompt::Cycle);
        }
    }
}
