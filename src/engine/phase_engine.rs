//! PhaseEngine - command surface over a persisted session

use super::gate::{Confirmations, GateVerdict};
use super::render::{self, RenderModel};
use super::transition::{Command, Workflow, DEFAULT_BATCH_WINDOW};
use crate::models::{ChecklistDefinition, SessionState, DEFAULT_LOG_LIMIT};
use crate::state::StateStore;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Items offered in the batch window
    pub batch_window: usize,
    /// Records shown per log section
    pub log_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            batch_window: DEFAULT_BATCH_WINDOW,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

/// The shift workflow engine for a single session.
///
/// Every command runs to completion and writes the whole state through the
/// store before returning.
pub struct PhaseEngine<S: StateStore> {
    definition: ChecklistDefinition,
    store: S,
    state: SessionState,
    settings: EngineSettings,
}

impl<S: StateStore> PhaseEngine<S> {
    /// Load the session from `store`, settling any pending phase completion
    pub fn open(definition: ChecklistDefinition, store: S, settings: EngineSettings) -> Result<Self> {
        let state = store.load().context("Failed to load session state")?;

        let mut engine = Self {
            definition,
            store,
            state,
            settings,
        };

        let before = engine.state.clone();
        engine.state.normalize(&engine.definition);
        engine.settle();
        if engine.state != before {
            debug!("Loaded state adjusted to the checklist");
            engine.save()?;
        }

        Ok(engine)
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn definition(&self) -> &ChecklistDefinition {
        &self.definition
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn workflow(&self) -> Workflow<'_> {
        Workflow::new(&self.definition).with_batch_window(self.settings.batch_window)
    }

    fn settle(&mut self) {
        Workflow::new(&self.definition)
            .with_batch_window(self.settings.batch_window)
            .settle(&mut self.state);
    }

    fn save(&mut self) -> Result<()> {
        self.store
            .save(&self.state)
            .context("Failed to save session state")
    }

    /// Apply a command, persist on change, and return the gate verdict if any
    pub fn execute(&mut self, command: Command) -> Result<Option<GateVerdict>> {
        let name = command.name();
        let transition = self.workflow().apply(self.state.clone(), command);

        if transition.changed {
            if transition.state.phase != self.state.phase {
                info!(from = %self.state.phase, to = %transition.state.phase, "Phase changed");
            }
            self.state = transition.state;
            self.save()?;
        } else {
            debug!(command = name, "Command left state unchanged");
        }

        Ok(transition.verdict)
    }

    fn run(&mut self, command: Command) -> Result<RenderModel> {
        self.execute(command)?;
        Ok(self.render())
    }

    /// Current render model; no mutation
    pub fn render(&self) -> RenderModel {
        render::render(
            &self.definition,
            &self.state,
            self.settings.batch_window,
            self.settings.log_limit,
        )
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Restart the flow at opening; the log is kept
    pub fn start(&mut self) -> Result<RenderModel> {
        self.run(Command::Start)
    }

    /// Discard persisted state and history
    pub fn reset(&mut self) -> Result<RenderModel> {
        self.store.clear().context("Failed to clear session state")?;
        self.state = SessionState::default();
        self.settle();
        info!("Session reset");
        Ok(self.render())
    }

    pub fn complete(&mut self) -> Result<RenderModel> {
        self.run(Command::Complete)
    }

    pub fn skip(&mut self) -> Result<RenderModel> {
        self.run(Command::Skip)
    }

    pub fn block(&mut self, reason: &str) -> Result<RenderModel> {
        self.run(Command::Block(reason.to_string()))
    }

    pub fn answer_cycle_prompt(&mut self, yes: bool) -> Result<RenderModel> {
        self.run(Command::AnswerCyclePrompt(yes))
    }

    pub fn answer_closing_prompt(&mut self, yes: bool) -> Result<RenderModel> {
        self.run(Command::AnswerClosingPrompt(yes))
    }

    /// Complete absolute indices inside the batch window
    pub fn submit_batch(&mut self, indices: &[usize]) -> Result<RenderModel> {
        self.run(Command::SubmitBatch(indices.to_vec()))
    }

    pub fn verify(&mut self, confirmations: Confirmations) -> Result<GateVerdict> {
        Ok(self
            .execute(Command::Verify(confirmations))?
            .unwrap_or(GateVerdict::NotApplicable))
    }

    pub fn set_batch_mode(&mut self, on: bool) -> Result<RenderModel> {
        self.run(Command::SetBatchMode(on))
    }

    pub fn add_note(&mut self, text: &str) -> Result<RenderModel> {
        self.run(Command::AddNote(text.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render::Screen;
    use crate::models::{Phase, Prompt};
    use crate::state::MemoryStateStore;

    fn engine() -> PhaseEngine<MemoryStateStore> {
        PhaseEngine::open(
            ChecklistDefinition::default(),
            MemoryStateStore::new(),
            EngineSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_open_fresh() {
        let engine = engine();
        assert_eq!(engine.state().phase, Phase::Opening);
        assert_eq!(engine.store().saves(), 0);
    }

    #[test]
    fn test_commands_persist() {
        let mut engine = engine();
        engine.complete().unwrap();
        engine.block("  ").unwrap();

        assert_eq!(engine.store().saves(), 2);

        let reloaded = PhaseEngine::open(
            ChecklistDefinition::default(),
            engine.into_store(),
            EngineSettings::default(),
        )
        .unwrap();
        assert_eq!(reloaded.state().current_item_index, 2);
        assert_eq!(
            reloaded.state().log.blocked_items[0].blocker.as_deref(),
            Some("(no details)")
        );
    }

    #[test]
    fn test_noop_does_not_save() {
        let mut engine = engine();
        engine.answer_cycle_prompt(true).unwrap();
        engine.verify(Confirmations::all()).unwrap();
        assert_eq!(engine.store().saves(), 0);
    }

    #[test]
    fn test_open_settles_legacy_exhausted_opening() {
        let store = MemoryStateStore::with_raw(r#"{"phase": "opening", "current_item_index": 7}"#);
        let engine =
            PhaseEngine::open(ChecklistDefinition::default(), store, EngineSettings::default())
                .unwrap();

        assert_eq!(engine.state().phase, Phase::DuringShift);
        assert_eq!(engine.state().current_item_index, 0);
        assert_eq!(engine.store().saves(), 1);
    }

    #[test]
    fn test_open_clamps_index() {
        let store = MemoryStateStore::with_raw(r#"{"phase": "closing", "current_item_index": 40}"#);
        let engine =
            PhaseEngine::open(ChecklistDefinition::default(), store, EngineSettings::default())
                .unwrap();

        assert_eq!(engine.state().current_item_index, 8);
        assert_eq!(engine.render().screen, Screen::Verification);
    }

    #[test]
    fn test_open_drops_prompt_with_items_left() {
        let store = MemoryStateStore::with_raw(
            r#"{"phase": "during_shift", "current_item_index": 2, "prompt": "cycle"}"#,
        );
        let mut engine =
            PhaseEngine::open(ChecklistDefinition::default(), store, EngineSettings::default())
                .unwrap();

        assert_eq!(engine.state().phase, Phase::DuringShift);
        assert_eq!(engine.state().current_item_index, 2);
        assert_eq!(engine.state().prompt, None);
        assert_eq!(engine.state().during_shift_cycles_completed, 0);
        assert!(matches!(engine.render().screen, Screen::Task { .. }));
        assert_eq!(engine.store().saves(), 1);

        // Answers are ignored until the list is actually finished
        engine.answer_cycle_prompt(false).unwrap();
        engine.answer_closing_prompt(false).unwrap();
        assert_eq!(engine.state().current_item_index, 2);

        for _ in 0..3 {
            engine.complete().unwrap();
        }
        assert_eq!(engine.state().prompt, Some(Prompt::Cycle));
        assert_eq!(engine.state().during_shift_cycles_completed, 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = engine();
        for _ in 0..9 {
            engine.skip().unwrap();
        }
        engine.add_note("spill at table 4").unwrap();
        assert_eq!(engine.state().phase, Phase::DuringShift);

        let model = engine.reset().unwrap();

        assert_eq!(engine.state(), &SessionState::default());
        assert!(engine.store().raw().is_none());
        assert_eq!(model.log, "(none)");
        assert!(model.notes.is_empty());
    }

    #[test]
    fn test_prompt_flow_through_engine() {
        let mut engine = engine();
        for _ in 0..12 {
            engine.complete().unwrap();
        }
        assert_eq!(engine.state().prompt, Some(Prompt::Cycle));

        let model = engine.answer_cycle_prompt(false).unwrap();
        assert_eq!(model.screen, Screen::ClosingPrompt);

        let model = engine.answer_closing_prompt(true).unwrap();
        assert_eq!(model.phase, Phase::Closing);
        assert_eq!(model.step_meta.as_deref(), Some("Step 1/8"));
    }
}
