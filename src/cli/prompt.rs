//! Answers to the cycle and closing prompts

use super::{open_engine, print_model, Answer, GlobalArgs};
use crate::engine::{PhaseEngine, RenderModel};
use crate::models::Prompt;
use crate::state::StateStore;
use crate::Result;
use colored::Colorize;

/// Which prompt an answer is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Whichever prompt is pending
    Pending,
    Cycle,
    Closing,
}

/// Apply an answer; `None` when the targeted prompt is not pending
pub fn answer<S: StateStore>(
    engine: &mut PhaseEngine<S>,
    target: Target,
    yes: bool,
) -> Result<Option<RenderModel>> {
    let pending = engine.state().prompt;

    let model = match (target, pending) {
        (Target::Pending | Target::Cycle, Some(Prompt::Cycle)) => engine.answer_cycle_prompt(yes)?,
        (Target::Pending | Target::Closing, Some(Prompt::Closing)) => {
            engine.answer_closing_prompt(yes)?
        }
        _ => return Ok(None),
    };

    Ok(Some(model))
}

pub fn run(global: &GlobalArgs, target: Target, answer_value: Answer) -> Result<()> {
    let mut engine = open_engine(global)?;

    match answer(&mut engine, target, answer_value.is_yes())? {
        Some(model) => print_model(&model),
        None => {
            println!("{}", "No matching prompt is pending.".yellow());
            print_model(&engine.render());
        }
    }

    Ok(())
}
