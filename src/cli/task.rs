//! done / skip / block for the current task

use super::{open_engine, print_model, GlobalArgs};
use crate::Result;
use colored::Colorize;

/// Outcome reported for the current task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Done,
    Skip,
    Block(Option<String>),
}

pub fn run(global: &GlobalArgs, action: TaskAction) -> Result<()> {
    let mut engine = open_engine(global)?;

    if engine.state().current_task(engine.definition()).is_none() {
        println!("{}", "No current task.".yellow());
        print_model(&engine.render());
        return Ok(());
    }

    let model = match action {
        TaskAction::Done => engine.complete()?,
        TaskAction::Skip => engine.skip()?,
        TaskAction::Block(reason) => engine.block(reason.as_deref().unwrap_or(""))?,
    };

    print_model(&model);
    Ok(())
}
