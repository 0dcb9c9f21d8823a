use super::{open_engine, print_model, GlobalArgs};
use crate::Result;
use colored::Colorize;
use dialoguer::Confirm;

/// Restart the flow at opening, keeping the log
pub fn start(global: &GlobalArgs) -> Result<()> {
    let mut engine = open_engine(global)?;
    let model = engine.start()?;
    println!("{}", "🚀 Shift started".cyan());
    println!();
    print_model(&model);
    Ok(())
}

/// Discard the session and its history
pub fn reset(global: &GlobalArgs, yes: bool) -> Result<()> {
    if !yes {
        let confirm = Confirm::new()
            .with_prompt("Discard the whole session, including the log?")
            .default(false)
            .interact()?;
        if !confirm {
            println!("{}", "Reset cancelled".yellow());
            return Ok(());
        }
    }

    let mut engine = open_engine(global)?;
    let model = engine.reset()?;
    println!("{}", "🧹 Session reset".cyan());
    println!();
    print_model(&model);
    Ok(())
}
