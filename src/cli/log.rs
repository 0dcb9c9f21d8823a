use super::{open_engine, print_log, GlobalArgs};
use crate::Result;
use colored::Colorize;

/// Print blocked / skipped records and notes
pub fn run(global: &GlobalArgs) -> Result<()> {
    let engine = open_engine(global)?;
    let log = &engine.state().log;
    println!(
        "{}",
        format!(
            "completed: {}  blocked: {}  skipped: {}",
            log.completed_items.len(),
            log.blocked_items.len(),
            log.skipped_items.len()
        )
        .bright_black()
    );
    print_log(&engine.render());
    Ok(())
}

/// Append a free-text shift note
pub fn note(global: &GlobalArgs, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        println!("{}", "Empty note ignored".yellow());
        return Ok(());
    }

    let mut engine = open_engine(global)?;
    engine.add_note(text)?;
    println!("{}", "📝 Note saved".cyan());
    Ok(())
}
