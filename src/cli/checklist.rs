use super::{open_engine, GlobalArgs};
use crate::models::Phase;
use crate::Result;
use colored::Colorize;

/// Print the loaded checklist definition
pub fn run(global: &GlobalArgs) -> Result<()> {
    let engine = open_engine(global)?;
    let definition = engine.definition();

    for phase in Phase::WORKING {
        println!("{}", phase.label().cyan().bold());
        let items = definition.items(phase);
        if items.is_empty() {
            println!("  {}", "(empty)".bright_black());
        }
        for (i, item) in items.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, item);
        }
        println!();
    }

    Ok(())
}
