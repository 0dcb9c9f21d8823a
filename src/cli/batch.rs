//! Batch completion from the command line (1-based item numbers)

use super::{open_engine, print_model, GlobalArgs};
use crate::Result;
use colored::Colorize;

/// Convert displayed item numbers to absolute indices
pub fn to_indices(numbers: &[usize]) -> Result<Vec<usize>> {
    numbers
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("Item numbers start at 1"))
        })
        .collect()
}

pub fn run(global: &GlobalArgs, numbers: &[usize]) -> Result<()> {
    let indices = to_indices(numbers)?;
    let mut engine = open_engine(global)?;

    if engine.state().current_task(engine.definition()).is_none() {
        println!("{}", "Batch is only available while a task is active.".yellow());
        print_model(&engine.render());
        return Ok(());
    }

    let before = engine.state().log.completed_items.len();
    let model = engine.submit_batch(&indices)?;
    let added = engine.state().log.completed_items.len() - before;

    println!("{}", format!("✓ {} item(s) completed", added).green());
    println!();
    print_model(&model);
    Ok(())
}

/// Toggle whether the batch window is shown
pub fn set_mode(global: &GlobalArgs, on: bool) -> Result<()> {
    let mut engine = open_engine(global)?;
    let model = engine.set_batch_mode(on)?;
    let label = if on { "on" } else { "off" };
    println!("{}", format!("Batch mode {}", label).cyan());
    println!();
    print_model(&model);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_indices() {
        assert_eq!(to_indices(&[1, 3, 5]).unwrap(), vec![0, 2, 4]);
        assert!(to_indices(&[0]).is_err());
        assert!(to_indices(&[]).unwrap().is_empty());
    }
}
