use super::{open_engine, print_model, GlobalArgs};
use crate::engine::{Confirmations, GateVerdict};
use crate::Result;
use colored::Colorize;

pub fn run(global: &GlobalArgs, confirmations: Confirmations) -> Result<()> {
    let mut engine = open_engine(global)?;
    let verdict = engine.verify(confirmations)?;
    print_verdict(&verdict);
    println!();
    print_model(&engine.render());
    Ok(())
}

pub fn print_verdict(verdict: &GateVerdict) {
    match verdict {
        GateVerdict::Cleared { blocked_on_record } => {
            println!("{}", verdict.message().green().bold());
            if *blocked_on_record > 0 {
                println!(
                    "{}",
                    format!(
                        "⚠ {} blocked item(s) still on record; cleared on your confirmation.",
                        blocked_on_record
                    )
                    .yellow()
                );
            }
        }
        GateVerdict::Rejected { .. } => println!("{}", verdict.message().red()),
        GateVerdict::NotApplicable => println!("{}", verdict.message().yellow()),
    }
}
