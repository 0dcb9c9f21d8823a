//! Interactive shift loop

use super::verify::print_verdict;
use super::{open_engine, print_model, GlobalArgs};
use crate::engine::{Confirmations, Screen};
use crate::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select};

const TASK_ACTIONS: &[&str] = &["done", "blocked", "skip", "batch", "quit"];

pub fn run(global: &GlobalArgs) -> Result<()> {
    let mut engine = open_engine(global)?;

    loop {
        let model = engine.render();
        println!();
        print_model(&model);
        println!();

        match model.screen {
            Screen::Task { .. } => {
                let Some(choice) = Select::new()
                    .items(TASK_ACTIONS)
                    .default(0)
                    .interact_opt()?
                else {
                    break;
                };

                match TASK_ACTIONS[choice] {
                    "done" => {
                        engine.complete()?;
                    }
                    "skip" => {
                        engine.skip()?;
                    }
                    "blocked" => {
                        let blocker: String = Input::new()
                            .with_prompt("What’s the blocker?")
                            .allow_empty(true)
                            .interact_text()?;
                        engine.block(&blocker)?;
                    }
                    "batch" => {
                        let window = crate::engine::batch::window(
                            engine.definition(),
                            engine.state(),
                            engine.settings().batch_window,
                        );
                        let labels: Vec<String> = window
                            .iter()
                            .map(|slot| format!("{}. {}", slot.index + 1, slot.text))
                            .collect();
                        let defaults: Vec<bool> = window.iter().map(|slot| slot.resolved).collect();

                        if let Some(picked) = MultiSelect::new()
                            .with_prompt("Mark completed items")
                            .items(&labels)
                            .defaults(&defaults)
                            .interact_opt()?
                        {
                            let indices: Vec<usize> =
                                picked.iter().map(|&i| window[i].index).collect();
                            engine.submit_batch(&indices)?;
                        }
                    }
                    _ => break,
                }
            }

            Screen::CyclePrompt => {
                let Some(yes) = Confirm::new()
                    .with_prompt("Run another floor cycle?")
                    .interact_opt()?
                else {
                    break;
                };
                engine.answer_cycle_prompt(yes)?;
            }

            Screen::ClosingPrompt => {
                let Some(yes) = Confirm::new()
                    .with_prompt("Go to Closing?")
                    .interact_opt()?
                else {
                    break;
                };
                engine.answer_closing_prompt(yes)?;
            }

            Screen::Verification => {
                let mop = Confirm::new()
                    .with_prompt("Mop procedure followed (hot water & bleach, water changed per area)?")
                    .default(false)
                    .interact()?;
                let trash = Confirm::new()
                    .with_prompt("Trash and recycling taken out?")
                    .default(false)
                    .interact()?;
                let no_blocked = Confirm::new()
                    .with_prompt("No blocked items remaining?")
                    .default(false)
                    .interact()?;

                let verdict = engine.verify(Confirmations::new(mop, trash, no_blocked))?;
                print_verdict(&verdict);

                if !verdict.is_cleared()
                    && !Confirm::new()
                        .with_prompt("Try verification again?")
                        .default(true)
                        .interact()?
                {
                    break;
                }
            }

            Screen::Done | Screen::NoActiveTask => break,
        }
    }

    println!("{}", "Progress saved.".bright_black());
    Ok(())
}
