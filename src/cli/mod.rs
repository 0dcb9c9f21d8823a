//! Command-line front end
//!
//! Each subcommand opens the persisted session, applies one engine command
//! and prints the resulting render model.

pub mod batch;
pub mod checklist;
pub mod log;
pub mod prompt;
pub mod reset;
pub mod run;
pub mod status;
pub mod task;
pub mod verify;

use crate::config::ShiftcheckConfig;
use crate::engine::{PhaseEngine, RenderModel, Screen};
use crate::models::Phase;
use crate::state::FileStateStore;
use crate::Result;
use clap::{Args, ValueEnum};
use colored::{ColoredString, Colorize};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Options shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ./shiftcheck.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session state file, overriding the config
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// yes / no answer to a prompt
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

/// Resolve config and open the file-backed engine
pub fn open_engine(global: &GlobalArgs) -> Result<PhaseEngine<FileStateStore>> {
    let project_root = env::current_dir()?;
    let mut config = ShiftcheckConfig::load(global.config.as_deref(), &project_root)?;
    if let Some(state) = &global.state {
        config.state_path = state.clone();
    }

    debug!(state = %config.state_path.display(), "Opening session");
    let definition = config.load_checklist()?;
    PhaseEngine::open(
        definition,
        FileStateStore::new(&config.state_path),
        config.engine_settings(),
    )
}

fn phase_pill(phase: Phase, label: &str) -> ColoredString {
    let pill = format!(" {} ", label);
    match phase {
        Phase::Opening => pill.black().on_yellow(),
        Phase::DuringShift => pill.black().on_cyan(),
        Phase::Closing => pill.white().on_blue(),
        Phase::Done => pill.black().on_green(),
    }
}

/// Print the main panel of a render model
pub fn print_model(model: &RenderModel) {
    let mut header = format!("{}", phase_pill(model.phase, &model.phase_label));
    if let Some(meta) = &model.step_meta {
        header.push_str(&format!("  {}", meta.bright_black()));
    }
    if model.cycles_completed > 0 {
        header.push_str(&format!(
            "  {}",
            format!("cycles: {}", model.cycles_completed).bright_black()
        ));
    }
    println!("{}", header);
    println!();

    match &model.screen {
        Screen::Task { .. } => {
            if let Some(prompt) = &model.task_prompt {
                println!("{}", prompt.bold());
            }
        }
        Screen::CyclePrompt | Screen::ClosingPrompt => {
            println!("{}", model.screen.message().yellow());
            println!("{}", "Answer with: shiftcheck yes | shiftcheck no".bright_black());
        }
        Screen::Verification => {
            println!("{}", model.screen.message().cyan());
            println!(
                "{}",
                "Run: shiftcheck verify --mop --trash --no-blocked".bright_black()
            );
        }
        Screen::Done => println!("{}", format!("✅ {}", model.screen.message()).green()),
        Screen::NoActiveTask => println!("{}", model.screen.message().bright_black()),
    }

    if let Some(window) = &model.batch_window {
        println!();
        println!("{}", "Batch (mark with: shiftcheck batch <N>...)".cyan());
        for slot in window {
            let mark = if slot.resolved { "[x]" } else { "[ ]" };
            println!("  {} {:>2}. {}", mark, slot.index + 1, slot.text);
        }
    }
}

/// Print the log section of a render model
pub fn print_log(model: &RenderModel) {
    println!("{}", "Log".cyan().bold());
    println!("{}", model.log);

    if !model.notes.is_empty() {
        println!();
        println!("{}", "Notes".cyan().bold());
        for note in &model.notes {
            println!("- {}", note);
        }
    }
}
