use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use shiftcheck::cli::prompt::Target;
use shiftcheck::cli::task::TaskAction;
use shiftcheck::cli::{Answer, GlobalArgs};
use shiftcheck::engine::Confirmations;
use shiftcheck::Result;
use std::io;

#[derive(Parser)]
#[command(name = "shiftcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shift checklist: opening, floor cycles, closing and verification", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start (or restart) the shift at the opening checklist; the log is kept
    Start,

    /// Discard the session and its log
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the current step
    Status {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Mark the current task done
    Done,

    /// Skip the current task
    Skip,

    /// Mark the current task blocked
    Block {
        /// What's the blocker?
        reason: Vec<String>,
    },

    /// Answer "yes" to the pending prompt
    Yes,

    /// Answer "no" to the pending prompt
    No,

    /// Answer the "run another floor cycle?" prompt
    Cycle {
        #[arg(value_enum)]
        answer: Answer,
    },

    /// Answer the "go to closing?" prompt
    Closing {
        #[arg(value_enum)]
        answer: Answer,
    },

    /// Complete several items of the batch window at once
    Batch {
        /// Item numbers as displayed (e.g. 2 4)
        #[arg(required = true)]
        items: Vec<usize>,
    },

    /// Show or hide the batch window
    BatchMode {
        #[arg(value_parser = ["on", "off"])]
        mode: String,
    },

    /// Run the closing verification
    Verify {
        /// Mop procedure followed
        #[arg(long)]
        mop: bool,

        /// Trash and recycling taken out
        #[arg(long)]
        trash: bool,

        /// No blocked items remaining
        #[arg(long)]
        no_blocked: bool,
    },

    /// Show blocked and skipped items
    Log,

    /// Add a shift note
    Note {
        text: Vec<String>,
    },

    /// Print the checklist
    Checklist,

    /// Walk through the shift interactively
    Run,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = shiftcheck::logging::init_tracing(cli.global.verbose) {
        eprintln!("{}", format!("Warning: logging unavailable: {}", e).yellow());
    }

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = &cli.global;

    match cli.command {
        Commands::Start => shiftcheck::cli::reset::start(global)?,

        Commands::Reset { yes } => shiftcheck::cli::reset::reset(global, yes)?,

        Commands::Status { json } => shiftcheck::cli::status::run(global, json)?,

        Commands::Done => shiftcheck::cli::task::run(global, TaskAction::Done)?,

        Commands::Skip => shiftcheck::cli::task::run(global, TaskAction::Skip)?,

        Commands::Block { reason } => {
            let reason = (!reason.is_empty()).then(|| reason.join(" "));
            shiftcheck::cli::task::run(global, TaskAction::Block(reason))?;
        }

        Commands::Yes => shiftcheck::cli::prompt::run(global, Target::Pending, Answer::Yes)?,

        Commands::No => shiftcheck::cli::prompt::run(global, Target::Pending, Answer::No)?,

        Commands::Cycle { answer } => shiftcheck::cli::prompt::run(global, Target::Cycle, answer)?,

        Commands::Closing { answer } => {
            shiftcheck::cli::prompt::run(global, Target::Closing, answer)?
        }

        Commands::Batch { items } => shiftcheck::cli::batch::run(global, &items)?,

        Commands::BatchMode { mode } => shiftcheck::cli::batch::set_mode(global, mode == "on")?,

        Commands::Verify {
            mop,
            trash,
            no_blocked,
        } => shiftcheck::cli::verify::run(global, Confirmations::new(mop, trash, no_blocked))?,

        Commands::Log => shiftcheck::cli::log::run(global)?,

        Commands::Note { text } => shiftcheck::cli::log::note(global, &text.join(" "))?,

        Commands::Checklist => shiftcheck::cli::checklist::run(global)?,

        Commands::Run => shiftcheck::cli::run::run(global)?,

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "shiftcheck", &mut io::stdout());
        }
    }

    Ok(())
}
