//! `sandbox`: the startup sandbox dashboard in a terminal.
//!
//! Logging goes to stderr and is controlled by `SANDBOX_LOG`
//! (an `EnvFilter` directive, e.g. `SANDBOX_LOG=sandbox_ui=debug`).

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sandbox_ui::RealEnv;
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

const LOG_ENV: &str = "SANDBOX_LOG";

/// Startup sandbox dashboard
#[derive(Debug, Parser)]
#[command(name = "sandbox", version, about)]
struct Cli {
    /// Config file (YAML). Falls back to $SANDBOX_CONFIG, then defaults.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Surface file (YAML or JSON). Defaults to the standard game page.
    #[arg(long, global = true, value_name = "FILE")]
    surface: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the dashboard
    Show {
        /// Initial stats as JSON, e.g. '{"budget":1000,"rep":80,"morale":40}'
        #[arg(long, value_name = "JSON")]
        state: Option<String>,
    },
    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Preview the stat deltas of a choice
    Preview(PreviewArgs),
    /// Animate a counter from one value to another
    Animate {
        #[arg(allow_negative_numbers = true)]
        from: i64,
        #[arg(allow_negative_numbers = true)]
        to: i64,
        /// Animation window in milliseconds
        #[arg(long, value_name = "MS")]
        duration: Option<u64>,
    },
    /// Apply a stat update and render the result
    Update {
        /// Partial update as JSON, e.g. '{"budget":50}'
        json: String,
        /// Stats before the update
        #[arg(long, value_name = "JSON")]
        state: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    /// Print the active theme
    Show,
    /// Switch to the next theme
    Next,
    /// Switch to a named theme
    Set { name: String },
}

#[derive(Debug, Args)]
struct PreviewArgs {
    #[arg(long, allow_hyphen_values = true)]
    budget: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    rep: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    morale: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let ctx = Context::load(
        cli.config.as_deref(),
        cli.surface.as_deref(),
        !cli.no_color && console::colors_enabled(),
        &RealEnv,
    )?;

    match cli.command {
        Command::Show { state } => print!("{}", ctx.show(state.as_deref())?),
        Command::Theme { action } => {
            let output = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => ctx.theme_show()?,
                ThemeAction::Next => ctx.theme_next()?,
                ThemeAction::Set { name } => ctx.theme_set(&name)?,
            };
            println!("{}", output);
        }
        Command::Preview(args) => {
            println!("{}", commands::preview(args.budget, args.rep, args.morale))
        }
        Command::Animate { from, to, duration } => ctx.animate(from, to, duration)?,
        Command::Update { json, state } => print!("{}", ctx.update(&json, state.as_deref())?),
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
