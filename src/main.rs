//! Fomodoro - a focus/break interval timer for the terminal
//!
//! Count down a focus session, take a break, repeat:
//! - 25/5, 50/10 or 75/15 minute presets, or custom durations
//! - A distinct sound at the end of each phase
//! - Pauses at every phase boundary until you resume

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::warn;

use fomodoro::cli::{Cli, Commands, Display, RunArgs, TerminalRenderer};
use fomodoro::engine::IntervalTimerEngine;
use fomodoro::session::{Session, SessionRenderer};
use fomodoro::sound::{try_create_player, SoundSource};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }

    // A stdin read left pending by Ctrl-C would otherwise hold runtime
    // shutdown open until the next Enter.
    std::process::exit(0);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(args).await?,
        Some(Commands::Presets) => Display::show_presets(),
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive session on stdin/stdout.
async fn run_session(args: RunArgs) -> Result<()> {
    let mut engine =
        IntervalTimerEngine::new(args.timer_config()).context("Cannot start the timer")?;
    if args.start {
        engine.start();
    }

    for path in [&args.focus_sound, &args.break_sound].into_iter().flatten() {
        if let Err(e) = SoundSource::file_checked(path) {
            warn!("{} ({})", e, e.suggestion());
        }
    }

    let player = if args.no_sound {
        None
    } else {
        try_create_player()
    };

    let mut session = Session::new(engine, args.phase_sounds(), player);
    let mut renderer = TerminalRenderer::new(args.json);
    renderer.help();

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(input, &mut renderer).await?;

    if !args.json {
        println!();
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["fomodoro"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_presets() {
        let cli = Cli::parse_from(["fomodoro", "presets"]);
        assert!(matches!(cli.command, Some(Commands::Presets)));
    }

    #[test]
    fn test_cli_parse_run_with_options() {
        let cli = Cli::parse_from(["fomodoro", "run", "--preset", "75/15", "--no-sound"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.timer_config().focus_minutes, 75);
                assert!(args.no_sound);
            }
            _ => panic!("Expected Run command"),
        }
    }
}
