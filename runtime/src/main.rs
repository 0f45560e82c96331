// Copyright 2026 Urlcheck Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use urlcheck::cli::{self, args::RunArgs};

#[derive(Parser)]
#[command(
    name = "urlcheck",
    about = "urlcheck — health-check web pages and HTTP APIs into one report",
    version,
    after_help = "Run 'urlcheck <command> --help' for details on each command.\nRun 'urlcheck' with no command to check the targets in ./urls.txt."
)]
struct Cli {
    /// Suppress progress output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every target and write the report
    Run(RunArgs),
    /// Check environment and diagnose issues
    Doctor(RunArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[derive(Parser)]
struct DefaultRun {
    #[command(flatten)]
    args: RunArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        // No subcommand → run with default flags
        None => {
            let config = DefaultRun::parse_from(["urlcheck"]).args.into_config();
            cli::run_cmd::run(config, cli.quiet).await
        }
        Some(Commands::Run(args)) => cli::run_cmd::run(args.into_config(), cli.quiet).await,
        Some(Commands::Doctor(args)) => cli::doctor::run(&args.into_config()).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "urlcheck", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
