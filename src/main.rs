use anyhow::Result;
use clap::{CommandFactory, Parser};

use uninstall_targets::cli::{Cli, Command};
use uninstall_targets::commands;
use uninstall_targets::config::Config;
use uninstall_targets::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Pick(args) => {
            tracing::info!(?args, "Starting picker");
            commands::pick::run(args, &config)?;
        }
        Command::Show(args) => {
            tracing::info!(?args, "Showing targets");
            commands::show::run(args, &config)?;
        }
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "uninstall-targets",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uninstall_targets={}", level)));

    // Logs go to stderr so stdout stays clean for the selection output,
    // and are held back while the picker owns the screen
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(logging::writer))
        .with(filter)
        .init();
}
