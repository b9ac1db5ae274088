//! Chat Poster command line entry point.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chatposter::cli::{Cli, Commands, ConfigCommands};

/// Install the stderr log subscriber. `RUST_LOG` wins over `--log-level`.
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()
        .ok();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Convert(args) => {
            let config = commands::load_config(config_path)?;
            commands::convert::handle(&args, &config).map(|_| ())
        }
        Commands::Textual(args) => {
            let config = commands::load_config(config_path)?;
            commands::emit::handle_textual(&args, &config)
        }
        Commands::Emoji { io, until } => {
            let config = commands::load_config(config_path)?;
            commands::emit::handle_emoji(&io, until, &config)
        }
        Commands::Links(args) => {
            let config = commands::load_config(config_path)?;
            commands::emit::handle_links(&args, &config)
        }
        Commands::Stats { temp, json } => {
            let config = commands::load_config(config_path)?;
            commands::stats::handle(&temp, json, &config)
        }
        Commands::Run(args) => {
            let config = commands::load_config(config_path)?;
            commands::convert::handle(&args, &config)?;
            commands::stats::handle(&args.temp, false, &config)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
