//! confstack CLI - inspect Cargo-style hierarchical configuration
//!
//! Usage: confstack <COMMAND>
//!
//! Commands:
//!   get      Print a resolved configuration value
//!   sources  List configuration sources in precedence order
//!   check    Resolve and report warnings and errors
//!   schema   List recognized configuration keys

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use confstack::config::ColorMode;
use confstack::domain::value_objects::EnvSnapshot;

use cli::{Cli, Commands};
use commands::CommandContext;

/// Overrides the `-v` derived log filter.
const LOG_ENV: &str = "CONFSTACK_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.color.map(ColorMode::from));

    let ctx = CommandContext {
        options: cli.resolve_options(),
        json: cli.json,
        verbose: cli.verbose,
        color: cli.color.map(ColorMode::from),
        env: EnvSnapshot::capture(),
    };

    match &cli.command {
        Commands::Get {
            key,
            format,
            show_origin,
        } => commands::get::cmd_get(&ctx, key.as_deref(), (*format).into(), *show_origin),
        Commands::Sources => commands::sources::cmd_sources(&ctx),
        Commands::Check { deny_warnings } => commands::check::cmd_check(&ctx, *deny_warnings),
        Commands::Schema { prefix } => commands::schema::cmd_schema(&ctx, prefix.as_deref()),
    }
}

fn init_tracing(verbose: u8, color: Option<ColorMode>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    let ansi = color != Some(ColorMode::Never) && std::io::stderr().is_terminal();
    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}
