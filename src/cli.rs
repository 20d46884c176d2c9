use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use confstack::config::ColorMode;
use confstack::presentation::{OutputFormat, ResolveOptions};

/// confstack - inspect Cargo-style hierarchical configuration
#[derive(Parser, Debug)]
#[command(name = "confstack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output: auto, always, never
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Resolve as if started in this directory
    #[arg(short = 'C', long = "cwd", global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Override a configuration value (`KEY=VALUE`) or load an extra `.toml` file
    #[arg(long = "config", global = true, value_name = "KEY=VALUE|PATH")]
    pub config: Vec<String>,

    /// Application whose configuration is resolved (`cargo` by default)
    #[arg(long, global = true, value_name = "NAME")]
    pub app: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            cwd: self.cwd.clone(),
            app: self.app.clone(),
            config_overrides: self.config.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Toml,
    Json,
    #[value(name = "json-value")]
    JsonValue,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Toml => OutputFormat::Toml,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::JsonValue => OutputFormat::JsonValue,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a resolved configuration value
    Get {
        /// Dotted key; the whole configuration when omitted
        key: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: FormatArg,

        /// Annotate each value with where it was defined (toml only)
        #[arg(long)]
        show_origin: bool,
    },

    /// List configuration sources in precedence order (lowest first)
    Sources,

    /// Resolve and report warnings and errors
    Check {
        /// Exit non-zero when there are warnings
        #[arg(long)]
        deny_warnings: bool,
    },

    /// List recognized configuration keys
    Schema {
        /// Only keys under this prefix
        prefix: Option<String>,
    },
}
