//! Global flags and built-in subcommands

use clap::{Args, FromArgMatches, Subcommand};
use std::path::PathBuf;

use crate::application::Application;

/// Flags accepted before or after any subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Site to run against when no tenant options are given
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Site registry file (overrides discovery and config file)
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/sitecmd/cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

/// Subcommands handled by the binary itself
#[derive(Subcommand, Debug)]
pub enum Builtin {
    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}

/// Root CLI: registered commands plus global flags and built-ins
pub fn build_cli<H: crate::command::Host>(app: &Application<H>) -> clap::Command {
    let root = app.cli().version(env!("CARGO_PKG_VERSION"));
    let root = GlobalArgs::augment_args(root);
    Builtin::augment_subcommands(root)
}

/// Built-in subcommand selected in `matches`, if any
pub fn builtin(matches: &clap::ArgMatches) -> Result<Option<Builtin>, clap::Error> {
    match matches.subcommand_name() {
        Some(name) if Builtin::has_subcommand(name) => {
            Builtin::from_arg_matches(matches).map(Some)
        }
        _ => Ok(None),
    }
}
