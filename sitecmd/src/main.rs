//! sitecmd CLI
//!
//! Runs the bundled commands against the sites of the installation found
//! from the working directory (or `--registry`).

use anyhow::{anyhow, Context, Result};
use clap::FromArgMatches;
use sitecmd::cli::{build_cli, builtin, generate_completion, handle_config, Builtin, GlobalArgs};
use sitecmd::commands::application;
use sitecmd::config::CliConfig;
use sitecmd::output::ConsoleOutput;
use sitecmd_core::ExitStatus;
use sitecmd_host::{bootstrap, HostOptions};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitStatus> {
    let mut app = application().context("Failed to register commands")?;
    let mut cli = build_cli(&app);
    let matches = cli.clone().get_matches();
    let globals = GlobalArgs::from_arg_matches(&matches)?;

    // Build configuration using priority chain: CLI args → env → file → defaults
    let mut builder = CliConfig::builder();
    if let Some(registry) = &globals.registry {
        builder = builder.with_registry_path(registry)?;
    }
    if globals.verbose {
        builder = builder.with_verbose(true);
    }
    if globals.no_color {
        builder = builder.with_color(false);
    }
    let config = builder
        .with_env_overrides()
        .with_config_file(globals.config.as_deref(), !globals.no_config)?
        .build()
        .context("Configuration error")?;

    init_tracing(config.verbose);
    ConsoleOutput::set_colors(config.color);
    debug!(?config, "configuration loaded");

    match builtin(&matches)? {
        Some(Builtin::Completion { shell }) => {
            generate_completion(shell, &mut cli, &mut std::io::stdout())?;
            return Ok(ExitStatus::Success);
        }
        Some(Builtin::Config { command }) => {
            let path = globals.config.clone().unwrap_or_else(CliConfig::config_path);
            handle_config(command, &config, &path, &mut std::io::stdout())?;
            return Ok(ExitStatus::Success);
        }
        None => {}
    }

    let cwd = std::env::current_dir().context("Cannot read the working directory")?;
    let options = HostOptions {
        registry: config.registry_path.clone(),
        url: globals.url.clone(),
    };
    let mut host = bootstrap(&cwd, &options).context("Failed to load the host application")?;

    let mut output = ConsoleOutput::new();
    app.dispatch(&matches, &mut host, &mut output)
        .ok_or_else(|| anyhow!("No command selected"))
}

/// Logs go to stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
