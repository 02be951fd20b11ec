//! Built-in subcommand handlers

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::format::{format_config, format_success};

use super::args::*;

/// Handle config command
///
/// `set` and `reset` write to `path`, starting from the file's own content
/// rather than the effective configuration.
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        ConfigCommands::Show { format } => {
            writeln!(out, "{}", format_config(current_config, format.into())?)?;
        }
        ConfigCommands::Set { key, value } => {
            let mut config = if path.exists() {
                CliConfig::load_from(path)?
            } else {
                CliConfig::default()
            };

            match key.as_str() {
                "registry_path" => {
                    config.registry_path = if value.is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(&value))
                    };
                }
                "verbose" => config.verbose = parse_bool(&key, &value)?,
                "color" => config.color = parse_bool(&key, &value)?,
                _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
            }

            config.save_to(path)?;
            writeln!(
                out,
                "{}",
                format_success(&format!("Set {} = {}", key, value))
            )?;
        }
        ConfigCommands::Reset => {
            CliConfig::default().save_to(path)?;
            writeln!(out, "{}", format_success("Configuration reset to defaults"))?;
        }
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "Invalid value for {}. Must be 'true' or 'false'",
            key
        )),
    }
}

/// Generate shell completion script
pub fn generate_completion(
    shell: clap_complete::Shell,
    cmd: &mut clap::Command,
    out: &mut dyn Write,
) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, bin_name, out);
    out.flush().context("Failed to write completion script")
}
