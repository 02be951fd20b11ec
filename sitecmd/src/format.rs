//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use sitecmd_host::SiteRecord;
use std::str::FromStr;

use tabled::{settings::Style, Table, Tabled};

use crate::config::CliConfig;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                other
            )),
        }
    }
}

/// Human-readable status of a site
pub fn site_status(site: &SiteRecord) -> &'static str {
    match (site.archived, site.deleted) {
        (_, true) => "deleted",
        (true, false) => "archived",
        (false, false) => "active",
    }
}

/// Format a list of sites
pub fn format_sites(sites: &[SiteRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(sites)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct SiteRow {
                #[tabled(rename = "ID")]
                id: String,
                #[tabled(rename = "URL")]
                url: String,
                #[tabled(rename = "Name")]
                name: String,
                #[tabled(rename = "Status")]
                status: String,
            }

            let rows: Vec<SiteRow> = sites
                .iter()
                .map(|site| SiteRow {
                    id: site.id.to_string(),
                    url: site.url.cyan().to_string(),
                    name: site.name.clone().unwrap_or_default(),
                    status: match site_status(site) {
                        "active" => "active".green().to_string(),
                        status => status.yellow().to_string(),
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Sites:".bold(), table))
        }
    }
}

/// Format the effective CLI configuration
pub fn format_config(config: &CliConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            let registry = config
                .registry_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(discovered)".to_string());

            let mut output = String::new();
            output.push_str(&"CLI Configuration:".bold().to_string());
            output.push('\n');
            output.push_str(&format!("{:<20} {}\n", "Registry", registry));
            output.push_str(&format!("{:<20} {}\n", "Verbose", config.verbose));
            output.push_str(&format!("{:<20} {}", "Color", config.color));
            Ok(output)
        }
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
