use anyhow::Context;
use sitecmd_core::{ParameterSpec, PrimitiveType, ResolvedArguments, TenantFilter};
use sitecmd_host::{SiteRecord, SiteRegistry};

use crate::command::{Command, CommandContext};
use crate::format::{format_sites, OutputFormat};
use crate::output::Printer;

sitecmd_core::command_docs! {
    /// List the sites of the installation.
    pub struct SiteList;
}

impl Command<SiteRegistry> for SiteList {
    fn docs(&self) -> &'static str {
        Self::DOCS
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::option("format")
                .typed(PrimitiveType::String)
                .default_value("table")
                .help("Output format (table or json)"),
            ParameterSpec::option("include_archived")
                .typed(PrimitiveType::Bool)
                .help("Also list archived and deleted sites"),
        ]
    }

    fn handle(
        &mut self,
        ctx: &mut CommandContext<'_, SiteRegistry>,
        args: ResolvedArguments,
    ) -> anyhow::Result<()> {
        let format: OutputFormat = args
            .string("format")
            .unwrap_or("table")
            .parse()
            .context("Invalid --format")?;

        let filter = if args.flag("include_archived") {
            TenantFilter::all()
        } else {
            TenantFilter::active()
        };

        let sites: Vec<SiteRecord> = ctx
            .host()
            .sites()
            .iter()
            .filter(|site| site.matches(filter))
            .cloned()
            .collect();

        if sites.is_empty() && format == OutputFormat::Table {
            ctx.output().warning("No sites found");
            return Ok(());
        }

        let formatted = format_sites(&sites, format)?;
        ctx.output().line(&formatted);
        Ok(())
    }
}
