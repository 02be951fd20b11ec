use anyhow::{anyhow, bail};
use sitecmd_core::{ParameterSpec, ResolvedArguments};
use sitecmd_host::SiteRegistry;

use crate::command::{Command, CommandContext, ExecutionScope, TenantScope};
use crate::format::site_status;
use crate::output::Printer;

sitecmd_core::command_docs! {
    /// Show details of each selected site.
    ///
    /// Prints a summary line, or a single field (id, url, name, status).
    pub struct SiteInfo;
}

impl Command<SiteRegistry> for SiteInfo {
    fn docs(&self) -> &'static str {
        Self::DOCS
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::argument("field").help("Only print this field")]
    }

    fn scope(&self) -> ExecutionScope {
        ExecutionScope::Tenants(TenantScope::new().allow_all_sites())
    }

    fn handle(
        &mut self,
        ctx: &mut CommandContext<'_, SiteRegistry>,
        args: ResolvedArguments,
    ) -> anyhow::Result<()> {
        let site = ctx
            .host()
            .current_site()
            .cloned()
            .ok_or_else(|| anyhow!("No current site"))?;

        let line = match args.string("field").filter(|field| !field.is_empty()) {
            None => format!("[{}] {} ({})", site.id, site.url, site_status(&site)),
            Some("id") => site.id.to_string(),
            Some("url") => site.url.clone(),
            Some("name") => site.name.clone().unwrap_or_default(),
            Some("status") => site_status(&site).to_string(),
            Some(other) => bail!("Unknown field '{}' for site {}", other, site.id),
        };

        ctx.output().line(&line);
        Ok(())
    }
}
