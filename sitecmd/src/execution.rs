//! Execution loop
//!
//! Single-tenant commands bind their parameters and run once; a handler
//! error fails the invocation. Multi-tenant commands run once per resolved
//! tenant: the host is switched to the tenant, parameters are bound fresh,
//! and the handler runs. A failing tenant is reported and the loop moves on,
//! so the invocation still succeeds.
//!
//! Tenants are processed strictly one after another since the host's
//! current tenant is shared state.

use serde::Serialize;
use sitecmd_core::{
    bind, CliInput, ExecutionOutcome, ExitStatus, TenantId, TenantResolver,
};
use tracing::{debug, info, warn};

use crate::command::{Command, CommandContext, ExecutionScope, Host, TenantScope};
use crate::output::{Output, Printer};

/// Per-tenant outcomes of one multi-tenant invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    outcomes: Vec<(TenantId, ExecutionOutcome)>,
}

impl BatchReport {
    fn record(&mut self, tenant: TenantId, outcome: ExecutionOutcome) {
        self.outcomes.push((tenant, outcome));
    }

    pub fn outcomes(&self) -> &[(TenantId, ExecutionOutcome)] {
        &self.outcomes
    }

    /// Tenants the handler ran against, in order
    pub fn tenants(&self) -> Vec<TenantId> {
        self.outcomes.iter().map(|(tenant, _)| *tenant).collect()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .count()
    }

    pub fn successes(&self) -> usize {
        self.outcomes.len() - self.failures()
    }
}

/// Run a command for one invocation and return the process result
pub fn execute<H: Host>(
    command: &mut dyn Command<H>,
    input: &dyn CliInput,
    host: &mut H,
    output: &mut dyn Output,
) -> ExitStatus {
    match command.scope() {
        ExecutionScope::Single => run_single(command, input, host, output),
        ExecutionScope::Tenants(scope) => {
            match run_tenants(command, scope, input, host, output) {
                Ok(report) => {
                    info!(
                        succeeded = report.successes(),
                        failed = report.failures(),
                        "batch finished"
                    );
                    ExitStatus::Success
                }
                Err(e) => {
                    output.error(&e.to_string());
                    ExitStatus::Failure
                }
            }
        }
    }
}

/// Bind once and invoke once against the host's current tenant
pub fn run_single<H: Host>(
    command: &mut dyn Command<H>,
    input: &dyn CliInput,
    host: &mut H,
    output: &mut dyn Output,
) -> ExitStatus {
    let args = bind(&command.parameters(), input);
    let tenant = host.current();

    let result = {
        let mut ctx = CommandContext::new(&*host, tenant, input, &mut *output);
        command.handle(&mut ctx, args)
    };

    match result {
        Ok(()) => ExitStatus::Success,
        Err(e) => {
            warn!("Command failed: {:#}", e);
            output.error(&format!("{:#}", e));
            ExitStatus::Failure
        }
    }
}

/// Resolve the tenants and invoke the handler once for each
///
/// Only tenant resolution can fail; handler and context-switch errors are
/// reported and recorded in the returned report.
pub fn run_tenants<H: Host>(
    command: &mut dyn Command<H>,
    scope: TenantScope,
    input: &dyn CliInput,
    host: &mut H,
    output: &mut dyn Output,
) -> sitecmd_core::Result<BatchReport> {
    let mut resolver = TenantResolver::new();
    if scope.skips_main_site() {
        resolver.skip_main_site();
    }

    let tenants = resolver.resolve(input, &*host)?;
    let mut report = BatchReport::default();

    for tenant in tenants {
        let outcome = run_for_tenant(command, tenant, input, host, output);
        if let ExecutionOutcome::Failure(message) = &outcome {
            output.error(message);
        }
        report.record(tenant, outcome);
    }

    Ok(report)
}

fn run_for_tenant<H: Host>(
    command: &mut dyn Command<H>,
    tenant: TenantId,
    input: &dyn CliInput,
    host: &mut H,
    output: &mut dyn Output,
) -> ExecutionOutcome {
    if let Err(e) = host.switch_to(tenant) {
        warn!(%tenant, "Cannot switch tenant: {}", e);
        return ExecutionOutcome::Failure(e.to_string());
    }

    debug!(%tenant, "running handler");
    let args = bind(&command.parameters(), input);
    let mut ctx = CommandContext::new(&*host, Some(tenant), input, &mut *output);

    match command.handle(&mut ctx, args) {
        Ok(()) => ExecutionOutcome::Success,
        Err(e) => {
            warn!(%tenant, "Command failed: {:#}", e);
            ExecutionOutcome::Failure(format!("{:#}", e))
        }
    }
}
