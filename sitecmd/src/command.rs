//! Command contract
//!
//! A command is a type implementing [`Command`]: it declares its handler
//! parameters and provides the handler itself. Everything else (name,
//! description, CLI definition, binding, tenant iteration) is derived by
//! the framework.
//!
//! ```
//! use sitecmd::command::{Command, CommandContext, Host};
//! use sitecmd::output::Printer;
//! use sitecmd_core::{ParameterSpec, PrimitiveType, ResolvedArguments};
//!
//! sitecmd_core::command_docs! {
//!     /// Sync all users.
//!     pub struct SyncUsers;
//! }
//!
//! impl<H: Host> Command<H> for SyncUsers {
//!     fn docs(&self) -> &'static str {
//!         Self::DOCS
//!     }
//!
//!     fn parameters(&self) -> Vec<ParameterSpec> {
//!         vec![ParameterSpec::option("limit")
//!             .typed(PrimitiveType::Int)
//!             .default_value(10)]
//!     }
//!
//!     fn handle(
//!         &mut self,
//!         ctx: &mut CommandContext<'_, H>,
//!         args: ResolvedArguments,
//!     ) -> anyhow::Result<()> {
//!         let limit = args.int("limit").unwrap_or_default();
//!         ctx.output().info(&format!("Syncing up to {} users", limit));
//!         Ok(())
//!     }
//! }
//! ```

use clap::{Arg, ArgAction};
use sitecmd_core::tenants::{OPTION_ALL_SITES, OPTION_BLOGS, OPTION_SKIP_BLOGS};
use sitecmd_core::{
    CliInput, CommandDescriptor, ParamKind, ParameterSpec, PrimitiveType, ResolvedArguments,
    SiteCmdError, TenantContext, TenantDirectory, TenantId, TypeInfo, Value, DEFAULT_TENANTS,
};
use tracing::debug;

use crate::output::Output;

/// Host application a command runs inside
pub trait Host: TenantDirectory + TenantContext {}

impl<T: TenantDirectory + TenantContext> Host for T {}

/// Tenant options of a multi-tenant command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenantScope {
    all_sites: bool,
    skip_main_site: bool,
}

impl TenantScope {
    /// Run against `--blogs` only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `--all-sites` and `--skip-blogs`
    pub fn allow_all_sites(mut self) -> Self {
        self.all_sites = true;
        self
    }

    /// Never run against the main site
    pub fn skip_main_site(mut self) -> Self {
        self.skip_main_site = true;
        self
    }

    pub fn allows_all_sites(&self) -> bool {
        self.all_sites
    }

    pub fn skips_main_site(&self) -> bool {
        self.skip_main_site
    }
}

/// Whether a command runs once or once per tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionScope {
    #[default]
    Single,
    Tenants(TenantScope),
}

/// What a handler sees while it runs
pub struct CommandContext<'a, H: ?Sized> {
    host: &'a H,
    tenant: Option<TenantId>,
    input: &'a dyn CliInput,
    output: &'a mut dyn Output,
}

impl<'a, H: ?Sized> CommandContext<'a, H> {
    pub fn new(
        host: &'a H,
        tenant: Option<TenantId>,
        input: &'a dyn CliInput,
        output: &'a mut dyn Output,
    ) -> Self {
        Self {
            host,
            tenant,
            input,
            output,
        }
    }

    /// Host application, already switched to [`Self::tenant`]
    pub fn host(&self) -> &H {
        self.host
    }

    /// Tenant this invocation runs against
    pub fn tenant(&self) -> Option<TenantId> {
        self.tenant
    }

    /// Raw CLI input, for values outside the declared parameters
    pub fn input(&self) -> &dyn CliInput {
        self.input
    }

    pub fn output(&mut self) -> &mut dyn Output {
        &mut *self.output
    }
}

/// A CLI command with a single handler
pub trait Command<H: ?Sized> {
    /// Naming and description sources
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::default()
    }

    /// Documentation text used to infer the description
    fn docs(&self) -> &'static str {
        ""
    }

    /// Short name and documentation of the command type
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>(self.docs())
    }

    /// Declared handler parameters, in handler order
    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }

    fn scope(&self) -> ExecutionScope {
        ExecutionScope::Single
    }

    /// Add definitions beyond those derived from the parameters
    fn setup(&self, command: clap::Command) -> clap::Command {
        command
    }

    /// Business logic; called once, or once per tenant
    fn handle(
        &mut self,
        ctx: &mut CommandContext<'_, H>,
        args: ResolvedArguments,
    ) -> anyhow::Result<()>;
}

/// Qualified name of a command, if any source yields one
pub fn command_name<H: ?Sized>(command: &dyn Command<H>) -> Option<String> {
    command.descriptor().resolve_name(&command.type_info())
}

/// Build the clap definition of a command
///
/// Fails when the command has no name.
pub fn configure<H: ?Sized>(command: &dyn Command<H>) -> sitecmd_core::Result<clap::Command> {
    let info = command.type_info();
    let descriptor = command.descriptor();

    let name = descriptor
        .resolve_name(&info)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SiteCmdError::UnnamedCommand(info.type_name.to_string()))?;

    let mut definition = clap::Command::new(name);

    let description = descriptor.resolve_description(&info);
    if !description.is_empty() {
        definition = definition.about(description);
    }

    let scope = command.scope();
    let reserved = match scope {
        ExecutionScope::Tenants(scope) => tenant_option_names(scope),
        ExecutionScope::Single => Vec::new(),
    };

    for parameter in command.parameters() {
        let name = parameter.cli_name();
        // Tenant options and earlier parameters already define the token;
        // the binder reads the value from that definition.
        let defined = reserved.contains(&name.as_str())
            || definition.get_arguments().any(|arg| arg.get_id() == name.as_str());
        if defined {
            debug!(parameter = %parameter.name, "definition already present");
            continue;
        }

        if let Some(arg) = parameter_arg(&parameter) {
            definition = definition.arg(arg);
        }
    }

    if let ExecutionScope::Tenants(scope) = scope {
        definition = add_tenant_options(definition, scope);
    }

    Ok(command.setup(definition))
}

/// CLI definition derived from a parameter
fn parameter_arg(parameter: &ParameterSpec) -> Option<Arg> {
    let name = parameter.cli_name();

    let mut arg = match parameter.kind {
        ParamKind::None => return None,
        ParamKind::Argument => Arg::new(name),
        ParamKind::Option => Arg::new(name.clone()).long(name),
    };

    if let Some(help) = &parameter.help {
        arg = arg.help(help.clone());
    }

    let is_flag = parameter.kind == ParamKind::Option
        && parameter.declared_type == Some(PrimitiveType::Bool)
        && parameter
            .default
            .as_ref()
            .map_or(true, |default| !default.to_bool());

    if is_flag {
        return Some(arg.action(ArgAction::SetTrue));
    }

    match &parameter.default {
        Some(Value::List(items)) => {
            arg = arg
                .action(ArgAction::Append)
                .default_values(items.iter().map(|item| item.to_string()));
        }
        Some(Value::Null) | None => {}
        Some(scalar) => {
            arg = arg.default_value(scalar.to_string());
        }
    }

    Some(arg)
}

/// Option names `add_tenant_options` defines for a scope
fn tenant_option_names(scope: TenantScope) -> Vec<&'static str> {
    if scope.allows_all_sites() {
        vec![OPTION_BLOGS, OPTION_ALL_SITES, OPTION_SKIP_BLOGS]
    } else {
        vec![OPTION_BLOGS]
    }
}

fn add_tenant_options(definition: clap::Command, scope: TenantScope) -> clap::Command {
    let mut definition = definition.arg(
        Arg::new(OPTION_BLOGS)
            .short('b')
            .long(OPTION_BLOGS)
            .num_args(0..=1)
            .default_value(DEFAULT_TENANTS)
            .help("The IDs of the blogs (comma-separated)"),
    );

    if scope.allows_all_sites() {
        definition = definition
            .arg(
                Arg::new(OPTION_ALL_SITES)
                    .long(OPTION_ALL_SITES)
                    .action(ArgAction::SetTrue)
                    .help("Run the command on all sites"),
            )
            .arg(
                Arg::new(OPTION_SKIP_BLOGS)
                    .long(OPTION_SKIP_BLOGS)
                    .num_args(0..=1)
                    .help("The IDs of the blog(s) to skip (comma-separated)"),
            );
    }

    definition
}
