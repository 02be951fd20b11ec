//! sitecmd
//!
//! Base layer for CLI commands that run against one or many tenants (sites)
//! of a host application.
//!
//! A command implements [`command::Command`]: it declares its parameters and
//! provides a handler. Registering it in an [`application::Application`]
//! derives its name, description and CLI definition; invoking it binds the
//! parsed input to the parameters and runs the handler once, or once per
//! selected tenant.
//!
//! ```
//! use sitecmd::application::Application;
//! use sitecmd::commands::SiteInfo;
//! use sitecmd::output::BufferedOutput;
//! use sitecmd_host::{SiteRecord, SiteRegistry};
//!
//! let mut app = Application::new("sitecmd");
//! app.register(SiteInfo).unwrap();
//!
//! let mut host = SiteRegistry::new(vec![
//!     SiteRecord::new(1, "example.com/"),
//!     SiteRecord::new(2, "example.com/shop/"),
//! ]);
//! let mut output = BufferedOutput::new();
//! app.run_from(["sitecmd", "site:info", "url", "--all-sites"], &mut host, &mut output)
//!     .unwrap();
//!
//! assert_eq!(output.contents(), "example.com/\nexample.com/shop/\n");
//! ```

pub mod application;

// Binary-only CLI layer
#[doc(hidden)]
pub mod cli;

pub mod command;
pub mod commands;

/// Configuration types for the CLI tool.
pub mod config;

pub mod execution;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

pub mod input;
pub mod output;

pub use application::Application;
pub use command::{Command, CommandContext, ExecutionScope, Host, TenantScope};
pub use output::{BufferedOutput, ConsoleOutput, Output, Printer, Style};
