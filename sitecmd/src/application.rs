//! Command registry and dispatch
//!
//! Commands are configured once, when registered: their qualified name,
//! description and CLI definition are computed then. Each invocation is
//! dispatched to the matching command's execution loop.

use clap::ArgMatches;
use sitecmd_core::{ExitStatus, SiteCmdError};
use std::ffi::OsString;
use tracing::debug;

use crate::command::{configure, Command, Host};
use crate::execution::execute;
use crate::input::ClapInput;
use crate::output::Output;

struct Registered<H> {
    definition: clap::Command,
    command: Box<dyn Command<H>>,
}

/// A set of commands sharing one host application
pub struct Application<H> {
    name: String,
    about: Option<String>,
    commands: Vec<Registered<H>>,
}

impl<H: Host> Application<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            commands: Vec::new(),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Configure and add a command
    ///
    /// Fails for nameless commands and for names already taken.
    pub fn register<C>(&mut self, command: C) -> sitecmd_core::Result<&mut Self>
    where
        C: Command<H> + 'static,
    {
        let definition = configure(&command)?;
        let name = definition.get_name().to_string();

        if self.definition(&name).is_some() {
            return Err(SiteCmdError::DuplicateCommand(name));
        }

        debug!("Registered command {}", name);
        self.commands.push(Registered {
            definition,
            command: Box::new(command),
        });

        Ok(self)
    }

    /// Qualified names of the registered commands, in registration order
    pub fn command_names(&self) -> Vec<&str> {
        self.commands
            .iter()
            .map(|registered| registered.definition.get_name())
            .collect()
    }

    /// CLI definition of a registered command
    pub fn definition(&self, name: &str) -> Option<&clap::Command> {
        self.commands
            .iter()
            .map(|registered| &registered.definition)
            .find(|definition| definition.get_name() == name)
    }

    /// Root CLI definition with every registered command as a subcommand
    pub fn cli(&self) -> clap::Command {
        let mut root = clap::Command::new(self.name.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);

        if let Some(about) = &self.about {
            root = root.about(about.clone());
        }

        root.subcommands(
            self.commands
                .iter()
                .map(|registered| registered.definition.clone()),
        )
    }

    /// Run the command selected in `matches`
    ///
    /// Returns `None` when the selected subcommand is not a registered
    /// command.
    pub fn dispatch(
        &mut self,
        matches: &ArgMatches,
        host: &mut H,
        output: &mut dyn Output,
    ) -> Option<ExitStatus> {
        let (name, sub_matches) = matches.subcommand()?;
        let registered = self
            .commands
            .iter_mut()
            .find(|registered| registered.definition.get_name() == name)?;

        debug!("Dispatching {}", name);
        let input = ClapInput::new(&registered.definition, sub_matches.clone());

        Some(execute(
            registered.command.as_mut(),
            &input,
            host,
            output,
        ))
    }

    /// Parse `args` and run the selected command
    pub fn run_from<I, T>(
        &mut self,
        args: I,
        host: &mut H,
        output: &mut dyn Output,
    ) -> Result<ExitStatus, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.cli().try_get_matches_from(args)?;
        Ok(self
            .dispatch(&matches, host, output)
            .unwrap_or(ExitStatus::Failure))
    }
}
