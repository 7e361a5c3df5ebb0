//! The application runner: command lookup, parsing, dispatch, and
//! error reporting.

use crate::command::Command;
use crate::help;
use conkit_core::markup::Colorize;
use conkit_parser::{Convention, GnuConvention};
use conkit_terminal::Console;
use std::fmt;
use std::io;
use tracing::debug;

/// A console application: named commands, a parsing convention, and the
/// plumbing that turns an argument vector into a handler invocation.
///
/// # Example
///
/// ```
/// use conkit::{Command, ConsoleApp};
/// use conkit_parser::PositionalSpec;
/// use conkit_terminal::{ColorMode, Console};
///
/// let app = ConsoleApp::new("greeter")
///     .describe("Says hello.")
///     .command(
///         Command::new("hello")
///             .positional(PositionalSpec::new("name"))
///             .handler(|console, args| {
///                 let name = args.str_of("name").unwrap_or("world");
///                 console.write_line(&format!("hello {}", name))?;
///                 Ok(())
///             }),
///     );
///
/// let (mut out, buffer) = Console::capture(80, ColorMode::Disabled);
/// let (mut err, _) = Console::capture(80, ColorMode::Disabled);
/// let args = vec!["hello".to_string(), "rust".to_string()];
/// assert_eq!(app.run_with(&args, &mut out, &mut err), 0);
/// assert_eq!(buffer.contents(), "hello rust\n");
/// ```
pub struct ConsoleApp {
    name: String,
    version: Option<String>,
    description: String,
    convention: Box<dyn Convention>,
    commands: Vec<Command>,
    single: bool,
}

impl fmt::Debug for ConsoleApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleApp")
            .field("name", &self.name)
            .field("convention", &self.convention.name())
            .field("commands", &self.commands.len())
            .field("single", &self.single)
            .finish()
    }
}

impl ConsoleApp {
    /// Creates a command-driven application (first argument selects the
    /// command). The GNU convention is the default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: String::new(),
            convention: Box::new(GnuConvention),
            commands: Vec::new(),
            single: false,
        }
    }

    /// Creates a single-command application: the whole argument vector
    /// binds to `command`.
    pub fn single(name: impl Into<String>, command: Command) -> Self {
        let mut app = Self::new(name);
        app.commands.push(command);
        app.single = true;
        app
    }

    /// Sets the version shown in the overview.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the application description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Selects the parsing convention.
    pub fn convention<C>(mut self, convention: C) -> Self
    where
        C: Convention + 'static,
    {
        self.convention = Box::new(convention);
        self
    }

    /// Registers a command. Not meaningful on single-command apps.
    pub fn command(mut self, command: Command) -> Self {
        debug_assert!(!self.single, "single-command apps take no extra commands");
        self.commands.push(command);
        self
    }

    /// The application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs against the process argument vector, with stdout/stderr
    /// consoles. Returns the exit code for `std::process::exit`.
    pub fn run_from_env(&self) -> i32 {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.run(&args)
    }

    /// Runs against an explicit argument vector on the standard
    /// consoles.
    pub fn run(&self, args: &[String]) -> i32 {
        let mut out = Console::stdout();
        let mut err = Console::stderr();
        self.run_with(args, &mut out, &mut err)
    }

    /// Runs with explicit consoles. This is the testable entry point.
    pub fn run_with(&self, args: &[String], out: &mut Console, err: &mut Console) -> i32 {
        match self.execute(args, out, err) {
            Ok(code) => code,
            Err(_) => 1,
        }
    }

    fn execute(&self, args: &[String], out: &mut Console, err: &mut Console) -> io::Result<i32> {
        if self.single {
            return self.execute_single(args, out, err);
        }

        let Some(first) = args.first() else {
            self.write_overview(out)?;
            return Ok(0);
        };

        if self.names_match(first, "help") {
            return self.execute_help(args.get(1), out, err);
        }

        match self.find(first) {
            Some(command) => self.execute_command(command, Some(command.name()), &args[1..], out, err),
            None => {
                err.write_line(&format!("unknown command '{}'", first).red())?;
                err.wrap_line(&format!("Run '{} help' to list commands.", self.name))?;
                Ok(1)
            }
        }
    }

    fn execute_single(
        &self,
        args: &[String],
        out: &mut Console,
        err: &mut Console,
    ) -> io::Result<i32> {
        let command = &self.commands[0];

        if args.len() == 1 && self.is_help_token(&args[0]) {
            help::write_command_help(out, &self.name, None, command, self.convention.as_ref())?;
            return Ok(0);
        }

        self.execute_command(command, None, args, out, err)
    }

    fn execute_help(
        &self,
        topic: Option<&String>,
        out: &mut Console,
        err: &mut Console,
    ) -> io::Result<i32> {
        match topic {
            None => {
                self.write_overview(out)?;
                Ok(0)
            }
            Some(name) => match self.find(name) {
                Some(command) => {
                    help::write_command_help(
                        out,
                        &self.name,
                        Some(command.name()),
                        command,
                        self.convention.as_ref(),
                    )?;
                    Ok(0)
                }
                None => {
                    err.write_line(&format!("unknown command '{}'", name).red())?;
                    Ok(1)
                }
            },
        }
    }

    fn execute_command(
        &self,
        command: &Command,
        display_name: Option<&str>,
        args: &[String],
        out: &mut Console,
        err: &mut Console,
    ) -> io::Result<i32> {
        match command.parse(args, self.convention.as_ref()) {
            Ok(parsed) => {
                debug!(command = command.name(), "dispatching");
                match command.dispatch(out, &parsed) {
                    Ok(()) => Ok(0),
                    Err(error) => {
                        err.write_line(&error.message().red())?;
                        Ok(error.exit_code())
                    }
                }
            }
            Err(parse_error) => {
                err.write_line(&parse_error.to_string().red())?;
                err.wrap_line(&help::usage_line(&self.name, display_name, command))?;
                Ok(1)
            }
        }
    }

    fn write_overview(&self, out: &mut Console) -> io::Result<()> {
        let commands: Vec<&Command> = self.commands.iter().collect();
        help::write_overview(
            out,
            &self.name,
            self.version.as_deref(),
            &self.description,
            &commands,
        )
    }

    fn find(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|command| self.names_match(command.name(), name))
    }

    fn names_match(&self, a: &str, b: &str) -> bool {
        if self.convention.case_insensitive() {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }

    /// Recognises the conventional ways of asking a single-command app
    /// for help.
    fn is_help_token(&self, token: &str) -> bool {
        token == self.convention.format_long("help")
            || token == "-h"
            || token == "-?"
            || token == "/?"
    }
}
