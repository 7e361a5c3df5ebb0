//! The command model: declarations plus handlers.
//!
//! Commands are registered explicitly through this builder. A command
//! declares its positionals and options, and carries the handler closure
//! the runner dispatches to once parsing succeeds.

use crate::error::CommandError;
use conkit_parser::{parse_args, Convention, OptionSpec, ParseError, ParsedArgs, PositionalSpec};
use conkit_terminal::Console;
use std::fmt;

/// Handler signature: parsed arguments in, console out.
pub type Handler =
    Box<dyn Fn(&mut Console, &ParsedArgs) -> Result<(), CommandError> + Send + Sync>;

/// A named command with its argument declarations and handler.
pub struct Command {
    name: String,
    description: String,
    positionals: Vec<PositionalSpec>,
    options: Vec<OptionSpec>,
    handler: Option<Handler>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("positionals", &self.positionals)
            .field("options", &self.options)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl Command {
    /// Creates a command with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            positionals: Vec::new(),
            options: Vec::new(),
            handler: None,
        }
    }

    /// Sets the description shown in help output.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares a positional argument. Order of declaration is binding
    /// order.
    pub fn positional(mut self, spec: PositionalSpec) -> Self {
        self.positionals.push(spec);
        self
    }

    /// Declares an option.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    /// Attaches the handler invoked when this command is dispatched.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Console, &ParsedArgs) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared positionals, in binding order.
    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.positionals
    }

    /// Declared options.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Parses a token stream against this command's declarations.
    pub fn parse(
        &self,
        tokens: &[String],
        convention: &dyn Convention,
    ) -> Result<ParsedArgs, ParseError> {
        parse_args(tokens, &self.options, &self.positionals, convention)
    }

    /// Invokes the handler. Commands without a handler succeed silently.
    pub fn dispatch(
        &self,
        console: &mut Console,
        args: &ParsedArgs,
    ) -> Result<(), CommandError> {
        match &self.handler {
            Some(handler) => handler(console, args),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conkit_parser::{GnuConvention, ValueKind};
    use conkit_terminal::ColorMode;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_and_dispatch() {
        let command = Command::new("greet")
            .positional(PositionalSpec::new("name"))
            .option(OptionSpec::with_value("times", ValueKind::Int).short('t'))
            .handler(|console, args| {
                let name = args.str_of("name").unwrap_or("world");
                let times = args.int_of("times").unwrap_or(1);
                for _ in 0..times {
                    console.write_line(&format!("hello {}", name))?;
                }
                Ok(())
            });

        let parsed = command
            .parse(&tokens(&["rust", "--times", "2"]), &GnuConvention)
            .unwrap();

        let (mut console, buffer) = Console::capture(40, ColorMode::Disabled);
        command.dispatch(&mut console, &parsed).unwrap();
        assert_eq!(buffer.lines(), vec!["hello rust", "hello rust"]);
    }

    #[test]
    fn test_dispatch_without_handler() {
        let command = Command::new("noop");
        let parsed = command.parse(&[], &GnuConvention).unwrap();
        let (mut console, _) = Console::capture(40, ColorMode::Disabled);
        assert!(command.dispatch(&mut console, &parsed).is_ok());
    }

    #[test]
    fn test_handler_error_propagates() {
        let command = Command::new("fail")
            .handler(|_, _| Err(CommandError::with_code("boom", 9)));
        let parsed = command.parse(&[], &GnuConvention).unwrap();
        let (mut console, _) = Console::capture(40, ColorMode::Disabled);
        let err = command.dispatch(&mut console, &parsed).unwrap_err();
        assert_eq!(err.exit_code(), 9);
    }
}
