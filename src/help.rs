//! Help text generation.
//!
//! Help output is produced with the framework's own machinery: the
//! command and option listings are tables negotiated against the console
//! width, and every description word-wraps. Option labels are rendered
//! in the syntax of the active convention, so a MS-DOS application
//! documents `/count` while a GNU one documents `--count`.

use crate::command::Command;
use conkit_core::markup::Colorize;
use conkit_layout::{ColumnSpec, Table};
use conkit_parser::{Convention, OptionSpec, PositionalSpec, ValueKind};
use conkit_terminal::Console;
use std::io;

/// Writes the application overview: title, usage, and the command list.
pub(crate) fn write_overview(
    console: &mut Console,
    name: &str,
    version: Option<&str>,
    description: &str,
    commands: &[&Command],
) -> io::Result<()> {
    let title = match version {
        Some(version) => format!("{} {}", name, version),
        None => name.to_string(),
    };
    console.write_line(&title.bold())?;

    if !description.is_empty() {
        console.wrap_line(description)?;
    }

    console.write_line("")?;
    console.wrap_line(&format!("usage: {} <command> [options]", name))?;
    console.write_line("")?;
    console.write_line(&"Commands:".bold())?;

    let mut table = Table::new()
        .column(ColumnSpec::new("command"))
        .column(ColumnSpec::new("description"))
        .without_headings()
        .indent(2);
    for command in commands {
        table.push_row([command.name(), command.description()]);
    }
    table.push_row(["help", "Show help for the application or a command"]);
    console.print_table(&table)?;

    console.write_line("")?;
    console.wrap_line(&format!("Run '{} help <command>' for details.", name))?;
    Ok(())
}

/// Writes detailed help for one command: usage, description, argument
/// and option tables.
pub(crate) fn write_command_help(
    console: &mut Console,
    program: &str,
    command_name: Option<&str>,
    command: &Command,
    convention: &dyn Convention,
) -> io::Result<()> {
    console.wrap_line(&usage_line(program, command_name, command))?;

    if !command.description().is_empty() {
        console.write_line("")?;
        console.wrap_line(command.description())?;
    }

    if !command.positionals().is_empty() {
        console.write_line("")?;
        console.write_line(&"Arguments:".bold())?;
        let mut table = Table::new()
            .column(ColumnSpec::new("argument"))
            .column(ColumnSpec::new("description"))
            .without_headings()
            .indent(2);
        for positional in command.positionals() {
            table.push_row([
                format!("<{}>", positional.name),
                positional_description(positional),
            ]);
        }
        console.print_table(&table)?;
    }

    if !command.options().is_empty() {
        console.write_line("")?;
        console.write_line(&"Options:".bold())?;
        let mut table = Table::new()
            .column(ColumnSpec::new("option"))
            .column(ColumnSpec::new("description"))
            .without_headings()
            .indent(2);
        for option in command.options() {
            table.push_row([option_label(convention, option), option_description(option)]);
        }
        console.print_table(&table)?;
    }
    Ok(())
}

/// Builds the one-line usage synopsis for a command.
pub(crate) fn usage_line(program: &str, command_name: Option<&str>, command: &Command) -> String {
    let mut usage = format!("usage: {}", program);
    if let Some(name) = command_name {
        usage.push(' ');
        usage.push_str(name);
    }
    if !command.options().is_empty() {
        usage.push_str(" [options]");
    }
    for positional in command.positionals() {
        usage.push(' ');
        usage.push_str(&positional_token(positional));
    }
    usage
}

fn positional_token(positional: &PositionalSpec) -> String {
    if positional.greedy {
        format!("[<{}>...]", positional.name)
    } else if positional.default.is_some() {
        format!("[<{}>]", positional.name)
    } else {
        format!("<{}>", positional.name)
    }
}

/// Renders an option's label in the active convention's syntax, e.g.
/// `-n, --count <integer>` or `/count <integer>`.
pub(crate) fn option_label(convention: &dyn Convention, option: &OptionSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(short) = option.short {
        if let Some(formatted) = convention.format_short(short) {
            parts.push(formatted);
        }
    }
    parts.push(convention.format_long(&option.name));

    let mut label = parts.join(", ");
    if let Some(kind) = option.value {
        label.push_str(&format!(" <{}>", kind.name()));
    }
    label
}

fn positional_description(positional: &PositionalSpec) -> String {
    let mut notes: Vec<String> = Vec::new();
    if positional.kind != ValueKind::Str {
        notes.push(positional.kind.name().to_string());
    }
    if let Some(default) = &positional.default {
        notes.push(format!("default: {}", default));
    }
    if positional.greedy {
        notes.push("zero or more".to_string());
    }
    annotate(&positional.description, &notes)
}

fn option_description(option: &OptionSpec) -> String {
    let mut notes: Vec<String> = Vec::new();
    if option.required {
        notes.push("required".to_string());
    }
    if option.repeatable {
        notes.push("repeatable".to_string());
    }
    annotate(&option.description, &notes)
}

fn annotate(description: &str, notes: &[String]) -> String {
    if notes.is_empty() {
        return description.to_string();
    }
    let joined = notes.join(", ");
    if description.is_empty() {
        format!("({})", joined)
    } else {
        format!("{} ({})", description, joined)
    }
}
