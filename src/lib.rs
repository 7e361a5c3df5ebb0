//! conkit — a console application framework.
//!
//! conkit does two jobs for command-line tools:
//!
//! 1. **Argument parsing and dispatch.** Commands declare typed options
//!    and positionals through builders; the parser tokenizes, classifies
//!    each token under a convention (GNU, Microsoft standard, or
//!    MS-DOS), binds values, and dispatches to handler closures.
//! 2. **Text layout.** Output flows through an annotation-aware layout
//!    engine: colour markup embedded in plain strings, word wrapping
//!    that keeps annotations intact, and tables whose column widths are
//!    negotiated against the terminal — shrinking columns by wrapping
//!    their cells and stacking the ones that still cannot fit.
//!
//! # Example
//!
//! ```no_run
//! use conkit::prelude::*;
//!
//! let app = ConsoleApp::new("filer")
//!     .version("1.0.0")
//!     .describe("Moves files around.")
//!     .command(
//!         Command::new("copy")
//!             .describe("Copy a file")
//!             .positional(PositionalSpec::new("source").describe("File to copy"))
//!             .option(OptionSpec::flag("verbose").short('v').describe("Narrate the work"))
//!             .handler(|console, args| {
//!                 if args.flag("verbose") {
//!                     console.write_line(&"copying...".dim())?;
//!                 }
//!                 console.write_line(args.str_of("source").unwrap_or_default())?;
//!                 Ok(())
//!             }),
//!     );
//!
//! std::process::exit(app.run_from_env());
//! ```

pub mod app;
pub mod command;
pub mod error;
mod help;

pub use app::ConsoleApp;
pub use command::{Command, Handler};
pub use error::CommandError;

// The member crates, re-exported at the top level so applications need a
// single dependency.
pub use conkit_core::{
    segments, strip_markup, Color, ColorParseError, Colorize, Instruction, Segment, Style,
    TextAttributes,
};
pub use conkit_layout::{ColumnSpec, ColumnWidth, Negotiated, Table, TableOptions};
pub use conkit_parser::{
    tokenize, Convention, GnuConvention, MsDosConvention, MsStdConvention, OptionSpec, ParseError,
    ParsedArgs, PositionalSpec, Value, ValueKind,
};
pub use conkit_terminal::{CaptureBuffer, ColorMode, Console};
pub use conkit_text::{
    pad, truncate_to_width, visible_width, wrap, wrap_with_options, Alignment, WrapOptions,
};

/// The usual imports for building a conkit application.
pub mod prelude {
    pub use crate::{
        Color, ColorMode, Colorize, ColumnSpec, Command, CommandError, Console, ConsoleApp,
        OptionSpec, ParsedArgs, PositionalSpec, Table, Value, ValueKind,
    };
}
