//! Command-line parsing for conkit.
//!
//! The pipeline has three stages:
//!
//! 1. [`tokenize`] splits a raw command line into tokens (skipped when
//!    arguments arrive pre-split from the OS);
//! 2. a [`Convention`] classifies each token as option reference,
//!    positional, or terminator — GNU, Microsoft-standard, and MS-DOS
//!    syntaxes ship in the box;
//! 3. binding resolves option references against the declared
//!    [`OptionSpec`]s, converts parameters to typed [`Value`]s, applies
//!    defaults, and reports violations as [`ParseError`]s.

pub mod convention;
pub mod error;
pub mod parse;
pub mod spec;
pub mod token;

pub use convention::{Convention, GnuConvention, MsDosConvention, MsStdConvention, OptionToken, TokenClass};
pub use error::ParseError;
pub use parse::{parse_args, ParsedArgs};
pub use spec::{OptionSpec, PositionalSpec, Value, ValueKind};
pub use token::tokenize;
