//! Parse pipeline: convention-driven token classification, option
//! resolution with lookahead, and typed binding.

use crate::convention::{Convention, OptionToken, TokenClass};
use crate::error::ParseError;
use crate::spec::{OptionSpec, PositionalSpec, Value};
use std::collections::HashMap;
use tracing::debug;

/// The bound result of a successful parse: typed values keyed by option
/// and positional names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: HashMap<String, Value>,
}

impl ParsedArgs {
    /// Raw typed value, if bound.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// `true` if the name was bound (flags bind even when absent).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// String value by name.
    pub fn str_of(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Integer value by name.
    pub fn int_of(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Float value by name (integers widen).
    pub fn float_of(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Boolean value by name.
    pub fn bool_of(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Flag state: `false` when absent, the occurrence count coerced to
    /// a truth value for repeatable flags.
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Int(n)) => *n > 0,
            Some(_) => true,
            None => false,
        }
    }

    /// List value by name (repeated options, greedy positionals).
    pub fn list_of(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// String items of a list value; empty when absent.
    pub fn strings_of(&self, name: &str) -> Vec<&str> {
        self.list_of(name)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }
}

/// Parses and binds a token stream against the declared options and
/// positionals, using the given convention.
pub fn parse_args(
    tokens: &[String],
    options: &[OptionSpec],
    positionals: &[PositionalSpec],
    convention: &dyn Convention,
) -> Result<ParsedArgs, ParseError> {
    let mut occurrences: Vec<Vec<(String, Option<String>)>> = vec![Vec::new(); options.len()];
    let mut raw_positionals: Vec<String> = Vec::new();
    let mut options_done = false;

    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];
        index += 1;

        if options_done {
            raw_positionals.push(token.clone());
            continue;
        }

        match convention.classify(token, options) {
            TokenClass::Terminator => options_done = true,
            TokenClass::Positional(value) => raw_positionals.push(value),
            TokenClass::Options(option_tokens) => {
                for opt in option_tokens {
                    index = record_occurrence(
                        &opt,
                        tokens,
                        index,
                        options,
                        convention,
                        &mut occurrences,
                    )?;
                }
            }
        }
    }

    let mut parsed = ParsedArgs::default();
    bind_options(options, &occurrences, convention, &mut parsed)?;
    bind_positionals(positionals, raw_positionals, &mut parsed)?;

    debug!(convention = convention.name(), values = ?parsed.values, "command line bound");
    Ok(parsed)
}

/// Resolves one option token, consuming a lookahead value token when the
/// option requires a parameter that was not attached inline.
fn record_occurrence(
    opt: &OptionToken,
    tokens: &[String],
    mut index: usize,
    options: &[OptionSpec],
    convention: &dyn Convention,
    occurrences: &mut [Vec<(String, Option<String>)>],
) -> Result<usize, ParseError> {
    let spec_index = resolve(options, opt, convention.case_insensitive()).ok_or_else(|| {
        ParseError::UnknownOption {
            option: opt.display.clone(),
        }
    })?;
    let spec = &options[spec_index];

    match spec.value {
        None => {
            if opt.inline_value.is_some() {
                return Err(ParseError::UnexpectedOptionValue {
                    option: opt.display.clone(),
                });
            }
            occurrences[spec_index].push((opt.display.clone(), None));
        }
        Some(kind) => {
            let raw = match &opt.inline_value {
                Some(value) => value.clone(),
                None => {
                    let next = tokens.get(index).map(|t| convention.classify(t, options));
                    match next {
                        Some(TokenClass::Positional(value)) => {
                            index += 1;
                            value
                        }
                        _ => {
                            return Err(ParseError::MissingOptionValue {
                                option: opt.display.clone(),
                                expected: kind.name(),
                            })
                        }
                    }
                }
            };
            occurrences[spec_index].push((opt.display.clone(), Some(raw)));
        }
    }
    Ok(index)
}

/// Finds the declared option an option token refers to. Single-character
/// names try short aliases first, then long names; first declaration
/// wins on ambiguity.
fn resolve(options: &[OptionSpec], opt: &OptionToken, case_insensitive: bool) -> Option<usize> {
    let mut chars = opt.name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(found) = options
            .iter()
            .position(|spec| spec.matches_short(c, case_insensitive))
        {
            return Some(found);
        }
    }
    options
        .iter()
        .position(|spec| spec.matches_long(&opt.name, case_insensitive))
}

fn bind_options(
    options: &[OptionSpec],
    occurrences: &[Vec<(String, Option<String>)>],
    convention: &dyn Convention,
    parsed: &mut ParsedArgs,
) -> Result<(), ParseError> {
    for (spec, occs) in options.iter().zip(occurrences) {
        if occs.is_empty() {
            if spec.required {
                return Err(ParseError::MissingOption {
                    option: convention.format_long(&spec.name),
                });
            }
            if spec.value.is_none() {
                parsed.insert(&spec.name, Value::Bool(false));
            }
            continue;
        }

        if occs.len() > 1 && !spec.repeatable {
            return Err(ParseError::DuplicateOption {
                option: occs[1].0.clone(),
            });
        }

        match spec.value {
            None => {
                // Repeatable flags bind their occurrence count.
                if spec.repeatable {
                    parsed.insert(&spec.name, Value::Int(occs.len() as i64));
                } else {
                    parsed.insert(&spec.name, Value::Bool(true));
                }
            }
            Some(kind) => {
                let mut converted = Vec::with_capacity(occs.len());
                for (display, raw) in occs {
                    let raw = raw.as_deref().unwrap_or_default();
                    let value =
                        kind.convert(raw)
                            .ok_or_else(|| ParseError::InvalidOptionValue {
                                option: display.clone(),
                                value: raw.to_string(),
                                expected: kind.name(),
                            })?;
                    converted.push(value);
                }
                if spec.repeatable {
                    parsed.insert(&spec.name, Value::List(converted));
                } else if let Some(value) = converted.pop() {
                    parsed.insert(&spec.name, value);
                }
            }
        }
    }
    Ok(())
}

fn bind_positionals(
    positionals: &[PositionalSpec],
    raw: Vec<String>,
    parsed: &mut ParsedArgs,
) -> Result<(), ParseError> {
    let mut queue = raw.into_iter();

    for spec in positionals {
        if spec.greedy {
            let mut items = Vec::new();
            for value in queue.by_ref() {
                items.push(convert_positional(spec, &value)?);
            }
            parsed.insert(&spec.name, Value::List(items));
            continue;
        }

        match queue.next() {
            Some(value) => {
                let converted = convert_positional(spec, &value)?;
                parsed.insert(&spec.name, converted);
            }
            None => match &spec.default {
                Some(default) => {
                    let converted = convert_positional(spec, default)?;
                    parsed.insert(&spec.name, converted);
                }
                None => {
                    return Err(ParseError::MissingArgument {
                        argument: spec.name.clone(),
                    })
                }
            },
        }
    }

    if let Some(surplus) = queue.next() {
        return Err(ParseError::UnexpectedArgument { value: surplus });
    }
    Ok(())
}

fn convert_positional(spec: &PositionalSpec, raw: &str) -> Result<Value, ParseError> {
    spec.kind
        .convert(raw)
        .ok_or_else(|| ParseError::InvalidArgument {
            argument: spec.name.clone(),
            value: raw.to_string(),
            expected: spec.kind.name(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::{GnuConvention, MsDosConvention, MsStdConvention};
    use crate::spec::ValueKind;
    use pretty_assertions::assert_eq;

    fn options() -> Vec<OptionSpec> {
        vec![
            OptionSpec::flag("verbose").short('v').repeatable(),
            OptionSpec::flag("all").short('a'),
            OptionSpec::with_value("count", ValueKind::Int).short('n'),
            OptionSpec::with_value("tag", ValueKind::Str).short('t').repeatable(),
        ]
    }

    fn positionals() -> Vec<PositionalSpec> {
        vec![
            PositionalSpec::new("source"),
            PositionalSpec::new("dest").default_value("out"),
        ]
    }

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse_gnu(args: &[&str]) -> Result<ParsedArgs, ParseError> {
        parse_args(&tokens(args), &options(), &positionals(), &GnuConvention)
    }

    #[test]
    fn test_gnu_happy_path() {
        let parsed = parse_gnu(&["--count=3", "-v", "input.txt"]).unwrap();
        assert_eq!(parsed.int_of("count"), Some(3));
        assert!(parsed.flag("verbose"));
        assert!(!parsed.flag("all"));
        assert_eq!(parsed.str_of("source"), Some("input.txt"));
        assert_eq!(parsed.str_of("dest"), Some("out"));
    }

    #[test]
    fn test_gnu_separate_option_value() {
        let parsed = parse_gnu(&["--count", "7", "src"]).unwrap();
        assert_eq!(parsed.int_of("count"), Some(7));
    }

    #[test]
    fn test_gnu_attached_short_value() {
        let parsed = parse_gnu(&["-n9", "src"]).unwrap();
        assert_eq!(parsed.int_of("count"), Some(9));
    }

    #[test]
    fn test_gnu_bundle() {
        let parsed = parse_gnu(&["-va", "src"]).unwrap();
        assert!(parsed.flag("verbose"));
        assert!(parsed.flag("all"));
    }

    #[test]
    fn test_repeatable_flag_counts() {
        let parsed = parse_gnu(&["-v", "-v", "-v", "src"]).unwrap();
        assert_eq!(parsed.int_of("verbose"), Some(3));
        assert!(parsed.flag("verbose"));
    }

    #[test]
    fn test_repeatable_value_option_collects() {
        let parsed = parse_gnu(&["-t", "one", "--tag=two", "src"]).unwrap();
        assert_eq!(parsed.strings_of("tag"), vec!["one", "two"]);
    }

    #[test]
    fn test_terminator_forces_positionals() {
        let parsed = parse_gnu(&["--", "--count", "-v"]).unwrap();
        assert_eq!(parsed.str_of("source"), Some("--count"));
        assert_eq!(parsed.str_of("dest"), Some("-v"));
        assert!(!parsed.flag("verbose"));
    }

    #[test]
    fn test_unknown_option() {
        let err = parse_gnu(&["--bogus", "src"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                option: "--bogus".to_string()
            }
        );
    }

    #[test]
    fn test_missing_option_value() {
        let err = parse_gnu(&["src", "--count"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingOptionValue {
                option: "--count".to_string(),
                expected: "integer"
            }
        );

        // A following option token is not silently eaten as the value.
        let err = parse_gnu(&["--count", "--all", "src"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingOptionValue { .. }));
    }

    #[test]
    fn test_negative_value_for_option() {
        let parsed = parse_gnu(&["--count", "-4", "src"]).unwrap();
        assert_eq!(parsed.int_of("count"), Some(-4));
    }

    #[test]
    fn test_invalid_option_value() {
        let err = parse_gnu(&["--count", "many", "src"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidOptionValue {
                option: "--count".to_string(),
                value: "many".to_string(),
                expected: "integer"
            }
        );
    }

    #[test]
    fn test_flag_with_value_rejected() {
        let err = parse_gnu(&["--all=yes", "src"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedOptionValue {
                option: "--all".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_option() {
        let err = parse_gnu(&["--count=1", "--count=2", "src"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateOption {
                option: "--count".to_string()
            }
        );
    }

    #[test]
    fn test_missing_and_surplus_positionals() {
        let err = parse_gnu(&[]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingArgument {
                argument: "source".to_string()
            }
        );

        let err = parse_gnu(&["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedArgument {
                value: "c".to_string()
            }
        );
    }

    #[test]
    fn test_required_option() {
        let options = vec![OptionSpec::with_value("mode", ValueKind::Str).required()];
        let err = parse_args(&tokens(&[]), &options, &[], &GnuConvention).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingOption {
                option: "--mode".to_string()
            }
        );
    }

    #[test]
    fn test_greedy_positional() {
        let positionals = vec![
            PositionalSpec::new("command"),
            PositionalSpec::new("files").greedy(),
        ];
        let parsed = parse_args(
            &tokens(&["run", "a.txt", "b.txt"]),
            &options(),
            &positionals,
            &GnuConvention,
        )
        .unwrap();
        assert_eq!(parsed.str_of("command"), Some("run"));
        assert_eq!(parsed.strings_of("files"), vec!["a.txt", "b.txt"]);

        let parsed = parse_args(&tokens(&["run"]), &options(), &positionals, &GnuConvention).unwrap();
        assert_eq!(parsed.strings_of("files"), Vec::<&str>::new());
    }

    #[test]
    fn test_typed_positional() {
        let positionals = vec![PositionalSpec::new("port").kind(ValueKind::Int)];
        let parsed =
            parse_args(&tokens(&["8080"]), &[], &positionals, &GnuConvention).unwrap();
        assert_eq!(parsed.int_of("port"), Some(8080));

        let err = parse_args(&tokens(&["http"]), &[], &positionals, &GnuConvention).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidArgument {
                argument: "port".to_string(),
                value: "http".to_string(),
                expected: "integer"
            }
        );
    }

    #[test]
    fn test_msstd_convention() {
        let parsed = parse_args(
            &tokens(&["-Count:5", "-ALL", "src"]),
            &options(),
            &positionals(),
            &MsStdConvention,
        )
        .unwrap();
        assert_eq!(parsed.int_of("count"), Some(5));
        assert!(parsed.flag("all"));
    }

    #[test]
    fn test_msstd_separate_value() {
        let parsed = parse_args(
            &tokens(&["-count", "5", "src"]),
            &options(),
            &positionals(),
            &MsStdConvention,
        )
        .unwrap();
        assert_eq!(parsed.int_of("count"), Some(5));
    }

    #[test]
    fn test_msdos_convention() {
        let parsed = parse_args(
            &tokens(&["/count:5", "/V", "src"]),
            &options(),
            &positionals(),
            &MsDosConvention,
        )
        .unwrap();
        assert_eq!(parsed.int_of("count"), Some(5));
        assert!(parsed.flag("verbose"));

        let err = parse_args(
            &tokens(&["/bogus", "src"]),
            &options(),
            &positionals(),
            &MsDosConvention,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                option: "/bogus".to_string()
            }
        );
    }
}
