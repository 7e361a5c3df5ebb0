//! Parsing conventions: the syntaxes an option may be spelled in.
//!
//! Three conventions are supported:
//!
//! - [`GnuConvention`] — `--name`, `--name=value`, bundled shorts
//!   (`-abc`), attached short values (`-n5`), and `--` to end options;
//! - [`MsStdConvention`] — `-name value` or `-name:value`, matched
//!   case-insensitively;
//! - [`MsDosConvention`] — `/name` and `/name:value`, matched
//!   case-insensitively.
//!
//! A convention only *classifies* tokens; resolving names against the
//! declared options and converting values happens in the binding stage.

use crate::spec::OptionSpec;

/// One option reference recognised inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionToken {
    /// The name as typed (long name or single short character).
    pub name: String,
    /// The option as displayed in errors, in convention syntax.
    pub display: String,
    /// Value attached in the same token (`--name=value`, `-n5`).
    pub inline_value: Option<String>,
}

/// Classification of one command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// One or more option references (GNU bundles may carry several).
    Options(Vec<OptionToken>),
    /// An ordinary positional argument.
    Positional(String),
    /// End-of-options marker; everything after is positional.
    Terminator,
}

/// A command-line syntax.
pub trait Convention {
    /// Convention name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether option names match case-insensitively.
    fn case_insensitive(&self) -> bool {
        false
    }

    /// Classifies a single token.
    fn classify(&self, token: &str, options: &[OptionSpec]) -> TokenClass;

    /// Renders a long option name in this syntax (for usage text).
    fn format_long(&self, name: &str) -> String;

    /// Renders a short alias in this syntax, if the syntax has one.
    fn format_short(&self, short: char) -> Option<String>;
}

/// Returns `true` when a dash-prefixed token is really a negative
/// number, which should parse as a positional.
fn is_negative_number(token: &str) -> bool {
    token.len() > 1 && token[1..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// GNU-style options.
#[derive(Debug, Clone, Copy, Default)]
pub struct GnuConvention;

impl Convention for GnuConvention {
    fn name(&self) -> &'static str {
        "gnu"
    }

    fn classify(&self, token: &str, options: &[OptionSpec]) -> TokenClass {
        if token == "--" {
            return TokenClass::Terminator;
        }

        if let Some(rest) = token.strip_prefix("--") {
            let (name, inline) = match rest.split_once('=') {
                Some((n, v)) => (n, Some(v.to_string())),
                None => (rest, None),
            };
            return TokenClass::Options(vec![OptionToken {
                name: name.to_string(),
                display: format!("--{}", name),
                inline_value: inline,
            }]);
        }

        if token.starts_with('-') && token.len() > 1 && !is_negative_number(token) {
            return TokenClass::Options(self.split_bundle(&token[1..], options));
        }

        TokenClass::Positional(token.to_string())
    }

    fn format_long(&self, name: &str) -> String {
        format!("--{}", name)
    }

    fn format_short(&self, short: char) -> Option<String> {
        Some(format!("-{}", short))
    }
}

impl GnuConvention {
    /// Splits a bundled short group: each character is an option; the
    /// first value-taking option consumes the rest of the token as its
    /// attached value.
    fn split_bundle(&self, bundle: &str, options: &[OptionSpec]) -> Vec<OptionToken> {
        let mut tokens = Vec::new();
        let mut chars = bundle.char_indices();

        while let Some((offset, c)) = chars.next() {
            let takes_value = options
                .iter()
                .find(|spec| spec.matches_short(c, false))
                .is_some_and(|spec| spec.value.is_some());

            if takes_value {
                let rest = &bundle[offset + c.len_utf8()..];
                tokens.push(OptionToken {
                    name: c.to_string(),
                    display: format!("-{}", c),
                    inline_value: (!rest.is_empty()).then(|| rest.to_string()),
                });
                break;
            }

            tokens.push(OptionToken {
                name: c.to_string(),
                display: format!("-{}", c),
                inline_value: None,
            });
        }
        tokens
    }
}

/// Microsoft-standard options (`-name value`, `-name:value`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MsStdConvention;

impl Convention for MsStdConvention {
    fn name(&self) -> &'static str {
        "ms-standard"
    }

    fn case_insensitive(&self) -> bool {
        true
    }

    fn classify(&self, token: &str, _options: &[OptionSpec]) -> TokenClass {
        if let Some(rest) = token.strip_prefix('-') {
            if !rest.is_empty() && !is_negative_number(token) {
                let (name, inline) = split_colon(rest);
                return TokenClass::Options(vec![OptionToken {
                    name: name.to_string(),
                    display: format!("-{}", name),
                    inline_value: inline,
                }]);
            }
        }
        TokenClass::Positional(token.to_string())
    }

    fn format_long(&self, name: &str) -> String {
        format!("-{}", name)
    }

    fn format_short(&self, short: char) -> Option<String> {
        Some(format!("-{}", short))
    }
}

/// MS-DOS options (`/name`, `/name:value`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MsDosConvention;

impl Convention for MsDosConvention {
    fn name(&self) -> &'static str {
        "ms-dos"
    }

    fn case_insensitive(&self) -> bool {
        true
    }

    fn classify(&self, token: &str, _options: &[OptionSpec]) -> TokenClass {
        if let Some(rest) = token.strip_prefix('/') {
            if !rest.is_empty() {
                let (name, inline) = split_colon(rest);
                return TokenClass::Options(vec![OptionToken {
                    name: name.to_string(),
                    display: format!("/{}", name),
                    inline_value: inline,
                }]);
            }
        }
        TokenClass::Positional(token.to_string())
    }

    fn format_long(&self, name: &str) -> String {
        format!("/{}", name)
    }

    fn format_short(&self, short: char) -> Option<String> {
        Some(format!("/{}", short))
    }
}

fn split_colon(rest: &str) -> (&str, Option<String>) {
    match rest.split_once(':') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (rest, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ValueKind;

    fn opts() -> Vec<OptionSpec> {
        vec![
            OptionSpec::flag("all").short('a'),
            OptionSpec::flag("brief").short('b'),
            OptionSpec::with_value("count", ValueKind::Int).short('n'),
        ]
    }

    fn single(class: TokenClass) -> OptionToken {
        match class {
            TokenClass::Options(mut tokens) if tokens.len() == 1 => tokens.remove(0),
            other => panic!("expected one option token, got {:?}", other),
        }
    }

    #[test]
    fn test_gnu_long_options() {
        let gnu = GnuConvention;
        let token = single(gnu.classify("--count", &opts()));
        assert_eq!(token.name, "count");
        assert_eq!(token.inline_value, None);

        let token = single(gnu.classify("--count=5", &opts()));
        assert_eq!(token.inline_value.as_deref(), Some("5"));
        assert_eq!(token.display, "--count");
    }

    #[test]
    fn test_gnu_terminator() {
        assert_eq!(GnuConvention.classify("--", &opts()), TokenClass::Terminator);
    }

    #[test]
    fn test_gnu_bundled_shorts() {
        let gnu = GnuConvention;
        match gnu.classify("-ab", &opts()) {
            TokenClass::Options(tokens) => {
                assert_eq!(tokens.len(), 2);
                assert_eq!(tokens[0].name, "a");
                assert_eq!(tokens[1].name, "b");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_gnu_attached_short_value() {
        let gnu = GnuConvention;
        let token = single(gnu.classify("-n5", &opts()));
        assert_eq!(token.name, "n");
        assert_eq!(token.inline_value.as_deref(), Some("5"));

        // Flags before the value-taker still split off.
        match gnu.classify("-an12", &opts()) {
            TokenClass::Options(tokens) => {
                assert_eq!(tokens.len(), 2);
                assert_eq!(tokens[0].name, "a");
                assert_eq!(tokens[1].name, "n");
                assert_eq!(tokens[1].inline_value.as_deref(), Some("12"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_gnu_negative_number_is_positional() {
        assert_eq!(
            GnuConvention.classify("-42", &opts()),
            TokenClass::Positional("-42".to_string())
        );
    }

    #[test]
    fn test_gnu_plain_positional() {
        assert_eq!(
            GnuConvention.classify("file.txt", &opts()),
            TokenClass::Positional("file.txt".to_string())
        );
        assert_eq!(
            GnuConvention.classify("-", &opts()),
            TokenClass::Positional("-".to_string())
        );
    }

    #[test]
    fn test_msstd_options() {
        let ms = MsStdConvention;
        let token = single(ms.classify("-count", &opts()));
        assert_eq!(token.name, "count");

        let token = single(ms.classify("-count:5", &opts()));
        assert_eq!(token.inline_value.as_deref(), Some("5"));
        assert_eq!(token.display, "-count");
    }

    #[test]
    fn test_msdos_options() {
        let dos = MsDosConvention;
        let token = single(dos.classify("/count:5", &opts()));
        assert_eq!(token.name, "count");
        assert_eq!(token.inline_value.as_deref(), Some("5"));
        assert_eq!(token.display, "/count");

        assert_eq!(
            dos.classify("path/with/slashes", &opts()),
            TokenClass::Positional("path/with/slashes".to_string())
        );
    }

    #[test]
    fn test_formatting() {
        assert_eq!(GnuConvention.format_long("count"), "--count");
        assert_eq!(MsStdConvention.format_long("count"), "-count");
        assert_eq!(MsDosConvention.format_long("count"), "/count");
        assert_eq!(GnuConvention.format_short('n').as_deref(), Some("-n"));
    }
}
