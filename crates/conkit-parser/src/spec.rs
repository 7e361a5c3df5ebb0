//! Option and positional argument specifications, and the typed values
//! they bind to.

/// The type a parameter converts to during binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// `true`/`false` (also `yes`/`no`, `on`/`off`).
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Taken verbatim.
    #[default]
    Str,
}

impl ValueKind {
    /// Human name used in error messages and help placeholders.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Str => "string",
        }
    }

    /// Converts a raw token to a [`Value`] of this kind.
    pub fn convert(&self, raw: &str) -> Option<Value> {
        match self {
            Self::Str => Some(Value::Str(raw.to_string())),
            Self::Int => raw.parse::<i64>().ok().map(Value::Int),
            Self::Float => raw.parse::<f64>().ok().map(Value::Float),
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

/// A typed value produced by binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Repeated options and greedy positionals collect into a list.
    List(Vec<Value>),
}

impl Value {
    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float content; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list content, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Declaration of a named option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Canonical long name (binding key).
    pub name: String,
    /// Optional single-character alias.
    pub short: Option<char>,
    /// Additional long aliases.
    pub aliases: Vec<String>,
    /// Help text.
    pub description: String,
    /// Parameter kind; `None` makes this a flag.
    pub value: Option<ValueKind>,
    /// Repeated occurrences collect into a list instead of erroring.
    pub repeatable: bool,
    /// Absence is a parse error.
    pub required: bool,
}

impl OptionSpec {
    /// Declares a flag option (no parameter).
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            aliases: Vec::new(),
            description: String::new(),
            value: None,
            repeatable: false,
            required: false,
        }
    }

    /// Declares an option taking one parameter of the given kind.
    pub fn with_value(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            value: Some(kind),
            ..Self::flag(name)
        }
    }

    /// Adds a single-character alias.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a long alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the help text.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allows the option to repeat, collecting values into a list.
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Makes absence a parse error.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Tests a long name against the canonical name and aliases.
    pub fn matches_long(&self, name: &str, case_insensitive: bool) -> bool {
        let eq = |candidate: &str| {
            if case_insensitive {
                candidate.eq_ignore_ascii_case(name)
            } else {
                candidate == name
            }
        };
        eq(&self.name) || self.aliases.iter().any(|a| eq(a))
    }

    /// Tests a short alias.
    pub fn matches_short(&self, short: char, case_insensitive: bool) -> bool {
        match self.short {
            Some(s) if case_insensitive => s.eq_ignore_ascii_case(&short),
            Some(s) => s == short,
            None => false,
        }
    }
}

/// Declaration of a positional argument.
#[derive(Debug, Clone)]
pub struct PositionalSpec {
    /// Name (binding key, shown in usage as `<name>`).
    pub name: String,
    /// Help text.
    pub description: String,
    /// Conversion kind.
    pub kind: ValueKind,
    /// Raw default; supplying one makes the argument optional.
    pub default: Option<String>,
    /// Collects all remaining arguments into a list. Only meaningful on
    /// the last positional.
    pub greedy: bool,
}

impl PositionalSpec {
    /// Declares a required string positional.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: ValueKind::Str,
            default: None,
            greedy: false,
        }
    }

    /// Sets the conversion kind.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the help text.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Supplies a default, making the argument optional.
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    /// Collects all remaining arguments into a list.
    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }
}
