//! Parametrized validators.
//!
//! A [`Validator`] is a pure check of one captured parameter against one
//! input value. The set of validators is closed: every check is a variant of
//! the enum, so per-field customization is just a different `&'static` list.
//!
//! ```rust
//! use schemabox::{Input, Validator};
//!
//! let min = Validator::MinLength(3);
//! assert!(min.validate(Input::Text("abc")).is_none());
//! assert!(min.validate(Input::Text("ab")).is_some());
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;

use crate::error::{Shape, ValidationError, ValidationErrorKind};

/// A raw scalar presented to a validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
}

/// A string format checked by full-string pattern match.
///
/// The named variants are presets: each one is only a fixed pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Datetime,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Uri,
    /// Caller supplied regular expression (unanchored; matched in full).
    Pattern(Cow<'static, str>),
}

const DATETIME: &str = r"\d{4,}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])[tT ](?:[01][0-9]|2[0-4]):[0-5][0-9]:[0-5][0-9](?:\.\d+)?(?:[zZ]|(?:\+(?:0[0-9]|1[0-4])|-(?:0[0-9]|1[0-2]))(?::[0-5][0-9])?)";
const EMAIL: &str = r".+@.+\..+";
const HOSTNAME: &str = r"[0-9A-Za-z](?:(?:[0-9A-Za-z]|-){0,61}[0-9A-Za-z])?(?:\.[0-9A-Za-z](?:(?:[0-9A-Za-z]|-){0,61}[0-9A-Za-z])?)*\.?";
// Dotted-quad ABNF from RFC 2673 section 3.2.
const IPV4: &str = r"(?:(?:25[0-5]|2[0-4][0-9]|(?:1?[0-9])?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|(?:1?[0-9])?[0-9])";
// Full (uncompressed) form from RFC 2373 section 2.2.
const IPV6: &str = r"(?:[0-9a-f]+:){7}[0-9a-f]+";
const URI: &str = r"[a-zA-Z][a-zA-Z0-9+.\-]*:[^\s]*";

const HOSTNAME_MAX_LEN: usize = 255;

static COMPILED: LazyLock<Mutex<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern` anchored at both ends, caching the result process-wide.
///
/// Returns `None` when the pattern is not a valid regular expression.
fn compiled(pattern: &str) -> Option<Regex> {
    let mut cache = COMPILED.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(pattern.to_owned())
        .or_insert_with(|| Regex::new(&format!("^(?:{})$", pattern)).ok())
        .clone()
}

impl Format {
    /// The unanchored pattern this format matches.
    pub fn pattern(&self) -> &str {
        match self {
            Format::Datetime => DATETIME,
            Format::Email => EMAIL,
            Format::Hostname => HOSTNAME,
            Format::Ipv4 => IPV4,
            Format::Ipv6 => IPV6,
            Format::Uri => URI,
            Format::Pattern(pattern) => pattern,
        }
    }

    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Datetime => "datetime",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Uri => "uri",
            Format::Pattern(_) => "pattern",
        }
    }

    /// Whether the pattern compiles. Presets always do.
    pub fn is_valid(&self) -> bool {
        compiled(self.pattern()).is_some()
    }

    /// Length limit in bytes checked before the pattern, if any.
    pub fn max_len(&self) -> Option<usize> {
        matches!(self, Format::Hostname).then_some(HOSTNAME_MAX_LEN)
    }

    /// Full-string match. An uncompilable pattern matches nothing.
    pub fn matches(&self, value: &str) -> bool {
        if let Some(max) = self.max_len() {
            if !(1..=max).contains(&value.len()) {
                return false;
            }
        }
        compiled(self.pattern()).is_some_and(|re| re.is_match(value))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pattern(pattern) => write!(f, "pattern /{}/", pattern),
            other => f.write_str(other.name()),
        }
    }
}

/// A parametrized predicate over one scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Error iff the string has fewer than `n` characters.
    MinLength(usize),
    /// Error iff the string has more than `n` characters.
    MaxLength(usize),
    /// Error iff the number is below `n`.
    Minimum(f64),
    /// Error iff the number is above `n`.
    Maximum(f64),
    /// Error iff the string does not match the format in full.
    Format(Format),
}

impl Validator {
    pub const fn datetime() -> Self {
        Validator::Format(Format::Datetime)
    }

    pub const fn email() -> Self {
        Validator::Format(Format::Email)
    }

    pub const fn hostname() -> Self {
        Validator::Format(Format::Hostname)
    }

    pub const fn ipv4() -> Self {
        Validator::Format(Format::Ipv4)
    }

    pub const fn ipv6() -> Self {
        Validator::Format(Format::Ipv6)
    }

    pub const fn uri() -> Self {
        Validator::Format(Format::Uri)
    }

    /// A format validator for a static pattern, usable in `const` lists.
    pub const fn pattern(pattern: &'static str) -> Self {
        Validator::Format(Format::Pattern(Cow::Borrowed(pattern)))
    }

    /// Validator name as it appears in schema documents.
    pub fn name(&self) -> &'static str {
        match self {
            Validator::MinLength(_) => "MinLength",
            Validator::MaxLength(_) => "MaxLength",
            Validator::Minimum(_) => "Minimum",
            Validator::Maximum(_) => "Maximum",
            Validator::Format(_) => "Format",
        }
    }

    /// Whether this validator constrains values of the given shape.
    ///
    /// Validators pass inputs they do not constrain.
    pub fn constrains(&self, shape: Shape) -> bool {
        match self {
            Validator::MinLength(_) | Validator::MaxLength(_) | Validator::Format(_) => {
                shape == Shape::String
            }
            Validator::Minimum(_) | Validator::Maximum(_) => {
                matches!(shape, Shape::Integer | Shape::Number)
            }
        }
    }

    /// Check `input`, returning what is wrong with it, if anything.
    pub fn check(&self, input: Input<'_>) -> Option<ValidationErrorKind> {
        match (self, input) {
            (Validator::MinLength(expected), Input::Text(value)) => {
                let actual = value.chars().count();
                (actual < *expected).then_some(ValidationErrorKind::MinLength {
                    expected: *expected,
                    actual,
                })
            }
            (Validator::MaxLength(expected), Input::Text(value)) => {
                let actual = value.chars().count();
                (actual > *expected).then_some(ValidationErrorKind::MaxLength {
                    expected: *expected,
                    actual,
                })
            }
            (Validator::Minimum(expected), Input::Number(actual)) => {
                (actual < *expected).then_some(ValidationErrorKind::Minimum {
                    expected: *expected,
                    actual,
                })
            }
            (Validator::Maximum(expected), Input::Number(actual)) => {
                (actual > *expected).then_some(ValidationErrorKind::Maximum {
                    expected: *expected,
                    actual,
                })
            }
            (Validator::Format(format), Input::Text(value)) => {
                (!format.matches(value)).then(|| ValidationErrorKind::Format {
                    format: format.to_string(),
                    value: value.to_owned(),
                })
            }
            _ => None,
        }
    }

    /// Check `input`, producing at most one located error.
    pub fn validate(&self, input: Input<'_>) -> Option<ValidationError> {
        self.check(input).map(ValidationError::new)
    }
}
