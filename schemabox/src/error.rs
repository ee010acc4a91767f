//! Error types for the runtime.
//!
//! Validation never fails: validators and models report problems as
//! [`ValidationError`] values collected into a list. Only parsing can fail,
//! with a [`ParseError`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One step in the path from a model root to the value an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// External field key of an entity.
    Key(String),
    /// Element index of an array container.
    Index(usize),
}

/// Location of a value inside a model graph.
///
/// Rendered as `author.email`, `[1].title` or `media[0].url`. The empty
/// path denotes the value the error was produced for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments, outermost first.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Whether this is the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Prepend a segment, moving the path one level down from a new parent.
    pub fn push_front(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// What a validator found wrong with a value.
///
/// Each variant carries the offending value; its `Display` is the message.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    #[error("must be at least {expected} characters (got {actual})")]
    MinLength { expected: usize, actual: usize },

    #[error("must be no more than {expected} characters (got {actual})")]
    MaxLength { expected: usize, actual: usize },

    #[error("must be at least {expected} (got {actual})")]
    Minimum { expected: f64, actual: f64 },

    #[error("must be no more than {expected} (got {actual})")]
    Maximum { expected: f64, actual: f64 },

    #[error("{value:?} is not a valid {format}")]
    Format { format: String, value: String },

    #[error("{value} is not a valid 32-bit integer")]
    Integer { value: f64 },

    #[error("{value} is not a finite number")]
    Finite { value: f64 },
}

/// A validation failure, located within the model graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Where the offending value lives.
    pub path: FieldPath,
    /// What is wrong with it.
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create an error located at the value being validated.
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self {
            path: FieldPath::root(),
            kind,
        }
    }

    /// Re-root the error under an entity field key.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.push_front(PathSegment::Key(key.into()));
        self
    }

    /// Re-root the error under an array index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Index(index));
        self
    }

    /// Rendered message without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for ValidationError {}

/// JSON shape a model expects its raw input to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Object,
    Array,
    Boolean,
    Integer,
    Number,
    String,
}

impl Shape {
    /// Whether `value` has this shape. `null` never matches.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
            Shape::Boolean => value.is_boolean(),
            Shape::Integer | Shape::Number => value.is_number(),
            Shape::String => value.is_string(),
        }
    }

    /// JSON type name of a raw value, for error messages.
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::Boolean => "boolean",
            Shape::Integer => "integer",
            Shape::Number => "number",
            Shape::String => "string",
        };
        f.write_str(name)
    }
}

/// Failure to build a model from raw input.
///
/// Parsing checks syntax and shape only; call `validate()` for semantics.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON value does not have the shape the model expects.
    #[error("expected {expected} at {path}, found {found}")]
    Shape {
        path: FieldPath,
        expected: Shape,
        found: &'static str,
    },
}

impl ParseError {
    /// Shape mismatch for `found` at the current position.
    pub fn shape(expected: Shape, found: &Value) -> Self {
        Self::Shape {
            path: FieldPath::root(),
            expected,
            found: Shape::describe(found),
        }
    }

    /// Re-root the error under an entity field key.
    pub fn at_key(self, key: &str) -> Self {
        self.push_front(PathSegment::Key(key.to_owned()))
    }

    /// Re-root the error under an array index.
    pub fn at_index(self, index: usize) -> Self {
        self.push_front(PathSegment::Index(index))
    }

    fn push_front(self, segment: PathSegment) -> Self {
        match self {
            ParseError::Shape {
                mut path,
                expected,
                found,
            } => {
                path.push_front(segment);
                ParseError::Shape {
                    path,
                    expected,
                    found,
                }
            }
            other => other,
        }
    }
}
