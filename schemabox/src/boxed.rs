//! Scalar box types.
//!
//! A box pairs one raw scalar with an immutable, ordered validator list.
//! The four kinds (boolean, integer, number, string) are zero-sized markers
//! implementing [`Kind`]; [`ScalarBox`] is generic over them.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Number, Value};

use crate::error::{ParseError, Shape, ValidationError, ValidationErrorKind};
use crate::validator::{Input, Validator};

/// Behavior of one scalar kind.
pub trait Kind: Sized + 'static {
    /// Raw value held by boxes of this kind.
    type Value: Clone + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync;

    /// JSON shape of the raw value.
    const SHAPE: Shape;

    /// Read a raw JSON value. `None` when it has the wrong type.
    fn decode(raw: &Value) -> Option<Self::Value>;

    /// Render the raw value as JSON.
    fn encode(value: &Self::Value) -> Value;

    /// Present the raw value to validators.
    fn input(value: &Self::Value) -> Input<'_>;

    /// Structural check performed before any declared validator.
    fn check_structure(_value: &Self::Value) -> Option<ValidationErrorKind> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {}

impl Kind for BoolKind {
    type Value = bool;
    const SHAPE: Shape = Shape::Boolean;

    fn decode(raw: &Value) -> Option<bool> {
        raw.as_bool()
    }

    fn encode(value: &bool) -> Value {
        Value::Bool(*value)
    }

    fn input(value: &bool) -> Input<'_> {
        Input::Bool(*value)
    }
}

/// Integers are carried as `f64` so that non-integral input survives
/// parsing and is reported by `validate()`.
impl Kind for IntKind {
    type Value = f64;
    const SHAPE: Shape = Shape::Integer;

    fn decode(raw: &Value) -> Option<f64> {
        raw.as_f64()
    }

    fn encode(value: &f64) -> Value {
        if is_int32(*value) {
            Value::from(*value as i64)
        } else {
            Number::from_f64(*value).map_or(Value::Null, Value::Number)
        }
    }

    fn input(value: &f64) -> Input<'_> {
        Input::Number(*value)
    }

    fn check_structure(value: &f64) -> Option<ValidationErrorKind> {
        (!is_int32(*value)).then_some(ValidationErrorKind::Integer { value: *value })
    }
}

impl Kind for NumberKind {
    type Value = f64;
    const SHAPE: Shape = Shape::Number;

    fn decode(raw: &Value) -> Option<f64> {
        raw.as_f64()
    }

    /// JSON has no NaN or infinity; they encode as `null`.
    fn encode(value: &f64) -> Value {
        Number::from_f64(*value).map_or(Value::Null, Value::Number)
    }

    fn input(value: &f64) -> Input<'_> {
        Input::Number(*value)
    }

    fn check_structure(value: &f64) -> Option<ValidationErrorKind> {
        (!value.is_finite()).then_some(ValidationErrorKind::Finite { value: *value })
    }
}

impl Kind for StringKind {
    type Value = String;
    const SHAPE: Shape = Shape::String;

    fn decode(raw: &Value) -> Option<String> {
        raw.as_str().map(str::to_owned)
    }

    fn encode(value: &String) -> Value {
        Value::String(value.clone())
    }

    fn input(value: &String) -> Input<'_> {
        Input::Text(value)
    }
}

/// Whether `value` equals its own truncation to a 32-bit signed integer.
pub fn is_int32(value: f64) -> bool {
    value.is_finite()
        && value.trunc() == value
        && value >= f64::from(i32::MIN)
        && value <= f64::from(i32::MAX)
}

/// One raw scalar plus the validators that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBox<K: Kind> {
    value: K::Value,
    validators: Cow<'static, [Validator]>,
}

pub type BoolBox = ScalarBox<BoolKind>;
pub type IntegerBox = ScalarBox<IntKind>;
pub type NumberBox = ScalarBox<NumberKind>;
pub type StringBox = ScalarBox<StringKind>;

impl<K: Kind> ScalarBox<K> {
    /// Box `value` with an ordered validator list.
    pub fn new(value: K::Value, validators: impl Into<Cow<'static, [Validator]>>) -> Self {
        Self {
            value,
            validators: validators.into(),
        }
    }

    /// Build from a raw JSON value. Missing values and `null` become the
    /// kind's default; any other type mismatch is a shape error.
    pub fn from_raw(
        raw: Option<&Value>,
        validators: impl Into<Cow<'static, [Validator]>>,
    ) -> Result<Self, ParseError> {
        let value = match raw {
            None | Some(Value::Null) => K::Value::default(),
            Some(raw) => K::decode(raw).ok_or_else(|| ParseError::shape(K::SHAPE, raw))?,
        };
        Ok(Self::new(value, validators))
    }

    /// The raw value.
    pub fn get(&self) -> &K::Value {
        &self.value
    }

    /// Replace the raw value. No validation happens here.
    pub fn set(&mut self, value: K::Value) {
        self.value = value;
    }

    /// Consume the box, returning the raw value.
    pub fn into_inner(self) -> K::Value {
        self.value
    }

    /// Validators in declaration order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Apply the structural check, then every validator in order.
    ///
    /// A structural violation is reported alone: declared validators only
    /// run on structurally sound values.
    pub fn validate(&self) -> Vec<ValidationError> {
        if let Some(kind) = K::check_structure(&self.value) {
            return vec![ValidationError::new(kind)];
        }
        let input = K::input(&self.value);
        self.validators
            .iter()
            .filter_map(|validator| validator.validate(input))
            .collect()
    }

    /// The raw value as JSON.
    pub fn to_value(&self) -> Value {
        K::encode(&self.value)
    }
}

impl<K: Kind> fmt::Display for ScalarBox<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
