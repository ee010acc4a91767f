//! Traits implemented by generated types.
//!
//! ## Overview
//!
//! Every generated type is a [`Model`]: it can be built from raw JSON,
//! validated into a list of [`ValidationError`]s and serialized back to JSON.
//! The traits split that surface in three:
//!
//! - [`Validate`] - collect every violation, never stopping early
//! - [`Model`] - parse from and serialize to JSON
//! - [`Field`] - the accessor surface generated getters and setters use
//!
//! Box types do not implement these traits by hand. A generated box is a
//! newtype over a [`ScalarBox`] implementing [`FieldBox`], and blanket
//! implementations supply the rest:
//!
//! ```rust
//! use schemabox::{Field, FieldBox, Model, StringBox, StringKind, Validate, Validator};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Nickname(StringBox);
//!
//! impl FieldBox for Nickname {
//!     type Kind = StringKind;
//!     const VALIDATORS: &'static [Validator] = &[Validator::MinLength(2)];
//!
//!     fn wrap(inner: StringBox) -> Self {
//!         Nickname(inner)
//!     }
//!
//!     fn inner(&self) -> &StringBox {
//!         &self.0
//!     }
//!
//!     fn inner_mut(&mut self) -> &mut StringBox {
//!         &mut self.0
//!     }
//! }
//!
//! let mut nick = Nickname::from_json("\"x\"").unwrap();
//! assert_eq!(nick.validate().len(), 1);
//! nick.set("xyz".to_string());
//! assert!(nick.validate().is_empty());
//! assert_eq!(nick.to_json(), "\"xyz\"");
//! ```

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::boxed::{Kind, ScalarBox};
use crate::error::{ParseError, Shape, ValidationError};
use crate::validator::Validator;

static NULL: Value = Value::Null;

/// Collect validation errors.
pub trait Validate {
    /// Every violation found, in declaration order. Empty means valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Shorthand for `validate().is_empty()`.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// A type that round-trips through JSON.
///
/// Parsing only checks shape. Semantic checks happen in
/// [`Validate::validate`], so a parsed model may well be invalid.
pub trait Model: Validate + Sized {
    /// JSON shape of the raw value.
    const SHAPE: Shape;

    /// Build from a raw JSON value.
    ///
    /// `null` yields the default instance: the kind's default scalar, an
    /// all-default entity or an empty array.
    fn from_value(raw: &Value) -> Result<Self, ParseError>;

    /// Render as JSON, with scalars unwrapped and nested models recursed.
    fn serialize(&self) -> Value;

    /// Parse JSON text. Fails on malformed text or a top-level value that is
    /// not [`Model::SHAPE`].
    fn from_json(text: &str) -> Result<Self, ParseError> {
        let raw: Value = serde_json::from_str(text)?;
        if !Self::SHAPE.matches(&raw) {
            return Err(ParseError::shape(Self::SHAPE, &raw));
        }
        Self::from_value(&raw)
    }

    /// Serialize to compact JSON text.
    fn to_json(&self) -> String {
        self.serialize().to_string()
    }
}

/// Accessor surface of a field type.
///
/// Boxes expose their scalar; entities and arrays expose themselves.
pub trait Field: Model {
    type Raw;

    fn get(&self) -> &Self::Raw;

    /// Replace the value. Never validates.
    fn set(&mut self, raw: Self::Raw);
}

/// A named box type with a fixed validator list.
pub trait FieldBox: Sized {
    type Kind: Kind;

    /// Validators declared on this box.
    const VALIDATORS: &'static [Validator];

    /// Validators of the box a field-level binding refines. They run first.
    const INHERITED: &'static [Validator] = &[];

    fn wrap(inner: ScalarBox<Self::Kind>) -> Self;

    fn inner(&self) -> &ScalarBox<Self::Kind>;

    fn inner_mut(&mut self) -> &mut ScalarBox<Self::Kind>;

    /// Inherited validators followed by the declared ones.
    fn validators() -> Cow<'static, [Validator]> {
        if Self::INHERITED.is_empty() {
            Cow::Borrowed(Self::VALIDATORS)
        } else {
            Cow::Owned([Self::INHERITED, Self::VALIDATORS].concat())
        }
    }

    /// Box a raw value.
    fn with_value(value: <Self::Kind as Kind>::Value) -> Self {
        Self::wrap(ScalarBox::new(value, Self::validators()))
    }
}

impl<T: FieldBox> Validate for T {
    fn validate(&self) -> Vec<ValidationError> {
        self.inner().validate()
    }
}

impl<T: FieldBox> Model for T {
    const SHAPE: Shape = <T::Kind as Kind>::SHAPE;

    fn from_value(raw: &Value) -> Result<Self, ParseError> {
        ScalarBox::from_raw(Some(raw), Self::validators()).map(Self::wrap)
    }

    fn serialize(&self) -> Value {
        self.inner().to_value()
    }
}

impl<T: FieldBox> Field for T {
    type Raw = <T::Kind as Kind>::Value;

    fn get(&self) -> &Self::Raw {
        self.inner().get()
    }

    fn set(&mut self, raw: Self::Raw) {
        self.inner_mut().set(raw);
    }
}

/// Raw fields of an entity being constructed.
///
/// Accepts a JSON object, or `null` which reads as an object with no keys.
#[derive(Debug, Clone, Copy)]
pub struct ObjectFields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ObjectFields<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, ParseError> {
        match raw {
            Value::Null => Ok(Self { map: None }),
            Value::Object(map) => Ok(Self { map: Some(map) }),
            other => Err(ParseError::shape(Shape::Object, other)),
        }
    }

    /// The raw value at an external key; `null` when absent.
    pub fn raw(&self, key: &str) -> &'a Value {
        self.map.and_then(|map| map.get(key)).unwrap_or(&NULL)
    }

    /// Build the field stored at `key`. Errors are re-rooted under the key.
    pub fn field<T: Model>(&self, key: &str) -> Result<T, ParseError> {
        T::from_value(self.raw(key)).map_err(|e| e.at_key(key))
    }
}

/// Re-root a field's errors under its external key.
pub fn prefix_key(key: &str, errors: Vec<ValidationError>) -> Vec<ValidationError> {
    errors.into_iter().map(|e| e.at_key(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxed::{IntKind, IntegerBox, StringBox, StringKind};
    use crate::error::{PathSegment, ValidationErrorKind};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Password(StringBox);

    impl FieldBox for Password {
        type Kind = StringKind;
        const VALIDATORS: &'static [Validator] = &[Validator::MinLength(8)];

        fn wrap(inner: StringBox) -> Self {
            Password(inner)
        }

        fn inner(&self) -> &StringBox {
            &self.0
        }

        fn inner_mut(&mut self) -> &mut StringBox {
            &mut self.0
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct AdminPassword(StringBox);

    impl FieldBox for AdminPassword {
        type Kind = <Password as FieldBox>::Kind;
        const VALIDATORS: &'static [Validator] = &[Validator::MaxLength(4)];
        const INHERITED: &'static [Validator] = <Password as FieldBox>::VALIDATORS;

        fn wrap(inner: StringBox) -> Self {
            AdminPassword(inner)
        }

        fn inner(&self) -> &StringBox {
            &self.0
        }

        fn inner_mut(&mut self) -> &mut StringBox {
            &mut self.0
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Age(IntegerBox);

    impl FieldBox for Age {
        type Kind = IntKind;
        const VALIDATORS: &'static [Validator] = &[Validator::Minimum(0.0)];

        fn wrap(inner: IntegerBox) -> Self {
            Age(inner)
        }

        fn inner(&self) -> &IntegerBox {
            &self.0
        }

        fn inner_mut(&mut self) -> &mut IntegerBox {
            &mut self.0
        }
    }

    #[test]
    fn test_binding_runs_inherited_validators_first() {
        let binding = AdminPassword::with_value("x".to_string());
        let rules: Vec<_> = binding.validate().into_iter().map(|e| e.kind).collect();
        assert_eq!(rules.len(), 1);
        assert!(matches!(rules[0], ValidationErrorKind::MinLength { expected: 8, .. }));

        let binding = AdminPassword::with_value("long enough".to_string());
        let rules: Vec<_> = binding.validate().into_iter().map(|e| e.kind).collect();
        assert!(matches!(rules[..], [ValidationErrorKind::MaxLength { expected: 4, .. }]));
        assert_eq!(
            &AdminPassword::validators()[..],
            &[Validator::MinLength(8), Validator::MaxLength(4)]
        );
    }

    #[test]
    fn test_plain_box_borrows_validators() {
        assert!(matches!(Password::validators(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_box_from_json_checks_top_level_shape() {
        assert!(matches!(
            Password::from_json("12"),
            Err(ParseError::Shape { .. })
        ));
        assert!(matches!(Password::from_json("nope"), Err(ParseError::Json(_))));
        assert!(matches!(Password::from_json("null"), Err(ParseError::Shape { .. })));
    }

    #[test]
    fn test_box_from_value_null_is_default() {
        let age = Age::from_value(&Value::Null).unwrap();
        assert_eq!(*age.get(), 0.0);
        assert!(age.is_valid());
    }

    #[test]
    fn test_field_set_bypasses_validation() {
        let mut age = Age::with_value(30.0);
        age.set(-1.0);
        assert_eq!(*Field::get(&age), -1.0);
        assert!(!age.is_valid());
        assert_eq!(age.serialize(), json!(-1));
    }

    #[test]
    fn test_object_fields_missing_key_reads_null() {
        let raw = json!({ "age": 7 });
        let fields = ObjectFields::new(&raw).unwrap();
        let age: Age = fields.field("age").unwrap();
        let password: Password = fields.field("password").unwrap();
        assert_eq!(*age.get(), 7.0);
        assert_eq!(password.get(), "");
    }

    #[test]
    fn test_object_fields_prefixes_shape_errors() {
        let raw = json!({ "age": "seven" });
        let fields = ObjectFields::new(&raw).unwrap();
        match fields.field::<Age>("age") {
            Err(ParseError::Shape { path, .. }) => {
                assert_eq!(path.segments(), &[PathSegment::Key("age".into())]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_object_fields_rejects_non_objects() {
        assert!(ObjectFields::new(&json!([1])).is_err());
        assert!(ObjectFields::new(&Value::Null).is_ok());
    }

    #[test]
    fn test_prefix_key() {
        let errors = prefix_key("password", Password::with_value(String::new()).validate());
        assert_eq!(errors[0].path.to_string(), "password");
    }
}
