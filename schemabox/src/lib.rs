//! # schemabox
//!
//! Validation runtime for data models generated from a `schemabox` schema.
//!
//! The code generator (`schemabox-codegen`) turns a declarative entity schema
//! into Rust types. Those types depend on this crate only: it provides the
//! validators, the box types that carry them, the array container and the
//! traits every generated type implements.
//!
//! ## Overview
//!
//! A schema declares three kinds of node:
//!
//! | Node | Generated as | Runtime support |
//! |------|--------------|-----------------|
//! | primitive box | newtype over a [`ScalarBox`] | [`FieldBox`] |
//! | object | struct with one member per field | [`Model`], [`ObjectFields`] |
//! | array | `type Title = ArrayOf<Item>` | [`ArrayOf`] |
//!
//! Parsing and validation are separate steps. [`Model::from_json`] only
//! checks that the input is well-formed JSON of the right shape; missing keys
//! and `null` become defaults. [`Validate::validate`] then walks the whole
//! model and returns every violation, each located by a [`FieldPath`]:
//!
//! ```rust,ignore
//! use schemabox::prelude::*;
//!
//! let post = Post::from_json(r#"{ "title": "", "media": [{ "url": "nope" }] }"#)?;
//! for error in post.validate() {
//!     println!("{error}");
//! }
//! // title: must be at least 1 characters (got 0)
//! // media[0].url: "nope" is not a valid uri
//! ```
//!
//! ## Validators
//!
//! | Validator | Applies to | Error when |
//! |-----------|------------|------------|
//! | `MinLength(n)` | string | fewer than `n` characters |
//! | `MaxLength(n)` | string | more than `n` characters |
//! | `Minimum(n)` | integer, number | below `n` |
//! | `Maximum(n)` | integer, number | above `n` |
//! | `Format(f)` | string | not a full match of `f` |
//!
//! Format presets: `datetime`, `email`, `hostname`, `ipv4`, `ipv6`, `uri`.
//! A validator given a value it does not constrain passes it.
//!
//! Integer boxes also check that the value is a 32-bit integer, and number
//! boxes that it is finite. That check runs first and, when it fails, is the
//! only error the box reports.

pub mod array;
pub mod boxed;
pub mod error;
pub mod model;
pub mod net;
pub mod validator;

pub use array::ArrayOf;
pub use boxed::{
    is_int32, BoolBox, BoolKind, IntKind, IntegerBox, Kind, NumberBox, NumberKind, ScalarBox,
    StringBox, StringKind,
};
pub use error::{FieldPath, ParseError, PathSegment, Shape, ValidationError, ValidationErrorKind};
pub use model::{prefix_key, Field, FieldBox, Model, ObjectFields, Validate};
pub use validator::{Format, Input, Validator};

// Generated code reaches JSON through this crate.
pub use serde_json;

/// Traits needed to call the generated API.
pub mod prelude {
    pub use crate::array::ArrayOf;
    pub use crate::error::{ParseError, ValidationError};
    pub use crate::model::{Field, Model, Validate};
}
