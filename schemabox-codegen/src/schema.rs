//! Schema model.
//!
//! Pure data deserialized from a JSON schema document. A document lists
//! primitive boxes, objects and arrays; all titles share one namespace.
//!
//! ```json
//! {
//!   "boxes": [
//!     { "title": "Circle Name", "kind": "string",
//!       "validators": [{ "name": "MaxLength", "args": [255] }] }
//!   ],
//!   "objects": [
//!     { "title": "Circle", "fields": [
//!       { "key": "name", "ref": "Circle Name" },
//!       { "key": "owner", "ref": "User", "visibility": "public" }
//!     ] }
//!   ],
//!   "arrays": [{ "title": "Circles", "item": "Circle" }]
//! }
//! ```
//!
//! Nothing here checks that references resolve or titles are unique; that
//! is the job of [`crate::lint`].

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use schemabox::{Format, Shape, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, ValidatorSpecError};

/// A whole schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    pub boxes: Vec<PrimitiveBoxSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub arrays: Vec<ArraySpec>,
}

impl Schema {
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Every declared title with the kind of node declaring it, in document
    /// order: boxes, objects, arrays.
    pub fn titles(&self) -> impl Iterator<Item = (&str, NodeKind)> {
        let boxes = self.boxes.iter().map(|b| (b.title.as_str(), NodeKind::Box));
        let objects = self
            .objects
            .iter()
            .map(|o| (o.title.as_str(), NodeKind::Object));
        let arrays = self.arrays.iter().map(|a| (a.title.as_str(), NodeKind::Array));
        boxes.chain(objects).chain(arrays)
    }

    pub fn node_count(&self) -> usize {
        self.boxes.len() + self.objects.len() + self.arrays.len()
    }
}

/// Which list a title was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Box,
    Object,
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Box => "box",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        })
    }
}

/// Scalar kind of a primitive box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    #[serde(alias = "boolean")]
    Bool,
    #[serde(alias = "integer")]
    Int,
    Number,
    String,
}

impl BoxKind {
    /// Emission order of the box groups.
    pub const ALL: [BoxKind; 4] = [BoxKind::Bool, BoxKind::Int, BoxKind::Number, BoxKind::String];

    pub fn shape(&self) -> Shape {
        match self {
            BoxKind::Bool => Shape::Boolean,
            BoxKind::Int => Shape::Integer,
            BoxKind::Number => Shape::Number,
            BoxKind::String => Shape::String,
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.shape(), f)
    }
}

/// A named box: one scalar kind plus its validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimitiveBoxSpec {
    pub title: String,
    pub kind: BoxKind,
    #[serde(default)]
    pub validators: Vec<ValidatorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An entity with an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A homogeneous array of one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
    pub title: String,
    /// Title of the item type.
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One field of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// External key, kept verbatim for (de)serialization.
    pub key: String,
    /// Title of the referenced box, object or array.
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Extra validators bound to this field only. Only valid on box
    /// references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Vec<ValidatorSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// Whether this field declares its own validators.
    pub fn has_binding(&self) -> bool {
        self.validators.as_ref().is_some_and(|v| !v.is_empty())
    }
}

/// How a field is exposed on the generated entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Accessor pair over a private member.
    #[default]
    Private,
    /// Public member.
    Public,
}

/// A named, parametrized validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorSpec {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl ValidatorSpec {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Map onto the runtime validator.
    pub fn to_validator(&self) -> Result<Validator, ValidatorSpecError> {
        let normalized: String = self
            .name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "minlength" => Ok(Validator::MinLength(self.length("MinLength")?)),
            "maxlength" => Ok(Validator::MaxLength(self.length("MaxLength")?)),
            "minimum" => Ok(Validator::Minimum(self.number("Minimum")?)),
            "maximum" => Ok(Validator::Maximum(self.number("Maximum")?)),
            "format" | "pattern" => {
                let pattern = self.single("Format")?.as_str().ok_or(ValidatorSpecError::Argument {
                    name: "Format",
                    expected: "a pattern string",
                })?;
                Ok(Validator::Format(Format::Pattern(Cow::Owned(
                    pattern.to_owned(),
                ))))
            }
            "datetime" => self.preset("Datetime", Format::Datetime),
            "email" => self.preset("Email", Format::Email),
            "hostname" => self.preset("Hostname", Format::Hostname),
            "ipv4" => self.preset("Ipv4", Format::Ipv4),
            "ipv6" => self.preset("Ipv6", Format::Ipv6),
            "uri" => self.preset("Uri", Format::Uri),
            _ => Err(ValidatorSpecError::UnknownName(self.name.clone())),
        }
    }

    fn arity(&self, name: &'static str, expected: usize) -> Result<(), ValidatorSpecError> {
        if self.args.len() == expected {
            Ok(())
        } else {
            Err(ValidatorSpecError::Arity {
                name,
                expected,
                found: self.args.len(),
            })
        }
    }

    fn single(&self, name: &'static str) -> Result<&Value, ValidatorSpecError> {
        self.arity(name, 1)?;
        Ok(&self.args[0])
    }

    fn length(&self, name: &'static str) -> Result<usize, ValidatorSpecError> {
        self.single(name)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(ValidatorSpecError::Argument {
                name,
                expected: "a non-negative integer",
            })
    }

    fn number(&self, name: &'static str) -> Result<f64, ValidatorSpecError> {
        self.single(name)?
            .as_f64()
            .ok_or(ValidatorSpecError::Argument {
                name,
                expected: "a number",
            })
    }

    fn preset(&self, name: &'static str, format: Format) -> Result<Validator, ValidatorSpecError> {
        self.arity(name, 0)?;
        Ok(Validator::Format(format))
    }
}
