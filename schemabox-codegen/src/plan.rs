//! Emission plan.
//!
//! A [`ModelPlan`] is the typed form of everything an emitter writes: type
//! names already cased, validator specs already mapped to runtime
//! [`Validator`]s, nodes already in emission order. Emitters only render.
//!
//! Each plan node is built from its own schema node alone. Nothing here
//! resolves a reference; a field records the title-derived type name it
//! points at and the emitted code resolves it.

use schemabox::Validator;

use crate::error::GenerateError;
use crate::naming::{lower_camel, snake_case, upper_camel};
use crate::schema::{
    ArraySpec, BoxKind, FieldSpec, ObjectSpec, PrimitiveBoxSpec, Schema, ValidatorSpec,
    Visibility,
};

/// Everything one output file contains, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPlan {
    pub entities: Vec<EntityPlan>,
    pub arrays: Vec<ArrayPlan>,
    /// Declared boxes grouped by kind: boolean, integer, number, string.
    pub boxes: Vec<BoxPlan>,
    /// Field-level validator bindings, in object then field order.
    pub bindings: Vec<BindingPlan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityPlan {
    pub title: String,
    pub type_name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldPlan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    /// External key, verbatim.
    pub key: String,
    /// Rust accessor name.
    pub accessor: String,
    /// TypeScript member name.
    pub member: String,
    /// Type of the member: the referenced type or the field's binding.
    pub type_name: String,
    pub visibility: Visibility,
    pub description: Option<String>,
}

impl FieldPlan {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPlan {
    pub title: String,
    pub type_name: String,
    pub item_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlan {
    pub title: String,
    pub type_name: String,
    pub kind: BoxKind,
    pub validators: Vec<Validator>,
    pub description: Option<String>,
}

/// A box type bound to one field: the referenced box's kind and validators
/// followed by the field's own.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingPlan {
    pub type_name: String,
    /// Type the binding refines.
    pub base_type: String,
    pub validators: Vec<Validator>,
    /// `Title.key` of the declaring field.
    pub origin: String,
}

impl ModelPlan {
    /// Plan every node of `schema`.
    pub fn build(schema: &Schema) -> Result<Self, GenerateError> {
        let mut plan = ModelPlan::default();

        for object in &schema.objects {
            plan.entities.push(EntityPlan::build(object));
            for field in &object.fields {
                if let Some(binding) = BindingPlan::build(object, field)? {
                    plan.bindings.push(binding);
                }
            }
        }

        plan.arrays = schema.arrays.iter().map(ArrayPlan::build).collect();

        for kind in BoxKind::ALL {
            for spec in schema.boxes.iter().filter(|b| b.kind == kind) {
                plan.boxes.push(BoxPlan::build(spec)?);
            }
        }

        tracing::debug!(
            entities = plan.entities.len(),
            arrays = plan.arrays.len(),
            boxes = plan.boxes.len(),
            bindings = plan.bindings.len(),
            "planned model"
        );
        Ok(plan)
    }

    /// Boxes of one kind, in declaration order.
    pub fn boxes_of(&self, kind: BoxKind) -> impl Iterator<Item = &BoxPlan> {
        self.boxes.iter().filter(move |b| b.kind == kind)
    }

    /// Number of emitted type definitions.
    pub fn item_count(&self) -> usize {
        self.entities.len() + self.arrays.len() + self.boxes.len() + self.bindings.len()
    }
}

impl EntityPlan {
    pub fn build(spec: &ObjectSpec) -> Self {
        let fields = spec
            .fields
            .iter()
            .map(|field| FieldPlan {
                key: field.key.clone(),
                accessor: snake_case(&field.key),
                member: lower_camel(&field.key),
                type_name: if field.has_binding() {
                    binding_name(&spec.title, &field.key)
                } else {
                    upper_camel(&field.reference)
                },
                visibility: field.visibility,
                description: field.description.clone(),
            })
            .collect();

        Self {
            title: spec.title.clone(),
            type_name: upper_camel(&spec.title),
            description: spec.description.clone(),
            fields,
        }
    }
}

impl ArrayPlan {
    pub fn build(spec: &ArraySpec) -> Self {
        Self {
            title: spec.title.clone(),
            type_name: upper_camel(&spec.title),
            item_type: upper_camel(&spec.item),
            description: spec.description.clone(),
        }
    }
}

impl BoxPlan {
    pub fn build(spec: &PrimitiveBoxSpec) -> Result<Self, GenerateError> {
        Ok(Self {
            title: spec.title.clone(),
            type_name: upper_camel(&spec.title),
            kind: spec.kind,
            validators: validators(&spec.title, &spec.validators)?,
            description: spec.description.clone(),
        })
    }
}

impl BindingPlan {
    /// The binding declared by `field`, if it declares validators.
    pub fn build(object: &ObjectSpec, field: &FieldSpec) -> Result<Option<Self>, GenerateError> {
        let Some(specs) = field.validators.as_deref().filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let origin = format!("{}.{}", object.title, field.key);
        Ok(Some(Self {
            type_name: binding_name(&object.title, &field.key),
            base_type: upper_camel(&field.reference),
            validators: validators(&origin, specs)?,
            origin,
        }))
    }
}

/// Type name of the binding for field `key` of object `title`.
pub fn binding_name(title: &str, key: &str) -> String {
    upper_camel(&format!("{} {}", title, key))
}

fn validators(owner: &str, specs: &[ValidatorSpec]) -> Result<Vec<Validator>, GenerateError> {
    specs
        .iter()
        .map(|spec| {
            spec.to_validator()
                .map_err(|e| GenerateError::validator(owner, e))
        })
        .collect()
}
