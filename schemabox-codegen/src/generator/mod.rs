//! Code generator module.
//!
//! This module defines the code generator trait and its Rust and TypeScript
//! implementations.

pub mod rust;
pub mod traits;
pub mod typescript;
pub mod writer;

pub use rust::RustEmitter;
pub use traits::{
    CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, IndentStyle, Target,
};
pub use typescript::TypeScriptEmitter;

use crate::plan::ModelPlan;

/// Emitted type names in emission order.
pub(crate) fn type_names(plan: &ModelPlan) -> Vec<String> {
    plan.entities
        .iter()
        .map(|e| e.type_name.clone())
        .chain(plan.arrays.iter().map(|a| a.type_name.clone()))
        .chain(plan.boxes.iter().map(|b| b.type_name.clone()))
        .chain(plan.bindings.iter().map(|b| b.type_name.clone()))
        .collect()
}
