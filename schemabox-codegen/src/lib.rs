//! # schemabox-codegen
//!
//! Generates typed data-model code from a declarative entity schema.
//!
//! A schema is a JSON document with three lists:
//!
//! ```json
//! {
//!   "boxes": [
//!     { "title": "Post Body", "kind": "string",
//!       "validators": [{ "name": "MaxLength", "args": [1000] }] }
//!   ],
//!   "objects": [
//!     { "title": "Post", "fields": [
//!       { "key": "body", "ref": "Post Body" },
//!       { "key": "author", "ref": "User", "visibility": "public" }
//!     ] }
//!   ],
//!   "arrays": [{ "title": "Posts", "item": "Post" }]
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Item | Output |
//! |-------|------|--------|
//! | load | [`Schema::from_path`] | typed schema document |
//! | check | [`lint`] | [`LintReport`] of errors and warnings |
//! | plan | [`ModelPlan::build`] | names cased, validators mapped, nodes ordered |
//! | emit | [`CodeGenerator::generate`] | one source file |
//!
//! Emission order is fixed: entities, then arrays, then boxes grouped
//! boolean, integer, number, string, then field bindings.
//!
//! ## Targets
//!
//! | Target | Generator | Runtime |
//! |--------|-----------|---------|
//! | `rust` | [`RustEmitter`] | the `schemabox` crate |
//! | `typescript` | [`TypeScriptEmitter`] | embedded in the output |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemabox_codegen::{generate, lint, GeneratorConfig, Schema, Target};
//!
//! let schema = Schema::from_path("schema.json")?;
//! let report = lint(&schema);
//! if report.has_errors() {
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//!     return Ok(());
//! }
//! let generated = generate(&schema, Target::Rust, &GeneratorConfig::default())?;
//! std::fs::write("src/models.rs", generated.code)?;
//! ```

pub mod error;
pub mod generator;
pub mod lint;
pub mod naming;
pub mod plan;
pub mod schema;

pub use error::{GenerateError, SchemaError, ValidatorSpecError};
pub use generator::{
    CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, IndentStyle, RustEmitter,
    Target, TypeScriptEmitter,
};
pub use lint::{lint, Diagnostic, LintReport, Severity};
pub use plan::ModelPlan;
pub use schema::{
    ArraySpec, BoxKind, FieldSpec, ObjectSpec, PrimitiveBoxSpec, Schema, ValidatorSpec,
    Visibility,
};

/// Plan `schema` and render it for `target`.
///
/// The schema is not linted first; see [`lint`].
pub fn generate(
    schema: &Schema,
    target: Target,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, GenerateError> {
    let plan = ModelPlan::build(schema)?;
    let generator = target.generator();
    tracing::info!(
        generator = generator.name(),
        items = plan.item_count(),
        "generating models"
    );
    generator.generate(&plan, config)
}
