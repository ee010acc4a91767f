//! Code generator trait definition.
//!
//! This module defines the `CodeGenerator` trait that every output target
//! implements. A generator turns a [`ModelPlan`] into the source text of one
//! file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::generator::rust::RustEmitter;
use crate::generator::typescript::TypeScriptEmitter;
use crate::plan::ModelPlan;

/// Trait for source code generators.
///
/// # Example
///
/// ```rust,ignore
/// use schemabox_codegen::generator::{CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature};
/// use schemabox_codegen::plan::ModelPlan;
/// use schemabox_codegen::GenerateError;
///
/// struct Listing;
///
/// impl CodeGenerator for Listing {
///     fn id(&self) -> &'static str { "listing" }
///     fn name(&self) -> &'static str { "Type Listing" }
///     fn file_extension(&self) -> &'static str { "txt" }
///
///     fn generate(&self, plan: &ModelPlan, _config: &GeneratorConfig) -> Result<GeneratedCode, GenerateError> {
///         let names: Vec<_> = plan.entities.iter().map(|e| e.type_name.clone()).collect();
///         Ok(GeneratedCode::new(names.join("\n"), names))
///     }
///
///     fn supports_feature(&self, _feature: GeneratorFeature) -> bool {
///         false
///     }
/// }
/// ```
pub trait CodeGenerator: Send + Sync {
    /// Short lowercase identifier used to select the generator.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Extension of the generated file, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render every node of `plan` into one file.
    fn generate(
        &self,
        plan: &ModelPlan,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GenerateError>;

    /// Check if this generator supports a specific feature.
    fn supports_feature(&self, feature: GeneratorFeature) -> bool;
}

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Emit a "generated, do not edit" header.
    pub header: bool,

    /// Emit schema descriptions as doc comments.
    pub generate_docs: bool,

    /// Path generated Rust code uses to reach the runtime.
    pub runtime_crate: String,

    /// Indentation for line-written targets.
    pub indent: IndentStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header: true,
            generate_docs: true,
            runtime_crate: "::schemabox".to_string(),
            indent: IndentStyle::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Two spaces
    #[default]
    Spaces2,

    /// Four spaces
    Spaces4,

    /// One tab
    Tabs,
}

impl IndentStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Generated code output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// The generated source text.
    pub code: String,

    /// Names of the emitted types, in emission order.
    pub type_names: Vec<String>,
}

impl GeneratedCode {
    pub fn new(code: impl Into<String>, type_names: Vec<String>) -> Self {
        Self {
            code: code.into(),
            type_names,
        }
    }
}

/// Generator features for capability checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorFeature {
    /// Schema descriptions become doc comments.
    Descriptions,

    /// Field-level validator bindings.
    FieldBindings,

    /// The output carries its own validation runtime.
    EmbeddedRuntime,

    /// The output is run through a formatter.
    Formatting,
}

impl GeneratorFeature {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorFeature::Descriptions => "Descriptions",
            GeneratorFeature::FieldBindings => "Field Bindings",
            GeneratorFeature::EmbeddedRuntime => "Embedded Runtime",
            GeneratorFeature::Formatting => "Formatting",
        }
    }
}

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Rust,
    #[serde(alias = "ts")]
    TypeScript,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Rust, Target::TypeScript];

    /// The generator for this target.
    pub fn generator(&self) -> Box<dyn CodeGenerator> {
        match self {
            Target::Rust => Box::new(RustEmitter::new()),
            Target::TypeScript => Box::new(TypeScriptEmitter::new()),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Target::Rust => "rust",
            Target::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(Target::Rust),
            "typescript" | "ts" => Ok(Target::TypeScript),
            other => Err(format!(
                "unknown target '{}' (expected one of: rust, typescript)",
                other
            )),
        }
    }
}
