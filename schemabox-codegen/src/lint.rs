//! Schema lint pass.
//!
//! Generation trusts its input. This pass runs before it and reports what
//! would otherwise surface as compile errors in the generated code, or as
//! validators that can never fire:
//!
//! - duplicate titles, and distinct titles that case to the same type name
//! - field references and array items naming undeclared titles
//! - duplicate field keys, accessor or setter names within an object
//! - field keys that shadow a generated method (warning)
//! - unknown validator names and malformed arguments
//! - validators that do not constrain the kind they are attached to
//! - `Format` patterns that do not compile
//! - field bindings whose type name collides with another type
//! - objects that contain themselves other than through an array
//! - objects without fields (warning)

use std::collections::{HashMap, HashSet};
use std::fmt;

use schemabox::{Format, Shape, Validator};
use serde::Serialize;

use crate::naming::{lower_camel, rust_ident, snake_case, upper_camel};
use crate::plan::binding_name;
use crate::schema::{NodeKind, Schema, ValidatorSpec, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One finding, located by a title-based path such as `Post.author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// All findings for one schema, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether generation should proceed.
    pub fn passes(&self, deny_warnings: bool) -> bool {
        if deny_warnings {
            self.diagnostics.is_empty()
        } else {
            !self.has_errors()
        }
    }
}

// Methods every generated entity carries, as Rust accessors and TypeScript members.
const GENERATED_METHODS: &[&str] = &[
    "get", "set", "validate", "is_valid", "serialize", "to_json", "toJSON", "fromJSON",
    "constructor",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

/// What a title resolves to.
#[derive(Debug, Clone, Copy)]
enum Target {
    Box(Shape),
    Object,
    Array,
}

struct Linter<'a> {
    schema: &'a Schema,
    targets: HashMap<&'a str, Target>,
    report: LintReport,
}

/// Check `schema`.
pub fn lint(schema: &Schema) -> LintReport {
    let mut linter = Linter {
        schema,
        targets: HashMap::new(),
        report: LintReport::default(),
    };
    linter.titles();
    linter.boxes();
    linter.objects();
    linter.arrays();
    linter.cycles();

    tracing::debug!(
        errors = linter.report.errors().count(),
        warnings = linter.report.warnings().count(),
        "linted schema"
    );
    linter.report
}

impl<'a> Linter<'a> {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.report.diagnostics.push(diagnostic);
    }

    fn titles(&mut self) {
        let schema = self.schema;
        let mut type_names: HashMap<String, &str> = HashMap::new();
        for (title, kind) in schema.titles() {
            if self.targets.contains_key(title) {
                self.push(Diagnostic::error(title, format!("duplicate title ({kind})")));
                continue;
            }
            let target = match kind {
                NodeKind::Box => schema
                    .boxes
                    .iter()
                    .find(|b| b.title == title)
                    .map_or(Target::Box(Shape::String), |b| Target::Box(b.kind.shape())),
                NodeKind::Object => Target::Object,
                NodeKind::Array => Target::Array,
            };
            self.targets.insert(title, target);

            let type_name = upper_camel(title);
            if rust_ident(&type_name).is_none() {
                self.push(Diagnostic::error(
                    title,
                    format!("title does not make a type name (got `{type_name}`)"),
                ));
            } else if let Some(other) = type_names.get(&type_name) {
                self.push(Diagnostic::error(
                    title,
                    format!("type name `{type_name}` is also produced by `{other}`"),
                ));
            } else {
                type_names.insert(type_name, title);
            }
        }

        for object in &schema.objects {
            for field in object.fields.iter().filter(|f| f.has_binding()) {
                let name = binding_name(&object.title, &field.key);
                let path = format!("{}.{}", object.title, field.key);
                if let Some(other) = type_names.get(&name) {
                    self.push(Diagnostic::error(
                        path,
                        format!("field binding type `{name}` collides with `{other}`"),
                    ));
                } else {
                    type_names.insert(name, object.title.as_str());
                }
            }
        }
    }

    fn boxes(&mut self) {
        let schema = self.schema;
        for spec in &schema.boxes {
            let shape = spec.kind.shape();
            for (i, validator) in spec.validators.iter().enumerate() {
                let path = format!("{}.validators[{}]", spec.title, i);
                self.validator(&path, validator, shape);
            }
        }
    }

    fn objects(&mut self) {
        let schema = self.schema;
        for object in &schema.objects {
            if object.fields.is_empty() {
                self.push(Diagnostic::warning(&object.title, "object has no fields"));
            }

            let mut keys = HashSet::new();
            let mut accessors: HashMap<String, &str> = HashMap::new();
            let mut members: HashMap<String, &str> = HashMap::new();
            let mut methods: HashMap<String, &str> = HashMap::new();
            for field in &object.fields {
                let path = format!("{}.{}", object.title, field.key);
                if !keys.insert(field.key.as_str()) {
                    self.push(Diagnostic::error(&path, "duplicate field key"));
                    continue;
                }
                let accessor = snake_case(&field.key);
                if rust_ident(&accessor).is_none() {
                    self.push(Diagnostic::error(
                        &path,
                        format!("key does not make an accessor name (got `{accessor}`)"),
                    ));
                } else if let Some(other) = accessors.insert(accessor.clone(), &field.key) {
                    self.push(Diagnostic::error(
                        &path,
                        format!("accessor `{accessor}` is also produced by key `{other}`"),
                    ));
                } else {
                    let member = lower_camel(&field.key);
                    if let Some(other) = members.insert(member.clone(), &field.key) {
                        self.push(Diagnostic::error(
                            &path,
                            format!("member `{member}` is also produced by key `{other}`"),
                        ));
                    } else if let Some((method, other)) = (field.visibility == Visibility::Private)
                        .then(|| claim_methods(&mut methods, &accessor, &field.key))
                        .flatten()
                    {
                        self.push(Diagnostic::error(
                            &path,
                            format!("method `{method}` is also produced by key `{other}`"),
                        ));
                    } else if GENERATED_METHODS.contains(&accessor.as_str())
                        || GENERATED_METHODS.contains(&member.as_str())
                    {
                        self.push(Diagnostic::warning(
                            &path,
                            "key shadows a generated method",
                        ));
                    }
                }

                let target = match self.targets.get(field.reference.as_str()) {
                    Some(target) => *target,
                    None => {
                        self.push(Diagnostic::error(
                            &path,
                            format!("reference to undeclared title `{}`", field.reference),
                        ));
                        continue;
                    }
                };

                let Some(validators) = field.validators.as_ref().filter(|v| !v.is_empty()) else {
                    continue;
                };
                match target {
                    Target::Box(shape) => {
                        for (i, validator) in validators.iter().enumerate() {
                            self.validator(&format!("{}.validators[{}]", path, i), validator, shape);
                        }
                    }
                    Target::Object | Target::Array => self.push(Diagnostic::error(
                        &path,
                        "field validators require a box reference",
                    )),
                }
            }
        }
    }

    fn arrays(&mut self) {
        let schema = self.schema;
        for array in &schema.arrays {
            if !self.targets.contains_key(array.item.as_str()) {
                self.push(Diagnostic::error(
                    &array.title,
                    format!("item references undeclared title `{}`", array.item),
                ));
            }
        }
    }

    /// An object holding itself by value, directly or through other objects,
    /// has no finite layout. Arrays break the chain.
    fn cycles(&mut self) {
        let schema = self.schema;
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, object) in schema.objects.iter().enumerate() {
            index.entry(object.title.as_str()).or_insert(i);
        }
        let mut state = vec![Visit::Pending; schema.objects.len()];
        let mut stack = Vec::new();
        for i in 0..schema.objects.len() {
            self.visit(i, &index, &mut state, &mut stack);
        }
    }

    fn visit(
        &mut self,
        i: usize,
        index: &HashMap<&str, usize>,
        state: &mut [Visit],
        stack: &mut Vec<usize>,
    ) {
        if state[i] != Visit::Pending {
            return;
        }
        state[i] = Visit::Active;
        stack.push(i);

        let schema = self.schema;
        let objects = &schema.objects;
        for field in &objects[i].fields {
            let reference = field.reference.as_str();
            if !matches!(self.targets.get(reference), Some(Target::Object)) {
                continue;
            }
            let Some(&next) = index.get(reference) else {
                continue;
            };
            match state[next] {
                Visit::Pending => self.visit(next, index, state, stack),
                Visit::Active => {
                    let start = stack.iter().position(|&j| j == next).unwrap_or(0);
                    let chain: Vec<&str> = stack[start..]
                        .iter()
                        .chain(std::iter::once(&next))
                        .map(|&j| objects[j].title.as_str())
                        .collect();
                    self.push(Diagnostic::error(
                        format!("{}.{}", objects[i].title, field.key),
                        format!(
                            "reference cycle `{}` does not pass through an array",
                            chain.join(" -> ")
                        ),
                    ));
                }
                Visit::Done => {}
            }
        }

        stack.pop();
        state[i] = Visit::Done;
    }

    fn validator(&mut self, path: &str, spec: &ValidatorSpec, shape: Shape) {
        let validator = match spec.to_validator() {
            Ok(validator) => validator,
            Err(e) => {
                self.push(Diagnostic::error(path, e.to_string()));
                return;
            }
        };
        if !validator.constrains(shape) {
            self.push(Diagnostic::error(
                path,
                format!("`{}` never applies to {} values", validator.name(), shape),
            ));
            return;
        }
        if let Validator::Format(format @ Format::Pattern(pattern)) = &validator {
            if !format.is_valid() {
                self.push(Diagnostic::error(
                    path,
                    format!("pattern /{pattern}/ does not compile"),
                ));
            }
        }
    }
}

/// Record the accessor and setter a private field generates. Returns the
/// first name already taken, with the key that took it.
fn claim_methods<'k>(
    methods: &mut HashMap<String, &'k str>,
    accessor: &str,
    key: &'k str,
) -> Option<(String, &'k str)> {
    for method in [accessor.to_owned(), format!("set_{accessor}")] {
        if let Some(other) = methods.get(&method) {
            return Some((method, *other));
        }
        methods.insert(method, key);
    }
    None
}
