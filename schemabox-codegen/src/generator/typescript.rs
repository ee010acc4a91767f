//! TypeScript code emitter.
//!
//! Renders a [`ModelPlan`] as one self-contained TypeScript module: the
//! validation runtime first, then one class per plan node.
//!
//! # Output
//!
//! | Plan node | Emitted as |
//! |-----------|------------|
//! | box | `class Title extends StringType` with a validator list |
//! | field binding | `class TitleKey extends Base`, appending validators |
//! | entity | `class Title implements Model` with accessors for private fields |
//! | array | `class Title extends ArrayType<Item>` building each item |
//!
//! `toJSON()` always returns raw values: boxes unwrap to their scalar and
//! nested models recurse.

use schemabox::Validator;
use serde_json::Value;

use crate::error::GenerateError;
use crate::generator::traits::{CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature};
use crate::generator::type_names;
use crate::generator::writer::{separated, CodeWriter};
use crate::plan::{ArrayPlan, BindingPlan, BoxPlan, EntityPlan, FieldPlan, ModelPlan};
use crate::schema::BoxKind;

const RUNTIME: &str = include_str!("../../assets/runtime.ts");

const HEADER: &[&str] = &[
    "// Generated by schemabox from a schema document.",
    "//",
    "// Do not edit by hand: change the schema and regenerate.",
];

/// TypeScript code generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Class declarations only, without the header or runtime.
    pub fn declarations(
        &self,
        plan: &ModelPlan,
        config: &GeneratorConfig,
    ) -> Result<String, GenerateError> {
        let mut w = CodeWriter::new(config.indent);
        let mut first = true;
        let mut next = |w: &mut CodeWriter| {
            if !std::mem::take(&mut first) {
                w.blank();
            }
        };

        for entity in &plan.entities {
            next(&mut w);
            self.entity(&mut w, entity, config)?;
        }
        for array in &plan.arrays {
            next(&mut w);
            self.array(&mut w, array, config)?;
        }
        for b in &plan.boxes {
            next(&mut w);
            self.box_type(&mut w, b, config)?;
        }
        for binding in &plan.bindings {
            next(&mut w);
            self.binding(&mut w, binding, config)?;
        }
        Ok(w.finish())
    }

    fn entity(
        &self,
        w: &mut CodeWriter,
        plan: &EntityPlan,
        config: &GeneratorConfig,
    ) -> Result<(), GenerateError> {
        let name = ts_ident(&plan.type_name)?;
        let fields = plan
            .fields
            .iter()
            .map(|field| Ok((field, ts_ident(&field.member)?, ts_ident(&field.type_name)?)))
            .collect::<Result<Vec<_>, GenerateError>>()?;

        docs(w, plan.description.as_deref(), config);
        w.open(format!("export class {} implements Model {{", name));
        w.open(format!("static fromJSON(text: string): {} {{", name));
        w.line(format!("return new {}(parseTopLevel(text, \"object\"));", name));
        w.close("}");

        if !fields.is_empty() {
            w.blank();
            for (field, member, ty) in &fields {
                if field.is_public() {
                    docs(w, field.description.as_deref(), config);
                    w.line(format!("public {}: {};", member, ty));
                } else {
                    w.line(format!("private {}: {};", storage(field, member), ty));
                }
            }
        }

        w.blank();
        w.open("constructor(raw?: unknown) {");
        if fields.is_empty() {
            w.line("objectFields(raw);");
        } else {
            w.line("const fields = objectFields(raw);");
            for (field, member, ty) in &fields {
                w.line(format!(
                    "this.{} = field(fields, {}, (v) => new {}(v));",
                    storage(field, member),
                    quoted(&field.key),
                    ty
                ));
            }
        }
        w.close("}");

        for (field, member, ty) in fields.iter().filter(|(field, _, _)| !field.is_public()) {
            w.blank();
            docs(w, field.description.as_deref(), config);
            w.open(format!("get {}(): Raw<{}> {{", member, ty));
            w.line(format!("return this.{}.get();", storage(field, member)));
            w.close("}");
            w.blank();
            w.open(format!("set {}(value: Raw<{}>) {{", member, ty));
            w.line(format!("this.{}.set(value);", storage(field, member)));
            w.close("}");
        }

        w.blank();
        w.open("get(): this {").line("return this;").close("}");
        w.blank();
        if fields.is_empty() {
            w.line("set(_value: this): void {}");
        } else {
            w.open("set(value: this): void {");
            for (field, member, _) in &fields {
                let slot = storage(field, member);
                w.line(format!("this.{0}.set(value.{0}.get());", slot));
            }
            w.close("}");
        }

        w.blank();
        w.open("validate(): ValidationError[] {");
        if fields.is_empty() {
            w.line("return [];");
        } else {
            w.open("return [");
            w.lines(separated(
                fields.iter().map(|(field, member, _)| {
                    format!(
                        "...prefix({}, this.{}.validate())",
                        quoted(&field.key),
                        storage(field, member)
                    )
                }),
                ",",
            ));
            w.close("];");
        }
        w.close("}");

        w.blank();
        w.open("toJSON(): Record<string, unknown> {");
        if fields.is_empty() {
            w.line("return {};");
        } else {
            w.open("return {");
            w.lines(separated(
                fields.iter().map(|(field, member, _)| {
                    format!("{}: this.{}.toJSON()", quoted(&field.key), storage(field, member))
                }),
                ",",
            ));
            w.close("};");
        }
        w.close("}");
        w.close("}");
        Ok(())
    }

    fn array(
        &self,
        w: &mut CodeWriter,
        plan: &ArrayPlan,
        config: &GeneratorConfig,
    ) -> Result<(), GenerateError> {
        let name = ts_ident(&plan.type_name)?;
        let item = ts_ident(&plan.item_type)?;

        docs(w, plan.description.as_deref(), config);
        w.open(format!("export class {} extends ArrayType<{}> {{", name, item));
        w.open(format!("static fromJSON(text: string): {} {{", name));
        w.line(format!("return new {}(parseTopLevel(text, \"array\"));", name));
        w.close("}");
        w.blank();
        w.open("constructor(raw?: unknown) {");
        w.line("super();");
        w.line(format!("this.load(raw, (item) => new {}(item));", item));
        w.close("}");
        w.close("}");
        Ok(())
    }

    fn box_type(
        &self,
        w: &mut CodeWriter,
        plan: &BoxPlan,
        config: &GeneratorConfig,
    ) -> Result<(), GenerateError> {
        let name = ts_ident(&plan.type_name)?;
        let base = match plan.kind {
            BoxKind::Bool => "BooleanType",
            BoxKind::Int => "IntegerType",
            BoxKind::Number => "NumberType",
            BoxKind::String => "StringType",
        };

        docs(w, plan.description.as_deref(), config);
        if plan.validators.is_empty() {
            w.line(format!("export class {} extends {} {{}}", name, base));
            return Ok(());
        }
        w.open(format!("export class {} extends {} {{", name, base));
        w.open("protected validators: Validator[] = [");
        w.lines(separated(plan.validators.iter().map(validator), ","));
        w.close("];");
        w.close("}");
        Ok(())
    }

    fn binding(
        &self,
        w: &mut CodeWriter,
        plan: &BindingPlan,
        config: &GeneratorConfig,
    ) -> Result<(), GenerateError> {
        let name = ts_ident(&plan.type_name)?;
        let base = ts_ident(&plan.base_type)?;

        if config.generate_docs {
            w.line(format!("/** Validators bound to `{}`. */", plan.origin));
        }
        w.open(format!("export class {} extends {} {{", name, base));
        w.open("constructor(raw?: unknown) {");
        w.line("super(raw);");
        w.open("this.validators = this.validators.concat([");
        w.lines(separated(plan.validators.iter().map(validator), ","));
        w.close("]);");
        w.close("}");
        w.close("}");
        Ok(())
    }
}

impl CodeGenerator for TypeScriptEmitter {
    fn id(&self) -> &'static str {
        "typescript"
    }

    fn name(&self) -> &'static str {
        "TypeScript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn generate(
        &self,
        plan: &ModelPlan,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GenerateError> {
        let declarations = self.declarations(plan, config)?;

        let mut w = CodeWriter::new(config.indent);
        if config.header {
            w.lines(HEADER).blank();
        }
        w.raw(RUNTIME);
        if !declarations.is_empty() {
            w.blank().raw(&declarations);
        }

        let type_names = type_names(plan);
        tracing::debug!(items = type_names.len(), "rendered typescript module");
        Ok(GeneratedCode::new(w.finish(), type_names))
    }

    fn supports_feature(&self, feature: GeneratorFeature) -> bool {
        match feature {
            GeneratorFeature::Descriptions
            | GeneratorFeature::FieldBindings
            | GeneratorFeature::EmbeddedRuntime => true,
            GeneratorFeature::Formatting => false,
        }
    }
}

fn ts_ident(name: &str) -> Result<&str, GenerateError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if valid {
        Ok(name)
    } else {
        Err(GenerateError::Identifier {
            name: name.to_owned(),
        })
    }
}

/// Property holding a field's value: the member itself when public.
fn storage(field: &FieldPlan, member: &str) -> String {
    if field.is_public() {
        member.to_owned()
    } else {
        format!("_{}", member)
    }
}

fn quoted(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

fn number(value: f64) -> String {
    format!("{}", value)
}

fn validator(validator: &Validator) -> String {
    match validator {
        Validator::MinLength(n) => format!("new MinLengthValidator({})", n),
        Validator::MaxLength(n) => format!("new MaxLengthValidator({})", n),
        Validator::Minimum(n) => format!("new MinimumValidator({})", number(*n)),
        Validator::Maximum(n) => format!("new MaximumValidator({})", number(*n)),
        Validator::Format(format) => {
            let mut args = vec![quoted(&format.to_string()), quoted(format.pattern())];
            if let Some(max) = format.max_len() {
                args.push(max.to_string());
            }
            format!("new FormatValidator({})", args.join(", "))
        }
    }
}

fn docs(w: &mut CodeWriter, text: Option<&str>, config: &GeneratorConfig) {
    let Some(text) = text.filter(|_| config.generate_docs) else {
        return;
    };
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    match lines.as_slice() {
        [] => {}
        [line] => {
            w.line(format!("/** {} */", line));
        }
        lines => {
            w.line("/**");
            for line in lines {
                if line.is_empty() {
                    w.line(" *");
                } else {
                    w.line(format!(" * {}", line));
                }
            }
            w.line(" */");
        }
    }
}
