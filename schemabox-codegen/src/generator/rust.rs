//! Rust code emitter.
//!
//! Renders a [`ModelPlan`] as one Rust module that depends only on the
//! `schemabox` runtime.
//!
//! # Output
//!
//! | Plan node | Emitted as |
//! |-----------|------------|
//! | box | `pub struct Title(StringBox)` + `impl FieldBox` |
//! | field binding | `pub struct TitleKey(ScalarBox<..>)` inheriting the base box's validators |
//! | entity | struct + accessors + `impl Validate`, `Model`, `Field` |
//! | array | `pub type Title = ArrayOf<Item>` |
//!
//! References are never resolved here. An accessor's return type is written
//! as `<T as Field>::Raw` and a binding's kind as `<Base as FieldBox>::Kind`,
//! so the compiler resolves them when the module is built.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use schemabox::{Format, Validator};

use crate::error::GenerateError;
use crate::generator::traits::{CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature};
use crate::generator::type_names;
use crate::naming::rust_ident;
use crate::plan::{ArrayPlan, BindingPlan, BoxPlan, EntityPlan, FieldPlan, ModelPlan};
use crate::schema::BoxKind;

const HEADER: &[&str] = &[
    " Generated by schemabox from a schema document.",
    "",
    " Do not edit by hand: change the schema and regenerate.",
];

/// Rust code generator.
///
/// # Example
///
/// ```rust,ignore
/// use schemabox_codegen::generator::{CodeGenerator, GeneratorConfig, RustEmitter};
/// use schemabox_codegen::plan::ModelPlan;
///
/// let plan = ModelPlan::build(&schema)?;
/// let generated = RustEmitter::new().generate(&plan, &GeneratorConfig::default())?;
/// std::fs::write("src/models.rs", generated.code)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RustEmitter;

impl RustEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Token stream for the whole module, before formatting.
    pub fn tokens(
        &self,
        plan: &ModelPlan,
        config: &GeneratorConfig,
    ) -> Result<TokenStream, GenerateError> {
        let cx = Context::new(config)?;

        let header = if config.header {
            let lines = HEADER;
            quote! { #(#![doc = #lines])* }
        } else {
            TokenStream::new()
        };

        let entities = plan
            .entities
            .iter()
            .map(|entity| cx.entity(entity))
            .collect::<Result<Vec<_>, _>>()?;
        let arrays = plan
            .arrays
            .iter()
            .map(|array| cx.array(array))
            .collect::<Result<Vec<_>, _>>()?;
        let boxes = plan
            .boxes
            .iter()
            .map(|b| cx.box_type(b))
            .collect::<Result<Vec<_>, _>>()?;
        let bindings = plan
            .bindings
            .iter()
            .map(|binding| cx.binding(binding))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quote! {
            #header
            #(#entities)*
            #(#arrays)*
            #(#boxes)*
            #(#bindings)*
        })
    }
}

impl CodeGenerator for RustEmitter {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn generate(
        &self,
        plan: &ModelPlan,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GenerateError> {
        let tokens = self.tokens(plan, config)?;
        let file: syn::File = syn::parse2(tokens)?;
        let code = prettyplease::unparse(&file);

        let type_names = type_names(plan);
        tracing::debug!(items = type_names.len(), "rendered rust module");
        Ok(GeneratedCode::new(code, type_names))
    }

    fn supports_feature(&self, feature: GeneratorFeature) -> bool {
        match feature {
            GeneratorFeature::Descriptions
            | GeneratorFeature::FieldBindings
            | GeneratorFeature::Formatting => true,
            GeneratorFeature::EmbeddedRuntime => false,
        }
    }
}

fn ident(name: &str) -> Result<Ident, GenerateError> {
    let invalid = || GenerateError::Identifier {
        name: name.to_owned(),
    };
    let text = rust_ident(name).ok_or_else(invalid)?;
    syn::parse_str::<Ident>(&text).map_err(|_| invalid())
}

struct Context<'a> {
    rt: syn::Path,
    config: &'a GeneratorConfig,
}

impl<'a> Context<'a> {
    fn new(config: &'a GeneratorConfig) -> Result<Self, GenerateError> {
        let rt = syn::parse_str::<syn::Path>(&config.runtime_crate).map_err(|_| {
            GenerateError::Identifier {
                name: config.runtime_crate.clone(),
            }
        })?;
        Ok(Self { rt, config })
    }

    fn docs(&self, text: Option<&str>) -> TokenStream {
        match text.filter(|_| self.config.generate_docs) {
            Some(text) => {
                let lines = text.lines().map(|line| format!(" {}", line.trim_end()));
                quote! { #(#[doc = #lines])* }
            }
            None => TokenStream::new(),
        }
    }

    fn scalar_types(&self, kind: BoxKind) -> (TokenStream, TokenStream) {
        let rt = &self.rt;
        match kind {
            BoxKind::Bool => (quote! { #rt::BoolBox }, quote! { #rt::BoolKind }),
            BoxKind::Int => (quote! { #rt::IntegerBox }, quote! { #rt::IntKind }),
            BoxKind::Number => (quote! { #rt::NumberBox }, quote! { #rt::NumberKind }),
            BoxKind::String => (quote! { #rt::StringBox }, quote! { #rt::StringKind }),
        }
    }

    fn validator(&self, validator: &Validator) -> TokenStream {
        let rt = &self.rt;
        match validator {
            Validator::MinLength(n) => {
                let n = Literal::usize_unsuffixed(*n);
                quote! { #rt::Validator::MinLength(#n) }
            }
            Validator::MaxLength(n) => {
                let n = Literal::usize_unsuffixed(*n);
                quote! { #rt::Validator::MaxLength(#n) }
            }
            Validator::Minimum(n) => {
                let n = float(*n);
                quote! { #rt::Validator::Minimum(#n) }
            }
            Validator::Maximum(n) => {
                let n = float(*n);
                quote! { #rt::Validator::Maximum(#n) }
            }
            Validator::Format(format) => match format {
                Format::Datetime => quote! { #rt::Validator::datetime() },
                Format::Email => quote! { #rt::Validator::email() },
                Format::Hostname => quote! { #rt::Validator::hostname() },
                Format::Ipv4 => quote! { #rt::Validator::ipv4() },
                Format::Ipv6 => quote! { #rt::Validator::ipv6() },
                Format::Uri => quote! { #rt::Validator::uri() },
                Format::Pattern(pattern) => {
                    let pattern: &str = pattern;
                    quote! { #rt::Validator::pattern(#pattern) }
                }
            },
        }
    }

    fn box_type(&self, plan: &BoxPlan) -> Result<TokenStream, GenerateError> {
        let rt = &self.rt;
        let name = ident(&plan.type_name)?;
        let docs = self.docs(plan.description.as_deref());
        let (inner, kind) = self.scalar_types(plan.kind);
        let validators = plan.validators.iter().map(|v| self.validator(v));

        Ok(quote! {
            #docs
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name(#inner);

            impl #rt::FieldBox for #name {
                type Kind = #kind;
                const VALIDATORS: &'static [#rt::Validator] = &[#(#validators),*];

                fn wrap(inner: #inner) -> Self {
                    Self(inner)
                }

                fn inner(&self) -> &#inner {
                    &self.0
                }

                fn inner_mut(&mut self) -> &mut #inner {
                    &mut self.0
                }
            }
        })
    }

    fn binding(&self, plan: &BindingPlan) -> Result<TokenStream, GenerateError> {
        let rt = &self.rt;
        let name = ident(&plan.type_name)?;
        let base = ident(&plan.base_type)?;
        let doc = format!(" Validators bound to `{}`.", plan.origin);
        let docs = if self.config.generate_docs {
            quote! { #[doc = #doc] }
        } else {
            TokenStream::new()
        };
        let kind = quote! { < #base as #rt::FieldBox >::Kind };
        let inner = quote! { #rt::ScalarBox< #kind > };
        let validators = plan.validators.iter().map(|v| self.validator(v));

        Ok(quote! {
            #docs
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name(#inner);

            impl #rt::FieldBox for #name {
                type Kind = #kind;
                const VALIDATORS: &'static [#rt::Validator] = &[#(#validators),*];
                const INHERITED: &'static [#rt::Validator] = < #base as #rt::FieldBox >::VALIDATORS;

                fn wrap(inner: #inner) -> Self {
                    Self(inner)
                }

                fn inner(&self) -> &#inner {
                    &self.0
                }

                fn inner_mut(&mut self) -> &mut #inner {
                    &mut self.0
                }
            }
        })
    }

    fn array(&self, plan: &ArrayPlan) -> Result<TokenStream, GenerateError> {
        let rt = &self.rt;
        let name = ident(&plan.type_name)?;
        let item = ident(&plan.item_type)?;
        let docs = self.docs(plan.description.as_deref());

        Ok(quote! {
            #docs
            pub type #name = #rt::ArrayOf<#item>;
        })
    }

    fn entity(&self, plan: &EntityPlan) -> Result<TokenStream, GenerateError> {
        let rt = &self.rt;
        let name = ident(&plan.type_name)?;
        let docs = self.docs(plan.description.as_deref());

        let fields = plan
            .fields
            .iter()
            .map(|field| Ok((field, ident(&field.accessor)?, ident(&field.type_name)?)))
            .collect::<Result<Vec<_>, GenerateError>>()?;

        let members = fields.iter().map(|(field, member, ty)| {
            let docs = self.docs(field.description.as_deref());
            let vis = if field.is_public() {
                quote! { pub }
            } else {
                TokenStream::new()
            };
            quote! { #docs #vis #member: #ty }
        });

        let accessors: Vec<_> = fields
            .iter()
            .filter(|(field, _, _)| !field.is_public())
            .map(|(field, member, ty)| self.accessors(field, member, ty))
            .collect();
        let accessors = if accessors.is_empty() {
            TokenStream::new()
        } else {
            quote! {
                impl #name {
                    #(#accessors)*
                }
            }
        };

        let keys: Vec<&str> = fields.iter().map(|(field, _, _)| field.key.as_str()).collect();
        let names: Vec<&Ident> = fields.iter().map(|(_, member, _)| member).collect();

        let validate = if fields.is_empty() {
            quote! { ::std::vec::Vec::new() }
        } else {
            quote! {
                let mut errors = ::std::vec::Vec::new();
                #(errors.extend(#rt::prefix_key(#keys, #rt::Validate::validate(&self.#names)));)*
                errors
            }
        };

        let from_value = if fields.is_empty() {
            quote! {
                #rt::ObjectFields::new(raw)?;
                ::std::result::Result::Ok(Self {})
            }
        } else {
            quote! {
                let fields = #rt::ObjectFields::new(raw)?;
                ::std::result::Result::Ok(Self {
                    #(#names: fields.field(#keys)?,)*
                })
            }
        };

        let serialize = if fields.is_empty() {
            quote! { #rt::serde_json::Value::Object(#rt::serde_json::Map::new()) }
        } else {
            quote! {
                let mut object = #rt::serde_json::Map::new();
                #(object.insert(::std::string::String::from(#keys), #rt::Model::serialize(&self.#names));)*
                #rt::serde_json::Value::Object(object)
            }
        };

        Ok(quote! {
            #docs
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name {
                #(#members,)*
            }

            #accessors

            impl #rt::Validate for #name {
                fn validate(&self) -> ::std::vec::Vec<#rt::ValidationError> {
                    #validate
                }
            }

            impl #rt::Model for #name {
                const SHAPE: #rt::Shape = #rt::Shape::Object;

                fn from_value(raw: &#rt::serde_json::Value) -> ::std::result::Result<Self, #rt::ParseError> {
                    #from_value
                }

                fn serialize(&self) -> #rt::serde_json::Value {
                    #serialize
                }
            }

            impl #rt::Field for #name {
                type Raw = Self;

                fn get(&self) -> &Self {
                    self
                }

                fn set(&mut self, raw: Self) {
                    *self = raw;
                }
            }
        })
    }

    fn accessors(&self, field: &FieldPlan, member: &Ident, ty: &Ident) -> TokenStream {
        let rt = &self.rt;
        let setter = format_ident!("set_{}", field.accessor);
        let docs = self.docs(field.description.as_deref());

        quote! {
            #docs
            pub fn #member(&self) -> &< #ty as #rt::Field >::Raw {
                #rt::Field::get(&self.#member)
            }

            pub fn #setter(&mut self, value: < #ty as #rt::Field >::Raw) {
                #rt::Field::set(&mut self.#member, value);
            }
        }
    }
}

fn float(value: f64) -> TokenStream {
    let literal = Literal::f64_unsuffixed(value.abs());
    if value.is_sign_negative() && value != 0.0 {
        quote! { -#literal }
    } else {
        quote! { #literal }
    }
}
