use std::path::PathBuf;

use schemabox_codegen::{generate, lint, GeneratorConfig, Schema, Target};

const SCHEMA: &str = "../schemabox-codegen/tests/fixtures/social.json";

fn main() {
    println!("cargo:rerun-if-changed={SCHEMA}");

    let schema = Schema::from_path(SCHEMA).unwrap();
    let report = lint(&schema);
    assert!(!report.has_errors(), "{:#?}", report.diagnostics);

    // `include!` cannot take inner attributes, so no header.
    let config = GeneratorConfig::new().with_header(false);
    let generated = generate(&schema, Target::Rust, &config).unwrap();

    let out = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("social.rs");
    std::fs::write(out, generated.code).unwrap();
}
