//! Load, lint and generate in one pass.

use std::path::Path;

use schemabox_codegen::{generate, lint, GeneratedCode, LintReport, Schema};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Output of one pipeline run.
#[derive(Debug)]
pub struct Generation {
    pub generated: GeneratedCode,
    pub report: LintReport,
}

/// Runs a schema through lint and generation under a [`Config`].
pub struct Pipeline<'a> {
    config: &'a Config,
    skip_lint: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            skip_lint: false,
        }
    }

    /// Generate even when the schema has lint errors.
    pub fn skip_lint(mut self, skip: bool) -> Self {
        self.skip_lint = skip;
        self
    }

    /// Load the schema at `path` and run it.
    pub fn run_path(&self, path: &Path) -> CliResult<Generation> {
        let schema = Schema::from_path(path)?;
        tracing::debug!(
            path = %path.display(),
            nodes = schema.node_count(),
            "loaded schema"
        );
        self.run(&schema)
    }

    pub fn run(&self, schema: &Schema) -> CliResult<Generation> {
        let report = if self.skip_lint {
            LintReport::default()
        } else {
            check(schema, self.config.lint.deny_warnings)?
        };

        let generated = generate(
            schema,
            self.config.output.target,
            &self.config.generator_config(),
        )?;

        Ok(Generation { generated, report })
    }
}

/// Lint `schema`, failing when the report does not pass.
pub fn check(schema: &Schema, deny_warnings: bool) -> CliResult<LintReport> {
    let report = lint(schema);
    for diagnostic in &report.diagnostics {
        tracing::debug!(%diagnostic, "lint");
    }

    if report.passes(deny_warnings) {
        Ok(report)
    } else {
        Err(CliError::Lint { report })
    }
}

/// Fail with [`CliError::OutOfDate`] unless `path` holds `generated`.
///
/// Trailing whitespace is ignored so editors adding a final newline do not
/// trip the check.
pub fn verify(path: &Path, generated: &GeneratedCode) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::OutOfDate(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let existing = std::fs::read_to_string(path)?;
    if existing.trim_end() == generated.code.trim_end() {
        Ok(())
    } else {
        Err(CliError::OutOfDate(format!(
            "{} does not match the schema",
            path.display()
        )))
    }
}
