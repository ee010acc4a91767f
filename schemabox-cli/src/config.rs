//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `schemabox.toml` files
//! and merging with command-line arguments.

use std::path::{Path, PathBuf};

use schemabox_codegen::{GeneratorConfig, IndentStyle, Target};
use serde::Deserialize;

use crate::error::{CliResult, ConfigError};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "schemabox.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where generated code goes.
    pub output: OutputConfig,

    /// How generated code looks.
    pub codegen: CodegenConfig,

    /// Lint gate before generation.
    pub lint: LintConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Output filename. Defaults to `models.<ext>` for the target.
    pub file: Option<String>,

    /// Output language.
    pub target: Target,
}

/// Code generation options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Path generated Rust code uses to reach the runtime.
    pub runtime_crate: String,

    /// Whether to emit schema descriptions as doc comments.
    pub generate_docs: bool,

    /// Whether to emit the "generated" header.
    pub header: bool,

    /// Indentation for TypeScript output.
    pub indent: IndentStyle,
}

/// Lint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Treat warnings as errors.
    pub deny_warnings: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            file: None,
            target: Target::Rust,
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            runtime_crate: defaults.runtime_crate,
            generate_docs: defaults.generate_docs,
            header: defaults.header,
            indent: defaults.indent,
        }
    }
}

impl Config {
    /// Full path of the generated file.
    pub fn output_path(&self) -> PathBuf {
        let file = match &self.output.file {
            Some(file) => file.clone(),
            None => format!(
                "models.{}",
                self.output.target.generator().file_extension()
            ),
        };
        self.output.dir.join(file)
    }

    /// Options handed to the code generator.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_header(self.codegen.header)
            .with_generate_docs(self.codegen.generate_docs)
            .with_runtime_crate(self.codegen.runtime_crate.clone())
            .with_indent(self.codegen.indent)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. Without one, `schemabox.toml` in the
    /// working directory is used if present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => return Err(ConfigError::not_found(path).into()),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            tracing::debug!("no configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(&config_path, e.to_string()))?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref file) = args.output_file {
            config.output.file = Some(file.clone());
        }

        if let Some(target) = args.target {
            config.output.target = target;
        }

        if let Some(generate_docs) = args.generate_docs {
            config.codegen.generate_docs = generate_docs;
        }

        if let Some(deny_warnings) = args.deny_warnings {
            config.lint.deny_warnings = deny_warnings;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# schemabox configuration file

[output]
# Output directory for generated files
dir = "./generated"

# Output file name (defaults to models.rs or models.ts for the target)
# file = "models.rs"

# Output language: "rust" or "typescript"
target = "rust"

[codegen]
# Path generated Rust code uses to reach the runtime crate
runtime_crate = "::schemabox"

# Whether to emit schema descriptions as doc comments
generate_docs = true

# Whether to emit a "generated, do not edit" header
header = true

# Indentation for TypeScript output: "spaces2", "spaces4" or "tabs"
indent = "spaces2"

[lint]
# Refuse to generate when the schema has lint warnings
deny_warnings = false
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Output filename override.
    pub output_file: Option<String>,

    /// Target override.
    pub target: Option<Target>,

    /// Generate docs override.
    pub generate_docs: Option<bool>,

    /// Deny warnings override.
    pub deny_warnings: Option<bool>,
}
