//! # schemabox
//!
//! Generate typed data-model classes from a JSON entity schema.
//!
//! ## Usage
//!
//! ```bash
//! # Generate Rust models from schema.json into ./generated/models.rs
//! schemabox generate
//!
//! # Generate TypeScript models into a specific directory
//! schemabox generate --target ts --output ./web/src/models
//!
//! # Regenerate whenever the schema changes
//! schemabox generate --watch
//!
//! # Report schema problems without generating
//! schemabox lint --input schema.json
//!
//! # Fail (exit code 2) when a generated file is stale
//! schemabox check --path ./generated/models.rs
//!
//! # Write a commented schemabox.toml
//! schemabox init
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use schemabox_codegen::{Diagnostic, LintReport, Schema, Severity, Target};
use tracing_subscriber::EnvFilter;

use schemabox_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, CliResult, ConfigError},
    pipeline::{self, Pipeline},
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "schemabox")]
#[command(author, version, about = "Generate typed data models from an entity schema", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a model file from a schema
    Generate {
        /// Schema document
        #[arg(short, long, default_value = "schema.json")]
        input: PathBuf,

        /// Output directory for the generated file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output filename
        #[arg(long)]
        file: Option<String>,

        /// Output language (rust or typescript)
        #[arg(short, long)]
        target: Option<Target>,

        /// Watch the schema and regenerate on change
        #[arg(short, long)]
        watch: bool,

        /// Preview output without writing files
        #[arg(long)]
        dry_run: bool,

        /// Generate even when the schema has lint errors
        #[arg(long)]
        no_lint: bool,

        /// Omit doc comments taken from schema descriptions
        #[arg(long)]
        no_docs: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Report schema problems
    Lint {
        /// Schema document
        #[arg(short, long, default_value = "schema.json")]
        input: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        deny_warnings: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check that a generated file is up to date with its schema
    Check {
        /// Generated file to compare
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Schema document
        #[arg(short, long, default_value = "schema.json")]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default schemabox.toml
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = schemabox_cli::CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr. `SCHEMABOX_LOG` overrides the level set by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SCHEMABOX_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            file,
            target,
            watch,
            dry_run,
            no_lint,
            no_docs,
            config,
        } => {
            let args = CliArgs {
                output,
                output_file: file,
                target,
                generate_docs: no_docs.then_some(false),
                ..Default::default()
            };
            let config = load_config(config.as_deref(), &args)?;
            if watch {
                run_watch_mode(&input, &config, dry_run, no_lint)
            } else {
                run_generate(&input, &config, dry_run, no_lint)
            }
        }

        Commands::Lint {
            input,
            deny_warnings,
            json,
            config,
        } => {
            let args = CliArgs {
                deny_warnings: deny_warnings.then_some(true),
                ..Default::default()
            };
            let config = load_config(config.as_deref(), &args)?;
            cmd_lint(&input, &config, json)
        }

        Commands::Check {
            path,
            input,
            config,
        } => {
            let config = load_config(config.as_deref(), &CliArgs::default())?;
            cmd_check(path, &input, &config)
        }

        Commands::Init { output, force } => cmd_init(&output, force),
    }
}

fn load_config(path: Option<&Path>, args: &CliArgs) -> CliResult<Config> {
    let config = ConfigManager::load(path)?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Run generation once.
fn run_generate(input: &Path, config: &Config, dry_run: bool, no_lint: bool) -> CliResult<()> {
    println!(
        "{} {}",
        "Generating models from".cyan(),
        input.display()
    );

    let generation = Pipeline::new(config)
        .skip_lint(no_lint)
        .run_path(input)
        .inspect_err(|e| {
            if let CliError::Lint { report } = e {
                print_report(report);
            }
        })?;

    print_report(&generation.report);
    println!(
        "  Generated {} {} type(s)",
        generation.generated.type_names.len().to_string().green(),
        config.output.target
    );

    let writer = FileWriter::new(dry_run);
    match writer.write(&config.output_path(), &generation.generated.code)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is up to date", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(input: &Path, config: &Config, dry_run: bool, no_lint: bool) -> CliResult<()> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", input.display());
    println!("  Press Ctrl+C to stop\n");

    // A broken schema on startup should not end the session.
    if let Err(e) = run_generate(input, config, dry_run, no_lint) {
        print_error(&e);
    }

    let watcher = FileWatcher::new(input);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(message) = event.error_message() {
            println!("{} {}", "Watch error:".red(), message);
            continue;
        }

        if !input.exists() {
            println!("{} {}", "Schema removed:".yellow(), input.display());
            continue;
        }

        println!("\n{} {}", "Schema changed:".cyan(), input.display());
        if let Err(e) = run_generate(input, config, dry_run, no_lint) {
            print_error(&e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Lint command implementation.
fn cmd_lint(input: &Path, config: &Config, json: bool) -> CliResult<()> {
    let schema = Schema::from_path(input)?;
    let report = schemabox_codegen::lint(&schema);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?
        );
    } else {
        print_report(&report);
    }

    if !report.passes(config.lint.deny_warnings) {
        return Err(CliError::Lint { report });
    }
    if !json {
        println!("{} {} is clean", "✓".green(), input.display());
    }
    Ok(())
}

/// Check command implementation.
fn cmd_check(path: Option<PathBuf>, input: &Path, config: &Config) -> CliResult<()> {
    println!("{}", "Checking generated models...".cyan());

    let path = path.unwrap_or_else(|| config.output_path());
    let generation = Pipeline::new(config).run_path(input)?;

    match pipeline::verify(&path, &generation.generated) {
        Ok(()) => {
            println!("{} {} is up to date", "✓".green(), path.display());
            Ok(())
        }
        Err(e) => {
            println!("{} {} is out of date", "✗".red(), path.display());
            println!("  Run 'schemabox generate' to update");
            Err(e)
        }
    }
}

/// Init command implementation.
fn cmd_init(output: &Path, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(ConfigError::AlreadyExists {
            path: output.to_path_buf(),
        }
        .into());
    }

    std::fs::write(output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

fn print_report(report: &LintReport) {
    for diagnostic in &report.diagnostics {
        println!("  {}", format_diagnostic(diagnostic));
    }
}

fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };
    format!("{}: {}: {}", label, diagnostic.path.bold(), diagnostic.message)
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
