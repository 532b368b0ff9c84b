use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use workflow_compiler::compile::{CompileOptions, Compiler, default_output_path};
use workflow_compiler::error::CompilerError;

pub const TRACING_TARGET_CLI: &str = "workflow_compiler::cli";

/// Compile YAML browser-automation workflows into Playwright programs.
#[derive(Parser)]
#[command(name = "workflow-compiler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile a workflow into a JavaScript program
    Compile {
        /// Path to the workflow YAML file
        input: PathBuf,

        /// Write the program here instead of `<output-dir>/<name>.js`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for programs written under their workflow name
        #[arg(long, env = "WORKFLOW_OUTPUT_DIR", default_value = "generated")]
        output_dir: PathBuf,
    },

    /// Check a workflow against the schema without generating code
    Validate {
        /// Path to the workflow YAML file
        input: PathBuf,
    },
}

fn main() {
    init_tracing();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let compiler = Compiler::new().context("failed to compile the workflow schema")?;

    match cli.command {
        Commands::Compile {
            input,
            output,
            output_dir,
        } => compile(&compiler, &input, output, &output_dir),
        Commands::Validate { input } => validate(&compiler, &input),
    }
}

fn compile(
    compiler: &Compiler,
    input: &Path,
    output: Option<PathBuf>,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let options = CompileOptions::with_source(input.display().to_string());

    let program = match compiler.compile_str(&text, &options) {
        Ok(program) => program,
        Err(errors) => return fail(input, &errors),
    };

    let path = output.unwrap_or_else(|| default_output_path(output_dir, &program.workflow_name));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, &program.text)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(
        target: TRACING_TARGET_CLI,
        output = %path.display(),
        steps = program.step_count,
        "program written"
    );
    println!(
        "Compiled '{}' ({} steps) -> {}",
        program.workflow_name,
        program.step_count,
        path.display()
    );
    Ok(())
}

fn validate(compiler: &Compiler, input: &Path) -> anyhow::Result<()> {
    let text = read_input(input)?;

    let report = match compiler.validate_str(&text) {
        Ok(report) => report,
        Err(errors) => return fail(input, &errors),
    };

    if !report.valid {
        for error in &report.errors {
            eprintln!("  {}", error);
        }
        bail!(
            "{} is invalid ({} schema violation(s))",
            input.display(),
            report.errors.len()
        );
    }

    println!("{} is valid", input.display());
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn fail(input: &Path, errors: &[CompilerError]) -> anyhow::Result<()> {
    for error in errors {
        eprintln!("  {}", error);
    }
    bail!(
        "{} has {} error(s)",
        input.display(),
        errors.len()
    )
}

/// Log level comes from `RUST_LOG`, defaulting to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
