//! Compiler entry point: text → validate → parse → lower → codegen.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::codegen::codegen;
use crate::error::CompilerError;
use crate::lower::lower;
use crate::parse::{parse_definition, parse_document};
use crate::validate::{SchemaValidator, ValidationReport};

pub const TRACING_TARGET_COMPILE: &str = "workflow_compiler::compile";

/// Label used in the program header when the caller gives none.
pub const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Where the definition came from; rendered into the header comment.
    pub source: String,
}

impl CompileOptions {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::with_source(INLINE_SOURCE)
    }
}

/// A successfully compiled workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledProgram {
    pub workflow_name: String,
    pub step_count: usize,
    pub text: String,
}

/// Holds the compiled schema so it is built once and reused per call.
#[derive(Debug)]
pub struct Compiler {
    validator: SchemaValidator,
}

impl Compiler {
    pub fn new() -> Result<Self, CompilerError> {
        Ok(Self::with_validator(SchemaValidator::new()?))
    }

    pub fn with_validator(validator: SchemaValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Deserialize and schema-check `text`. Deserialization failures are
    /// errors; schema violations are reported in the returned report.
    pub fn validate_str(&self, text: &str) -> Result<ValidationReport, Vec<CompilerError>> {
        let document = parse_document(text)?;
        Ok(self.validator.report(&document))
    }

    pub fn compile_str(
        &self,
        text: &str,
        options: &CompileOptions,
    ) -> Result<CompiledProgram, Vec<CompilerError>> {
        let document = parse_document(text)?;
        self.compile_value(&document, options)
    }

    /// Compile an already deserialized document. Nothing is produced unless
    /// every phase succeeds.
    pub fn compile_value(
        &self,
        document: &Value,
        options: &CompileOptions,
    ) -> Result<CompiledProgram, Vec<CompilerError>> {
        tracing::debug!(target: TRACING_TARGET_COMPILE, source = %options.source, "validating");
        self.validator
            .validate(document)
            .map_err(|errors| errors.into_iter().map(CompilerError::from).collect::<Vec<_>>())?;

        let definition = parse_definition(document)?;

        tracing::debug!(target: TRACING_TARGET_COMPILE, workflow = %definition.name, "lowering");
        let ir = lower(&definition, &options.source)?;

        let text = codegen(&ir);
        tracing::info!(
            target: TRACING_TARGET_COMPILE,
            workflow = %ir.header.workflow_name,
            steps = ir.steps.len(),
            "compiled workflow"
        );

        Ok(CompiledProgram {
            workflow_name: ir.header.workflow_name,
            step_count: ir.steps.len(),
            text,
        })
    }
}

/// `<dir>/<name>.js`, with path separators and whitespace in `name`
/// replaced by `-`.
pub fn default_output_path(dir: &Path, name: &str) -> PathBuf {
    let file_stem: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '-'
            } else {
                c
            }
        })
        .collect();
    dir.join(format!("{}.js", file_stem))
}
