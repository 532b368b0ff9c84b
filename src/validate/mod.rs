//! Schema validation phase.
//!
//! The workflow schema ships with the crate and is compiled exactly once into
//! a [`SchemaValidator`]. Callers hold that value and pass it wherever a
//! document has to be checked; nothing here is global.

use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::CompilerError;

pub const TRACING_TARGET_VALIDATE: &str = "workflow_compiler::validate";

/// Draft-07 schema describing the workflow document.
pub const WORKFLOW_SCHEMA: &str = include_str!("../../schema/workflow.schema.json");

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Root-relative JSON pointer, e.g. `/steps/1`. Empty for the root.
    pub path: String,
    pub message: String,
    /// The violated rule class, e.g. `required` or `enum`.
    pub keyword: String,
    pub params: Value,
}

impl ValidationError {
    /// Index of the step this violation sits in, if any.
    pub fn step_index(&self) -> Option<usize> {
        self.path
            .strip_prefix("/steps/")?
            .split('/')
            .next()?
            .parse()
            .ok()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {} [{}]", path, self.message, self.keyword)
    }
}

/// Serializable outcome for the CLI and wasm surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl From<Result<(), Vec<ValidationError>>> for ValidationReport {
    fn from(result: Result<(), Vec<ValidationError>>) -> Self {
        match result {
            Ok(()) => ValidationReport {
                valid: true,
                errors: Vec::new(),
            },
            Err(errors) => ValidationReport {
                valid: false,
                errors,
            },
        }
    }
}

/// The compiled workflow schema.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compile the bundled workflow schema.
    pub fn new() -> Result<Self, CompilerError> {
        let schema: Value = serde_json::from_str(WORKFLOW_SCHEMA).map_err(|e| {
            CompilerError::validate("S000", format!("Bundled workflow schema is not JSON: {}", e))
        })?;
        Self::from_schema(&schema)
    }

    /// Compile an arbitrary schema document.
    pub fn from_schema(schema: &Value) -> Result<Self, CompilerError> {
        let validator = jsonschema::validator_for(schema).map_err(|e| {
            CompilerError::validate("S000", format!("Invalid workflow schema: {}", e))
        })?;
        tracing::debug!(target: TRACING_TARGET_VALIDATE, "workflow schema compiled");
        Ok(SchemaValidator { validator })
    }

    /// Check a document tree, reporting every violation at once.
    pub fn validate(&self, document: &Value) -> Result<(), Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = self
            .validator
            .iter_errors(document)
            .map(|e| {
                let schema_path = e.schema_path.to_string();
                let keyword = schema_path
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                ValidationError {
                    path: e.instance_path.to_string(),
                    message: e.to_string(),
                    keyword,
                    params: params_for(&e.kind),
                }
            })
            .collect();

        if errors.is_empty() {
            return Ok(());
        }

        errors.sort_by(|a, b| {
            (&a.path, &a.keyword, &a.message).cmp(&(&b.path, &b.keyword, &b.message))
        });
        errors.dedup();
        tracing::debug!(
            target: TRACING_TARGET_VALIDATE,
            count = errors.len(),
            "workflow failed schema validation"
        );
        Err(errors)
    }

    /// Check a document tree and fold the outcome into a report.
    pub fn report(&self, document: &Value) -> ValidationReport {
        self.validate(document).into()
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

fn params_for(kind: &ValidationErrorKind) -> Value {
    match kind {
        ValidationErrorKind::Required { property } => json!({ "missingProperty": property }),
        ValidationErrorKind::Enum { options } => json!({ "allowedValues": options }),
        ValidationErrorKind::MinItems { limit } => json!({ "limit": limit }),
        ValidationErrorKind::MinLength { limit } => json!({ "limit": limit }),
        _ => json!({}),
    }
}
