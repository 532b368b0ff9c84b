//! Parse phase: YAML text → document tree → typed workflow definition.
//!
//! The document tree (`serde_json::Value`) is what the schema validator sees;
//! the typed definition is only built once the tree has passed validation.

pub mod types;

pub use types::*;

use serde::Deserialize;
use serde_json::Value;

use crate::error::CompilerError;

/// Deserialize workflow text (YAML, or JSON as a YAML subset) into a plain tree.
pub fn parse_document(text: &str) -> Result<Value, Vec<CompilerError>> {
    serde_yaml::from_str::<Value>(text).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse workflow YAML: {}", e),
        )]
    })
}

/// Build the typed definition from an already validated document tree.
pub fn parse_definition(document: &Value) -> Result<WorkflowDefinition, Vec<CompilerError>> {
    WorkflowDefinition::deserialize(document).map_err(|e| {
        vec![CompilerError::parse(
            "P002",
            format!("Workflow does not match the expected shape: {}", e),
        )]
    })
}

/// Parse text straight into a typed definition, skipping schema validation.
pub fn parse(text: &str) -> Result<WorkflowDefinition, Vec<CompilerError>> {
    let document = parse_document(text)?;
    parse_definition(&document)
}
