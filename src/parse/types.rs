//! Serde target for the human-authored workflow YAML.
//!
//! These types mirror the document shape one-to-one and stay deliberately
//! loose: `action` is a plain string and every action-specific field is
//! optional. Narrowing into the closed action set happens during lowering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Identifier, also used to derive the default output file name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Execution order is the sequence order.
    pub steps: Vec<StepDefinition>,
}

// =============================================================================
// STEPS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepDefinition {
    pub name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Milliseconds, `wait` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<WhenClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Free text for a human or agent fallback. Never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StepDefinition {
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        StepDefinition {
            name: name.into(),
            action: action.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// GUARDS
// =============================================================================

/// Either `{field, op, value}` or `{conditions, match}`.
///
/// Both shapes share one struct so that a clause carrying neither, or both,
/// still deserializes and can be rejected with a precise message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhenClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<String>,
}

impl WhenClause {
    pub fn simple(field: impl Into<String>, op: impl Into<String>, value: Value) -> Self {
        WhenClause {
            field: Some(field.into()),
            op: Some(op.into()),
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn compound(conditions: Vec<Condition>, match_mode: Option<&str>) -> Self {
        WhenClause {
            conditions: Some(conditions),
            match_mode: match_mode.map(str::to_string),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Bare expression in the generated program, e.g. `extract.count`.
    pub field: String,
    pub op: String,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: Value) -> Self {
        Condition {
            field: field.into(),
            op: op.into(),
            value,
        }
    }
}
