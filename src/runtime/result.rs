//! The result object a generated program returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub completed_steps: Vec<CompletedStep>,
    pub failed_step: Option<FailedStep>,
    /// Step results keyed by each step's `output` name.
    #[serde(default)]
    pub output: BTreeMap<String, Value>,
}

impl ExecutionResult {
    pub fn new() -> Self {
        Self {
            success: true,
            completed_steps: Vec::new(),
            failed_step: None,
            output: BTreeMap::new(),
        }
    }

    /// Index to resume from after a fallback has handled the failed step.
    pub fn resume_index(&self) -> Option<usize> {
        self.failed_step.as_ref().map(|f| f.index + 1)
    }
}

impl Default for ExecutionResult {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedStep {
    pub index: usize,
    pub name: String,
    pub success: bool,
}

/// What a fallback needs to take over from a failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStep {
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    /// Message text only, never a stack.
    pub error: String,
}
