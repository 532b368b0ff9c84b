//! Host-side view of a generated program's run.
//!
//! The generated program takes one injected input object and returns one
//! result object. The types here mirror both shapes so a Rust host can build
//! the input and decode the result. [`run_steps`] is the same loop written in
//! Rust, for hosts that drive steps themselves.

mod exec;
mod result;

pub use exec::{StepExecutor, StepFailure, run_steps};
pub use result::{CompletedStep, ExecutionResult, FailedStep};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codegen::INPUT_DATA_PLACEHOLDER;

pub const TRACING_TARGET_RUNTIME: &str = "workflow_compiler::runtime";

/// The object substituted for the input placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInput {
    #[serde(default)]
    pub extract: Map<String, Value>,
    #[serde(default)]
    pub constants: Map<String, Value>,
    #[serde(default)]
    pub input: Map<String, Value>,
    #[serde(default)]
    pub start_from_step: usize,
}

impl RuntimeInput {
    pub fn starting_at(step: usize) -> Self {
        Self {
            start_from_step: step,
            ..Self::default()
        }
    }

    /// The JSON literal that replaces the placeholder.
    pub fn render_input_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Substitute this input into program text.
    pub fn inject(&self, program: &str) -> Result<String, serde_json::Error> {
        Ok(program.replacen(INPUT_DATA_PLACEHOLDER, &self.render_input_data()?, 1))
    }
}
