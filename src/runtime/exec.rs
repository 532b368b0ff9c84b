//! Sequential step loop with stop-on-first-failure.

use serde_json::Value;

use super::TRACING_TARGET_RUNTIME;
use super::result::{CompletedStep, ExecutionResult, FailedStep};
use crate::ir::types::StepIR;

/// A step's `execute` failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StepFailure {
    pub message: String,
}

impl StepFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Runs one step. `Ok(None)` is a step that produced no value.
///
/// The guard travels with the step; evaluating it is up to the executor.
pub trait StepExecutor {
    fn execute(&mut self, step: &StepIR) -> Result<Option<Value>, StepFailure>;
}

impl<F> StepExecutor for F
where
    F: FnMut(&StepIR) -> Result<Option<Value>, StepFailure>,
{
    fn execute(&mut self, step: &StepIR) -> Result<Option<Value>, StepFailure> {
        self(step)
    }
}

/// Run `steps[start_from_step..]` in order, stopping at the first failure.
///
/// Steps are never retried or reordered. A start index past the end runs
/// nothing and reports success.
pub fn run_steps<E>(steps: &[StepIR], start_from_step: usize, executor: &mut E) -> ExecutionResult
where
    E: StepExecutor + ?Sized,
{
    let mut results = ExecutionResult::new();

    for (i, step) in steps.iter().enumerate().skip(start_from_step) {
        tracing::debug!(target: TRACING_TARGET_RUNTIME, step = i, name = %step.name, "executing step");

        match executor.execute(step) {
            Ok(value) => {
                results.completed_steps.push(CompletedStep {
                    index: i,
                    name: step.name.clone(),
                    success: true,
                });
                if let (Some(key), Some(value)) = (&step.output, value) {
                    results.output.insert(key.clone(), value);
                }
            }
            Err(failure) => {
                tracing::warn!(
                    target: TRACING_TARGET_RUNTIME,
                    step = i,
                    name = %step.name,
                    error = %failure,
                    "step failed"
                );
                results.success = false;
                results.failed_step = Some(FailedStep {
                    index: i,
                    name: step.name.clone(),
                    selector: step.selector().map(String::from),
                    hint: step.hint.clone(),
                    error: failure.message,
                });
                break;
            }
        }
    }

    results
}
