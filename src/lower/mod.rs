//! Lowering phase: WorkflowDefinition → ProgramIR.
//!
//! Resolves each step's action into the closed action set, parses
//! interpolation tokens and turns `when` clauses into guards. Errors from
//! every step are collected before giving up.

pub mod action;
pub mod interpolate;
pub mod when;

use std::collections::HashSet;

use crate::error::CompilerError;
use crate::ir::types::*;
use crate::parse::types::{StepDefinition, WorkflowDefinition};

pub const TRACING_TARGET_LOWER: &str = "workflow_compiler::lower";

/// Lower a parsed workflow into a ProgramIR.
pub fn lower(definition: &WorkflowDefinition, source: &str) -> Result<ProgramIR, Vec<CompilerError>> {
    if definition.steps.is_empty() {
        return Err(vec![CompilerError::lower(
            "L005",
            "Workflow must contain at least one step",
            None,
        )]);
    }

    let mut steps = Vec::with_capacity(definition.steps.len());
    let mut errors = Vec::new();

    for (index, step) in definition.steps.iter().enumerate() {
        match lower_step(step, index) {
            Ok(lowered) => steps.push(lowered),
            Err(step_errors) => errors.extend(step_errors),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    warn_on_duplicates(&steps);

    Ok(ProgramIR {
        header: ProgramHeader {
            workflow_name: definition.name.clone(),
            source: source.to_string(),
            description: definition.description.clone(),
        },
        steps,
    })
}

/// Lower a single step.
pub fn lower_step(step: &StepDefinition, index: usize) -> Result<StepIR, Vec<CompilerError>> {
    let action = action::lower_action(step, index);
    let guard = step
        .when
        .as_ref()
        .map(|w| when::lower_when(w).map_err(|e| e.at_step(index)))
        .transpose();

    match (action, guard) {
        (Ok(action), Ok(guard)) => Ok(StepIR {
            index,
            name: step.name.clone(),
            action,
            guard,
            output: step.output.clone(),
            hint: step.hint.clone(),
        }),
        (action, guard) => Err(action.err().into_iter().chain(guard.err()).collect()),
    }
}

/// Names and output keys are not required to be unique, but a repeat makes
/// failure reports ambiguous and lets a later step overwrite an output.
fn warn_on_duplicates(steps: &[StepIR]) {
    let mut names = HashSet::new();
    let mut outputs = HashSet::new();
    for step in steps {
        if !names.insert(step.name.as_str()) {
            tracing::warn!(
                target: TRACING_TARGET_LOWER,
                step = step.index,
                name = %step.name,
                "duplicate step name"
            );
        }
        if let Some(output) = &step.output {
            if !outputs.insert(output.as_str()) {
                tracing::warn!(
                    target: TRACING_TARGET_LOWER,
                    step = step.index,
                    output = %output,
                    "duplicate output key, later step overwrites the earlier result"
                );
            }
        }
    }
}
