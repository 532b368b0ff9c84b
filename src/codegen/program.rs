//! Program skeleton: header, input prologue, steps array, execution loop.
//!
//! The generated text is the body of an async function. The host wraps it,
//! binds `page`, and swaps [`INPUT_DATA_PLACEHOLDER`] for a JSON object
//! before evaluation.

use super::step::emit_step;
use super::writer::CodeWriter;
use crate::ir::types::*;

/// Token the host replaces with the serialized runtime input.
pub const INPUT_DATA_PLACEHOLDER: &str = "__INPUT_DATA__";

pub fn emit_program(ir: &ProgramIR) -> String {
    let mut w = CodeWriter::new();

    emit_header(&ir.header, &mut w);
    w.blank();

    w.line(&format!(
        "const {{ extract = {{}}, constants = {{}}, input = {{}}, startFromStep = 0 }} = {};",
        INPUT_DATA_PLACEHOLDER
    ));
    w.blank();

    emit_steps(&ir.steps, &mut w);
    w.blank();

    emit_results(&mut w);
    w.blank();

    emit_loop(&mut w);
    w.blank();

    w.line("return results;");
    w.finish()
}

fn emit_header(header: &ProgramHeader, w: &mut CodeWriter) {
    w.comment(&format!("Workflow: {}", single_line(&header.workflow_name)));
    w.comment(&format!("Source: {}", single_line(&header.source)));
    if let Some(description) = header.description.as_deref().filter(|d| !d.trim().is_empty()) {
        w.line("//");
        w.comment(description);
    }
}

fn single_line(text: &str) -> String {
    text.split(['\n', '\r'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn emit_steps(steps: &[StepIR], w: &mut CodeWriter) {
    w.open_with("const steps = [");
    for (i, step) in steps.iter().enumerate() {
        emit_step(step, i + 1 == steps.len(), w);
    }
    w.block_close_with("];");
}

fn emit_results(w: &mut CodeWriter) {
    w.open_with("const results = {");
    w.line("success: true,");
    w.line("completedSteps: [],");
    w.line("failedStep: null,");
    w.line("output: {},");
    w.block_close_with("};");
}

fn emit_loop(w: &mut CodeWriter) {
    w.block_open("for (let i = startFromStep; i < steps.length; i++)");
    w.line("const step = steps[i];");
    w.block_open("try");
    w.line("const result = await step.execute();");
    w.line("results.completedSteps.push({ index: i, name: step.name, success: true });");
    w.block_open("if (step.output && result !== undefined)");
    w.line("results.output[step.output] = result;");
    w.block_close();
    w.dedent();
    w.block_open("} catch (error)");
    w.line("results.success = false;");
    w.open_with("results.failedStep = {");
    w.line("index: i,");
    w.line("name: step.name,");
    w.line("selector: step.selector,");
    w.line("hint: step.hint,");
    w.line("error: error instanceof Error ? error.message : String(error),");
    w.block_close_with("};");
    w.line("break;");
    w.block_close();
    w.block_close();
}
