//! Emit one step record of the `steps` array.
//!
//! A record is an object literal with `name`, `action`, optional `selector`,
//! an async `execute` function, and optional `output` and `hint`.

use super::value_expr::{emit_guard, emit_value_expr, quote};
use super::writer::CodeWriter;
use crate::error::CompilerError;
use crate::ir::types::*;
use crate::lower::lower_step;
use crate::parse::types::StepDefinition;

/// Emit a step record. Every record but the last ends with a comma.
pub fn emit_step(step: &StepIR, is_last: bool, w: &mut CodeWriter) {
    w.open_with("{");
    w.line(&format!("name: {},", quote(&step.name)));
    w.line(&format!("action: {},", quote(step.action.kind())));
    if let Some(selector) = step.selector() {
        w.line(&format!("selector: {},", quote(selector)));
    }

    w.block_open("execute: async () =>");
    match &step.guard {
        Some(guard) => {
            w.block_open(&format!("if ({})", emit_guard(guard)));
            emit_action(&step.action, w);
            w.block_close();
        }
        None => emit_action(&step.action, w),
    }
    w.block_close_with("},");

    if let Some(output) = &step.output {
        w.line(&format!("output: {},", quote(output)));
    }
    if let Some(hint) = &step.hint {
        w.line(&format!("hint: {},", quote(hint)));
    }
    w.block_close_with(if is_last { "}" } else { "}," });
}

fn emit_action(action: &Action, w: &mut CodeWriter) {
    match action {
        Action::Navigate { url } => {
            w.line(&format!("await page.goto({});", emit_value_expr(url)));
            w.line("await page.waitForLoadState(\"domcontentloaded\");");
        }
        Action::Fill { selector, value } => {
            w.line(&format!(
                "await page.fill({}, {});",
                quote(selector),
                emit_value_expr(value)
            ));
        }
        Action::Click { selector } => {
            w.line(&format!("await page.click({});", quote(selector)));
        }
        Action::Press { selector, key } => {
            w.line(&format!(
                "await page.press({}, {});",
                quote(selector),
                quote(key)
            ));
        }
        Action::Wait {
            selector,
            timeout_ms,
        } => {
            w.line(&format!(
                "await page.waitForSelector({}, {{ timeout: {} }});",
                quote(selector),
                timeout_ms
            ));
        }
        Action::RawCode { code } => w.verbatim(code),
    }
}

/// Lower and render a single step definition on its own.
pub fn generate_step(
    step: &StepDefinition,
    index: usize,
    is_last: bool,
) -> Result<String, Vec<CompilerError>> {
    let lowered = lower_step(step, index)?;
    let mut w = CodeWriter::new();
    emit_step(&lowered, is_last, &mut w);
    Ok(w.finish())
}
