//! Codegen pass: ProgramIR → self-contained JavaScript program text.
//!
//! Public API: `codegen(ir) -> String`, plus the per-step and per-expression
//! helpers the pass is built from.

mod program;
mod step;
mod value_expr;
mod writer;

pub use program::INPUT_DATA_PLACEHOLDER;
pub use step::generate_step;
pub use value_expr::{compile_condition, compile_when, format_value, map_operator, translate};
pub use writer::CodeWriter;

use crate::error::CompilerError;
use crate::ir::types::ProgramIR;
use crate::lower::lower;
use crate::parse::types::WorkflowDefinition;

/// Render a lowered program. Pure: the same IR always yields the same text.
pub fn codegen(ir: &ProgramIR) -> String {
    program::emit_program(ir)
}

/// Lower and render a parsed definition. `source` is echoed in the header.
pub fn assemble(definition: &WorkflowDefinition, source: &str) -> Result<String, Vec<CompilerError>> {
    let ir = lower(definition, source)?;
    Ok(codegen(&ir))
}
