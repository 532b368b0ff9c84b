//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::compile::{CompileOptions, CompiledProgram, Compiler};
use crate::error::CompilerError;
use crate::validate::ValidationError;

/// Compiler handle for JS hosts. Construct once and reuse it, so the
/// bundled schema is compiled a single time.
#[wasm_bindgen]
pub struct WorkflowCompiler {
    inner: Compiler,
}

#[wasm_bindgen]
impl WorkflowCompiler {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WorkflowCompiler, JsValue> {
        let inner = Compiler::new().map_err(|e| {
            serde_wasm_bindgen::to_value(&ErrorDto::from(e)).unwrap_or(JsValue::NULL)
        })?;
        Ok(WorkflowCompiler { inner })
    }

    /// Validate workflow YAML (or JSON) against the bundled schema.
    /// Returns `{ valid, errors }`.
    pub fn validate(&self, text: &str) -> JsValue {
        let result = validate_workflow_inner(&self.inner, text);
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Full pipeline: parse → validate → lower → codegen.
    /// Returns `{ status: "success", ... }` or `{ status: "errors", errors }`.
    pub fn compile(&self, text: &str, source: Option<String>) -> JsValue {
        let result = compile_workflow_inner(&self.inner, text, source);
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }
}

thread_local! {
    static SHARED: Result<Compiler, CompilerError> = Compiler::new();
}

/// One-shot form of [`WorkflowCompiler::validate`] backed by a compiler
/// shared across calls on this thread.
#[wasm_bindgen]
pub fn validate_workflow(text: &str) -> JsValue {
    let result = SHARED.with(|shared| match shared {
        Ok(compiler) => validate_workflow_inner(compiler, text),
        Err(e) => ValidateResult::failed(vec![ErrorDto::from(e.clone())]),
    });
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// One-shot form of [`WorkflowCompiler::compile`].
#[wasm_bindgen]
pub fn compile_workflow(text: &str, source: Option<String>) -> JsValue {
    let result = SHARED.with(|shared| match shared {
        Ok(compiler) => compile_workflow_inner(compiler, text, source),
        Err(e) => CompileResult::Errors {
            errors: vec![ErrorDto::from(e.clone())],
        },
    });
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(compiler: &Compiler, text: &str) -> ValidateResult {
    match compiler.validate_str(text) {
        Ok(report) => ValidateResult {
            valid: report.valid,
            errors: report.errors.into_iter().map(ErrorDto::from).collect(),
        },
        Err(errors) => ValidateResult::failed(errors.into_iter().map(ErrorDto::from).collect()),
    }
}

fn compile_workflow_inner(compiler: &Compiler, text: &str, source: Option<String>) -> CompileResult {
    let options = source.map(CompileOptions::with_source).unwrap_or_default();
    match compiler.compile_str(text, &options) {
        Ok(program) => CompileResult::Success(program),
        Err(errors) => CompileResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    step_index: Option<usize>,
    path: Option<String>,
    keyword: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            step_index: e.step_index,
            path: e.path,
            keyword: None,
        }
    }
}

impl From<ValidationError> for ErrorDto {
    fn from(e: ValidationError) -> Self {
        let keyword = Some(e.keyword.clone());
        ErrorDto {
            keyword,
            ..ErrorDto::from(CompilerError::from(e))
        }
    }
}

#[derive(serde::Serialize)]
struct ValidateResult {
    valid: bool,
    errors: Vec<ErrorDto>,
}

impl ValidateResult {
    fn failed(errors: Vec<ErrorDto>) -> Self {
        ValidateResult {
            valid: false,
            errors,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success(CompiledProgram),
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
