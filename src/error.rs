//! Unified compiler error type used across all phases.

use serde::Serialize;

use crate::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Parse,
    Validate,
    Lower,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Lower => write!(f, "Lower"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("[{phase}:{code}] {message}{}", location_suffix(.step_index, .path))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    /// Zero-based index of the offending step, when one is known.
    pub step_index: Option<usize>,
    /// Root-relative JSON pointer into the definition (schema violations only).
    pub path: Option<String>,
}

fn location_suffix(step_index: &Option<usize>, path: &Option<String>) -> String {
    match (step_index, path) {
        (_, Some(path)) if !path.is_empty() => format!(" (at {})", path),
        (Some(index), _) => format!(" (step {})", index),
        _ => String::new(),
    }
}

impl From<ValidationError> for CompilerError {
    fn from(e: ValidationError) -> Self {
        CompilerError {
            code: "S001".into(),
            phase: Phase::Validate,
            step_index: e.step_index(),
            message: e.message,
            path: Some(e.path),
        }
    }
}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            step_index: None,
            path: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            step_index: None,
            path: None,
        }
    }

    pub fn lower(code: &str, message: impl Into<String>, step_index: Option<usize>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Lower,
            message: message.into(),
            step_index,
            path: None,
        }
    }

    /// Attach a step index if none was recorded yet.
    pub fn at_step(mut self, index: usize) -> Self {
        self.step_index.get_or_insert(index);
        self
    }
}
