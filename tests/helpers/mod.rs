#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::Value;
use workflow_compiler::ir::*;
use workflow_compiler::parse::types::*;

// =============================================================================
// Fixtures
// =============================================================================

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} should be readable: {}", name, e))
}

// =============================================================================
// Definition builders
// =============================================================================

pub fn workflow(name: &str, steps: Vec<StepDefinition>) -> WorkflowDefinition {
    WorkflowDefinition {
        name: name.into(),
        description: None,
        steps,
    }
}

pub fn navigate(name: &str, url: &str) -> StepDefinition {
    StepDefinition {
        url: Some(url.into()),
        ..StepDefinition::new(name, "navigate")
    }
}

pub fn fill(name: &str, selector: &str, value: Value) -> StepDefinition {
    StepDefinition {
        selector: Some(selector.into()),
        value: Some(value),
        ..StepDefinition::new(name, "fill")
    }
}

pub fn click(name: &str, selector: &str) -> StepDefinition {
    StepDefinition {
        selector: Some(selector.into()),
        ..StepDefinition::new(name, "click")
    }
}

pub fn press(name: &str, selector: &str, key: &str) -> StepDefinition {
    StepDefinition {
        selector: Some(selector.into()),
        key: Some(key.into()),
        ..StepDefinition::new(name, "press")
    }
}

pub fn wait(name: &str, selector: &str, timeout: Option<u64>) -> StepDefinition {
    StepDefinition {
        selector: Some(selector.into()),
        timeout,
        ..StepDefinition::new(name, "wait")
    }
}

pub fn raw_code(name: &str, code: &str) -> StepDefinition {
    StepDefinition {
        code: Some(code.into()),
        ..StepDefinition::new(name, "playwright_code")
    }
}

// =============================================================================
// IR builders
// =============================================================================

pub fn click_ir(index: usize) -> StepIR {
    StepIR {
        index,
        name: format!("step {}", index),
        action: Action::Click {
            selector: format!("#step-{}", index),
        },
        guard: None,
        output: None,
        hint: None,
    }
}

pub fn program_ir(steps: Vec<StepIR>) -> ProgramIR {
    ProgramIR {
        header: ProgramHeader {
            workflow_name: "test".into(),
            source: "test.yaml".into(),
            description: None,
        },
        steps,
    }
}
