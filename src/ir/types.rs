//! IR type definitions for the workflow compiler.
//!
//! The IR sits between the loose YAML model and the emitted JavaScript. A
//! program is a header, a fixed prologue, an ordered step list and a fixed
//! execution loop; only the header and the steps vary, so only they are
//! represented here. Every step carries exactly one closed [`Action`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Milliseconds a `wait` step allows when the definition gives no timeout.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// TOP-LEVEL IR
// =============================================================================

/// Complete intermediate representation of one compiled workflow.
/// Produced by the lowering pass, consumed by the codegen pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramIR {
    pub header: ProgramHeader,
    /// Execution order.
    pub steps: Vec<StepIR>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramHeader {
    pub workflow_name: String,
    /// Where the definition came from, e.g. the input path.
    pub source: String,
    pub description: Option<String>,
}

// =============================================================================
// STEPS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepIR {
    /// Position in the definition, zero-based.
    pub index: usize,
    pub name: String,
    pub action: Action,
    /// Wraps the action body in `if (...) { ... }` when present.
    pub guard: Option<Guard>,
    /// Key under `results.output` receiving the execute result.
    pub output: Option<String>,
    pub hint: Option<String>,
}

impl StepIR {
    pub fn selector(&self) -> Option<&str> {
        self.action.selector()
    }
}

/// The closed set of browser actions. Each variant carries exactly the
/// fields its code needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// `page.goto(url)` then wait for DOM content.
    Navigate { url: ValueExpr },
    Fill { selector: String, value: ValueExpr },
    Click { selector: String },
    Press { selector: String, key: String },
    Wait { selector: String, timeout_ms: u64 },
    /// Verbatim user code, never inspected.
    RawCode { code: String },
}

impl Action {
    /// The action name as written in workflow definitions.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::Fill { .. } => "fill",
            Action::Click { .. } => "click",
            Action::Press { .. } => "press",
            Action::Wait { .. } => "wait",
            Action::RawCode { .. } => "playwright_code",
        }
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            Action::Fill { selector, .. }
            | Action::Click { selector }
            | Action::Press { selector, .. }
            | Action::Wait { selector, .. } => Some(selector),
            Action::Navigate { .. } | Action::RawCode { .. } => None,
        }
    }
}

// =============================================================================
// VALUE EXPRESSIONS
// =============================================================================

/// A value passed to a browser call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueExpr {
    /// Emitted through the literal formatter: `"text"`, `42`, `true`, `[1,2]`.
    Literal { value: Value },
    /// A whole-string `${ns.id}` token, emitted bare so the runtime value
    /// keeps its native type.
    Variable(VariableRef),
    /// Literal text with embedded tokens, emitted as a template literal.
    Template { parts: Vec<TemplatePart> },
}

impl ValueExpr {
    pub fn string(s: impl Into<String>) -> Self {
        ValueExpr::Literal {
            value: Value::String(s.into()),
        }
    }

    pub fn literal(value: Value) -> Self {
        ValueExpr::Literal { value }
    }

    pub fn variable(namespace: Namespace, identifier: impl Into<String>) -> Self {
        ValueExpr::Variable(VariableRef {
            namespace,
            identifier: identifier.into(),
        })
    }
}

/// The runtime scopes a token may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Extract,
    Input,
    Constants,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Extract => "extract",
            Namespace::Input => "input",
            Namespace::Constants => "constants",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "extract" => Some(Namespace::Extract),
            "input" => Some(Namespace::Input),
            "constants" => Some(Namespace::Constants),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRef {
    pub namespace: Namespace,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "part_type", rename_all = "snake_case")]
pub enum TemplatePart {
    Lit { value: String },
    Var { value: VariableRef },
}

// =============================================================================
// GUARDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub conditions: Vec<ConditionIR>,
    pub combine: LogicCombinator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionIR {
    /// Bare expression, emitted verbatim.
    pub field: String,
    pub operator: ComparisonOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Equals,
    NotEquals,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOp {
    /// Parse the operator as written in a workflow definition.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(ComparisonOp::Equals),
            "!=" => Some(ComparisonOp::NotEquals),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Gte),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Lte),
            _ => None,
        }
    }

    /// The JavaScript operator. Equality is strict.
    pub fn js_operator(&self) -> &'static str {
        match self {
            ComparisonOp::Equals => "===",
            ComparisonOp::NotEquals => "!==",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicCombinator {
    And,
    Or,
}
