//! Values, interpolations and guards → JavaScript expression strings.

use serde_json::Value;

use crate::error::CompilerError;
use crate::ir::types::*;
use crate::lower::interpolate::parse_interpolation;
use crate::lower::when::{lower_condition, lower_when};
use crate::parse::types::{Condition, WhenClause};

/// Render a literal: strings quoted, numbers and booleans verbatim,
/// everything else as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// `==` and `!=` become strict; every other operator passes through.
pub fn map_operator(op: &str) -> &str {
    ComparisonOp::from_symbol(op).map_or(op, |op| op.js_operator())
}

/// Convert a `ValueExpr` into a JavaScript expression string.
pub fn emit_value_expr(expr: &ValueExpr) -> String {
    match expr {
        ValueExpr::Literal { value } => format_value(value),
        ValueExpr::Variable(var) => emit_variable(var),
        ValueExpr::Template { parts } => emit_template(parts),
    }
}

/// Translate a raw, possibly interpolated string straight to expression text.
pub fn translate(raw: &str) -> String {
    emit_value_expr(&parse_interpolation(raw))
}

fn emit_variable(var: &VariableRef) -> String {
    format!("{}.{}", var.namespace.as_str(), var.identifier)
}

fn emit_template(parts: &[TemplatePart]) -> String {
    let mut out = String::from("`");
    for part in parts {
        match part {
            TemplatePart::Lit { value } => out.push_str(&escape_template(value)),
            TemplatePart::Var { value } => {
                out.push_str("${");
                out.push_str(&emit_variable(value));
                out.push('}');
            }
        }
    }
    out.push('`');
    out
}

/// `<field> <op> <value>`.
pub fn emit_condition(cond: &ConditionIR) -> String {
    format!(
        "{} {} {}",
        cond.field,
        cond.operator.js_operator(),
        format_value(&cond.value)
    )
}

pub fn emit_guard(guard: &Guard) -> String {
    let joiner = match guard.combine {
        LogicCombinator::And => " && ",
        LogicCombinator::Or => " || ",
    };
    guard
        .conditions
        .iter()
        .map(emit_condition)
        .collect::<Vec<_>>()
        .join(joiner)
}

/// Compile a single condition object to a boolean expression.
pub fn compile_condition(condition: &Condition) -> Result<String, CompilerError> {
    lower_condition(condition).map(|c| emit_condition(&c))
}

/// Compile a `when` clause of either shape to a boolean expression.
pub fn compile_when(when: &WhenClause) -> Result<String, CompilerError> {
    lower_when(when).map(|g| emit_guard(&g))
}

/// Double-quoted string literal.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
