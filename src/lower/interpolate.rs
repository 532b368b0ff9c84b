//! Parse `${namespace.identifier}` strings into `ValueExpr`.
//!
//! A token is `${` + one of `extract`, `input`, `constants` + `.` + an
//! identifier (`[A-Za-z_][A-Za-z0-9_]*`) + `}`. Anything else that merely
//! looks like a token stays literal text.

use crate::ir::types::*;

/// Classify a raw string:
/// - no token: a string literal
/// - exactly one token spanning the whole string: a bare variable
/// - otherwise: a template of literal and variable parts
pub fn parse_interpolation(raw: &str) -> ValueExpr {
    let mut parts = split_tokens(raw);
    if parts.len() > 1 {
        return ValueExpr::Template { parts };
    }
    match parts.pop() {
        None => ValueExpr::string(""),
        Some(TemplatePart::Lit { value }) => ValueExpr::string(value),
        Some(TemplatePart::Var { value }) => ValueExpr::Variable(value),
    }
}

fn split_tokens(raw: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut remaining = raw;

    while let Some(start) = remaining.find("${") {
        literal.push_str(&remaining[..start]);
        let after_open = &remaining[start + 2..];

        let token = after_open
            .find('}')
            .and_then(|end| parse_token(&after_open[..end]).map(|var| (var, end)));

        match token {
            Some((var, end)) => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Lit {
                        value: std::mem::take(&mut literal),
                    });
                }
                parts.push(TemplatePart::Var { value: var });
                remaining = &after_open[end + 1..];
            }
            None => {
                // Not a token; keep the opener as text and rescan after it.
                literal.push_str("${");
                remaining = after_open;
            }
        }
    }

    literal.push_str(remaining);
    if !literal.is_empty() {
        parts.push(TemplatePart::Lit { value: literal });
    }

    parts
}

fn parse_token(inner: &str) -> Option<VariableRef> {
    let (namespace, identifier) = inner.split_once('.')?;
    let namespace = Namespace::from_name(namespace)?;
    is_identifier(identifier).then(|| VariableRef {
        namespace,
        identifier: identifier.to_string(),
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
