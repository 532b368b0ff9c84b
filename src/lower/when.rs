//! Lower `when` clauses into guards.

use serde_json::Value;

use crate::error::CompilerError;
use crate::ir::types::*;
use crate::parse::types::{Condition, WhenClause};

use super::TRACING_TARGET_LOWER;

/// Lower a clause of either shape. Carrying both shapes, or neither, is an error.
pub fn lower_when(when: &WhenClause) -> Result<Guard, CompilerError> {
    let has_simple = when.field.is_some() || when.op.is_some();

    match (&when.field, &when.op, &when.conditions) {
        (Some(field), Some(op), None) => {
            let value = when.value.clone().unwrap_or(Value::Null);
            Ok(Guard {
                conditions: vec![lower_parts(field, op, value)?],
                combine: LogicCombinator::And,
            })
        }
        (None, None, Some(conditions)) => {
            if conditions.is_empty() {
                return Err(CompilerError::lower(
                    "L002",
                    "When clause has an empty `conditions` list",
                    None,
                ));
            }
            let conditions = conditions
                .iter()
                .map(lower_condition)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Guard {
                conditions,
                combine: combinator_for(when.match_mode.as_deref()),
            })
        }
        (_, _, Some(_)) if has_simple => Err(CompilerError::lower(
            "L002",
            "When clause mixes `field`/`op` with `conditions`; use exactly one shape",
            None,
        )),
        _ => Err(CompilerError::lower(
            "L002",
            "When clause must be either {field, op, value} or {conditions, match}",
            None,
        )),
    }
}

pub fn lower_condition(condition: &Condition) -> Result<ConditionIR, CompilerError> {
    lower_parts(&condition.field, &condition.op, condition.value.clone())
}

fn lower_parts(field: &str, op: &str, value: Value) -> Result<ConditionIR, CompilerError> {
    let operator = ComparisonOp::from_symbol(op).ok_or_else(|| {
        CompilerError::lower(
            "L004",
            format!("Unknown comparison operator `{}` on `{}`", op, field),
            None,
        )
    })?;
    Ok(ConditionIR {
        field: field.to_string(),
        operator,
        value,
    })
}

/// `all` joins with AND. Anything else, including no value, joins with OR.
fn combinator_for(match_mode: Option<&str>) -> LogicCombinator {
    match match_mode {
        Some("all") => LogicCombinator::And,
        Some("any") | None => LogicCombinator::Or,
        Some(other) => {
            tracing::warn!(
                target: TRACING_TARGET_LOWER,
                match_mode = other,
                "unrecognized `match` value in when clause, joining conditions with OR"
            );
            LogicCombinator::Or
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cond(field: &str, op: &str, value: Value) -> Condition {
        Condition::new(field, op, value)
    }

    #[test]
    fn simple_shape() {
        let guard = lower_when(&WhenClause::simple("input.role", "==", json!("admin"))).unwrap();
        assert_eq!(guard.conditions.len(), 1);
        assert_eq!(guard.conditions[0].operator, ComparisonOp::Equals);
        assert_eq!(guard.conditions[0].value, json!("admin"));
    }

    #[test]
    fn simple_shape_without_value_compares_null() {
        let when = WhenClause {
            field: Some("extract.token".into()),
            op: Some("!=".into()),
            ..Default::default()
        };
        let guard = lower_when(&when).unwrap();
        assert_eq!(guard.conditions[0].value, Value::Null);
    }

    #[test]
    fn compound_all_is_and() {
        let when = WhenClause::compound(
            vec![cond("x", "==", json!(1)), cond("y", "==", json!(2))],
            Some("all"),
        );
        assert_eq!(lower_when(&when).unwrap().combine, LogicCombinator::And);
    }

    #[test]
    fn compound_defaults_to_or() {
        for mode in [Some("any"), None, Some("most")] {
            let when = WhenClause::compound(vec![cond("x", ">", json!(1))], mode);
            assert_eq!(lower_when(&when).unwrap().combine, LogicCombinator::Or);
        }
    }

    #[test]
    fn neither_shape_is_l002() {
        let err = lower_when(&WhenClause::default()).unwrap_err();
        assert_eq!(err.code, "L002");
    }

    #[test]
    fn half_simple_shape_is_l002() {
        let when = WhenClause {
            field: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(lower_when(&when).unwrap_err().code, "L002");
    }

    #[test]
    fn both_shapes_is_l002() {
        let mut when = WhenClause::compound(vec![cond("x", "==", json!(1))], Some("all"));
        when.field = Some("y".into());
        when.op = Some("==".into());
        let err = lower_when(&when).unwrap_err();
        assert_eq!(err.code, "L002");
        assert!(err.message.contains("mixes"));
    }

    #[test]
    fn empty_conditions_is_l002() {
        let when = WhenClause::compound(vec![], Some("all"));
        assert_eq!(lower_when(&when).unwrap_err().code, "L002");
    }

    #[test]
    fn unknown_operator_is_l004() {
        let err = lower_condition(&cond("x", "=~", json!(1))).unwrap_err();
        assert_eq!(err.code, "L004");
        assert!(err.message.contains("=~"));
    }
}
