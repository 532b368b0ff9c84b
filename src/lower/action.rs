//! Narrow a loosely typed step into the closed [`Action`] set.

use serde_json::Value;

use crate::error::CompilerError;
use crate::ir::types::*;
use crate::parse::types::StepDefinition;

use super::interpolate::parse_interpolation;

pub fn lower_action(step: &StepDefinition, index: usize) -> Result<Action, CompilerError> {
    let action = match step.action.as_str() {
        "navigate" => Action::Navigate {
            url: parse_interpolation(required(&step.url, "url", step, index)?),
        },
        "fill" => {
            let selector = required(&step.selector, "selector", step, index)?;
            let value = step
                .value
                .as_ref()
                .ok_or_else(|| missing_field("value", step, index))?;
            Action::Fill {
                selector: selector.to_string(),
                value: lower_fill_value(value),
            }
        }
        "click" => Action::Click {
            selector: required(&step.selector, "selector", step, index)?.to_string(),
        },
        "press" => Action::Press {
            selector: required(&step.selector, "selector", step, index)?.to_string(),
            key: required(&step.key, "key", step, index)?.to_string(),
        },
        "wait" => Action::Wait {
            selector: required(&step.selector, "selector", step, index)?.to_string(),
            timeout_ms: step.timeout.unwrap_or(DEFAULT_WAIT_TIMEOUT_MS),
        },
        "playwright_code" => Action::RawCode {
            code: required(&step.code, "code", step, index)?.to_string(),
        },
        other => {
            return Err(CompilerError::lower(
                "L001",
                format!("Unknown action type: `{}`", other),
                Some(index),
            ));
        }
    };
    Ok(action)
}

/// Strings go through interpolation; other scalars are passed as literals.
fn lower_fill_value(value: &Value) -> ValueExpr {
    match value {
        Value::String(s) => parse_interpolation(s),
        other => ValueExpr::literal(other.clone()),
    }
}

fn required<'a>(
    field: &'a Option<String>,
    name: &str,
    step: &StepDefinition,
    index: usize,
) -> Result<&'a str, CompilerError> {
    field
        .as_deref()
        .ok_or_else(|| missing_field(name, step, index))
}

fn missing_field(name: &str, step: &StepDefinition, index: usize) -> CompilerError {
    CompilerError::lower(
        "L003",
        format!(
            "Step '{}' ({}) is missing required field `{}`",
            step.name, step.action, name
        ),
        Some(index),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn step(action: &str) -> StepDefinition {
        StepDefinition::new("s", action)
    }

    #[test]
    fn navigate_interpolates_url() {
        let mut s = step("navigate");
        s.url = Some("${constants.BASE_URL}".into());
        assert_eq!(
            lower_action(&s, 0).unwrap(),
            Action::Navigate {
                url: ValueExpr::variable(Namespace::Constants, "BASE_URL")
            }
        );
    }

    #[test]
    fn fill_keeps_numbers_literal() {
        let mut s = step("fill");
        s.selector = Some("#qty".into());
        s.value = Some(json!(3));
        assert_eq!(
            lower_action(&s, 0).unwrap(),
            Action::Fill {
                selector: "#qty".into(),
                value: ValueExpr::literal(json!(3)),
            }
        );
    }

    #[test]
    fn wait_defaults_timeout() {
        let mut s = step("wait");
        s.selector = Some(".done".into());
        assert!(matches!(
            lower_action(&s, 0).unwrap(),
            Action::Wait { timeout_ms: 30_000, .. }
        ));
        s.timeout = Some(500);
        assert!(matches!(
            lower_action(&s, 0).unwrap(),
            Action::Wait { timeout_ms: 500, .. }
        ));
    }

    #[test]
    fn raw_code_is_untouched() {
        let mut s = step("playwright_code");
        s.code = Some("const x = 1;\nreturn x;\n".into());
        assert_eq!(
            lower_action(&s, 0).unwrap(),
            Action::RawCode {
                code: "const x = 1;\nreturn x;\n".into()
            }
        );
    }

    #[test]
    fn unknown_action_names_the_action() {
        let err = lower_action(&step("unknown_action"), 3).unwrap_err();
        assert_eq!(err.code, "L001");
        assert_eq!(err.step_index, Some(3));
        assert!(err.message.contains("unknown_action"));
    }

    #[test]
    fn missing_field_is_l003() {
        let mut s = step("press");
        s.selector = Some("#q".into());
        let err = lower_action(&s, 1).unwrap_err();
        assert_eq!(err.code, "L003");
        assert!(err.message.contains("`key`"));
    }
}
