//! Integration tests for schema validation.

mod helpers;

use serde_json::json;
use workflow_compiler::parse::parse_document;
use workflow_compiler::validate::SchemaValidator;

fn check(name: &str) -> Result<(), Vec<workflow_compiler::validate::ValidationError>> {
    let validator = SchemaValidator::new().unwrap();
    let document = parse_document(&helpers::fixture(name)).unwrap();
    validator.validate(&document)
}

#[test]
fn valid_fixtures_pass() {
    assert!(check("login.yaml").is_ok());
    assert!(check("compound_when.yaml").is_ok());
}

#[test]
fn missing_fill_value_points_at_step() {
    let errors = check("missing_value.yaml").unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = &errors[0];
    assert_eq!(error.path, "/steps/1");
    assert_eq!(error.keyword, "required");
    assert_eq!(error.params, json!({"missingProperty": "value"}));
    assert_eq!(error.step_index(), Some(1));
}

#[test]
fn every_violation_is_reported_in_order() {
    let errors = check("invalid_many.yaml").unwrap_err();
    let located: Vec<_> = errors
        .iter()
        .map(|e| (e.path.as_str(), e.keyword.as_str()))
        .collect();
    assert_eq!(
        located,
        [
            ("/name", "minLength"),
            ("/steps/0/action", "enum"),
            ("/steps/1", "required"),
            ("/steps/1/timeout", "minimum"),
            ("/steps/2", "required"),
        ]
    );
}

#[test]
fn report_is_serializable() {
    let validator = SchemaValidator::new().unwrap();
    let report = serde_json::to_value(validator.report(&json!({"name": "x"}))).unwrap();
    assert_eq!(report["valid"], json!(false));
    let error = &report["errors"][0];
    assert_eq!(error["path"], json!(""));
    assert_eq!(error["keyword"], json!("required"));
    assert_eq!(error["params"], json!({"missingProperty": "steps"}));
    assert!(error["message"].as_str().unwrap().contains("steps"));
}
