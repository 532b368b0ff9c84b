//! Integration tests for the codegen pass.

mod helpers;

use serde_json::json;
use workflow_compiler::codegen::{INPUT_DATA_PLACEHOLDER, assemble, codegen, generate_step};
use workflow_compiler::compile::{CompileOptions, Compiler};
use workflow_compiler::parse::types::WhenClause;

#[test]
fn login_workflow_program_snapshot() {
    let compiler = Compiler::new().unwrap();
    let program = compiler
        .compile_str(&helpers::fixture("login.yaml"), &CompileOptions::with_source("login.yaml"))
        .unwrap();

    insta::assert_snapshot!(program.text, @r##"
// Workflow: login
// Source: login.yaml
//
// Sign in and land on the dashboard.

const { extract = {}, constants = {}, input = {}, startFromStep = 0 } = __INPUT_DATA__;

const steps = [
  {
    name: "Open login page",
    action: "navigate",
    execute: async () => {
      await page.goto(`${constants.BASE_URL}/login`);
      await page.waitForLoadState("domcontentloaded");
    },
  },
  {
    name: "Enter email",
    action: "fill",
    selector: "#email",
    execute: async () => {
      await page.fill("#email", input.email);
    },
  },
  {
    name: "Enter password",
    action: "fill",
    selector: "#password",
    execute: async () => {
      await page.fill("#password", input.password);
    },
  },
  {
    name: "Submit",
    action: "press",
    selector: "#password",
    execute: async () => {
      await page.press("#password", "Enter");
    },
  },
  {
    name: "Dismiss banner",
    action: "click",
    selector: "button.dismiss",
    execute: async () => {
      if (extract.bannerShown === true) {
        await page.click("button.dismiss");
      }
    },
    hint: "The banner sits above the footer.",
  },
  {
    name: "Wait for dashboard",
    action: "wait",
    selector: ".dashboard",
    execute: async () => {
      await page.waitForSelector(".dashboard", { timeout: 10000 });
    },
  },
  {
    name: "Read greeting",
    action: "playwright_code",
    execute: async () => {
      const text = await page.textContent(".greeting");
      return text.trim();
    },
    output: "greeting",
  }
];

const results = {
  success: true,
  completedSteps: [],
  failedStep: null,
  output: {},
};

for (let i = startFromStep; i < steps.length; i++) {
  const step = steps[i];
  try {
    const result = await step.execute();
    results.completedSteps.push({ index: i, name: step.name, success: true });
    if (step.output && result !== undefined) {
      results.output[step.output] = result;
    }
  } catch (error) {
    results.success = false;
    results.failedStep = {
      index: i,
      name: step.name,
      selector: step.selector,
      hint: step.hint,
      error: error instanceof Error ? error.message : String(error),
    };
    break;
  }
}

return results;
"##);
}

#[test]
fn compound_guards_join_with_match_mode() {
    let compiler = Compiler::new().unwrap();
    let program = compiler
        .compile_str(&helpers::fixture("compound_when.yaml"), &CompileOptions::default())
        .unwrap();

    assert!(program.text.contains(
        "      if (input.couponCode !== \"\" && extract.cartTotal >= 50) {\n        await page.fill(\"#coupon\", `SAVE-${input.couponCode}`);\n      }\n"
    ));
    assert!(
        program
            .text
            .contains("if (extract.needsConfirm === true || input.force === true) {")
    );
}

#[test]
fn single_step_has_no_trailing_separator() {
    let ir = helpers::program_ir(vec![helpers::click_ir(0)]);
    let text = codegen(&ir);
    assert!(text.contains("  }\n];\n"));
    assert!(!text.contains("  },\n];"));
}

#[test]
fn placeholder_is_emitted_once() {
    let ir = helpers::program_ir((0..5).map(helpers::click_ir).collect());
    assert_eq!(codegen(&ir).matches(INPUT_DATA_PLACEHOLDER).count(), 1);
}

#[test]
fn description_is_optional() {
    let text = assemble(
        &helpers::workflow("bare", vec![helpers::click("Go", "#go")]),
        "bare.yaml",
    )
    .unwrap();
    assert!(text.starts_with("// Workflow: bare\n// Source: bare.yaml\n\nconst {"));
}

#[test]
fn fill_with_number_is_literal() {
    let step = helpers::fill("Quantity", "#qty", json!(3));
    let code = generate_step(&step, 0, true).unwrap();
    assert!(code.contains("await page.fill(\"#qty\", 3);"));
}

#[test]
fn fill_with_boolean_is_literal() {
    let step = helpers::fill("Flag", "#flag", json!(false));
    let code = generate_step(&step, 0, true).unwrap();
    assert!(code.contains("await page.fill(\"#flag\", false);"));
}

#[test]
fn selector_is_escaped_not_interpolated() {
    let step = helpers::click("Quoted", r#"input[name="${input.field}"]"#);
    let code = generate_step(&step, 0, true).unwrap();
    assert!(code.contains(r#"await page.click("input[name=\"${input.field}\"]");"#));
}

#[test]
fn guard_wraps_raw_code() {
    let mut step = helpers::raw_code("Scroll", "await page.mouse.wheel(0, 500);");
    step.when = Some(WhenClause::simple("input.scroll", "==", json!(true)));
    let code = generate_step(&step, 2, false).unwrap();
    assert!(code.contains(
        "  execute: async () => {\n    if (input.scroll === true) {\n      await page.mouse.wheel(0, 500);\n    }\n  },\n"
    ));
    assert!(code.ends_with("},\n"));
}

#[test]
fn unknown_action_names_offender() {
    let step = workflow_compiler::parse::types::StepDefinition::new("Hover", "unknown_action");
    let errors = generate_step(&step, 4, false).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unknown action type: `unknown_action`");
    assert_eq!(errors[0].step_index, Some(4));
}
