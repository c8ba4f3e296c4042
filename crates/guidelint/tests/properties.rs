//! End-to-end behaviour of the built-in rule set.

use guidelint::{
    AnalyzerError, CancellationToken, Config, ConfigError, Finding, Linter, NodeId, Rule,
    RuleContext, Severity, PARSE_ERROR_ID,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const CLEAN: &str = r#"import React from "react";

const MAX_ITEMS = 10;

export function UserList({ users }) {
  return (
    <ul>
      {users.slice(0, MAX_ITEMS).map((user) => (
        <li key={user.id}>{user.name}</li>
      ))}
    </ul>
  );
}
"#;

const MESSY: &str = r#"var count = 0;
const basePath = "/api";

function total(a, b, c, d) {
  return a == b ? c : d;
}

const Gallery = ({ photos }) => (
  <div>
    {photos.map((photo, i) => (
      <img key={i} src={photo.url} />
    ))}
  </div>
);
"#;

fn ids(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.rule_id.as_str()).collect()
}

fn with_rule(findings: &[Finding], id: &str) -> usize {
    findings.iter().filter(|f| f.rule_id == id).count()
}

#[test]
fn clean_file_yields_empty_report() {
    let report = guidelint::lint_source("src/UserList.jsx", CLEAN).unwrap();
    assert!(report.is_empty(), "{:?}", ids(&report.findings));
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn messy_file_reports_each_violation_in_order() {
    let report = guidelint::lint_source("src/messy.jsx", MESSY).unwrap();
    assert_eq!(
        ids(&report.findings),
        vec![
            "style/no-var",
            "naming/constant-screaming-snake-case",
            "complexity/max-arguments",
            "style/strict-equality",
            "markup/img-requires-alt",
            "react/no-index-as-key",
        ]
    );
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn repeated_runs_are_identical() {
    let first = guidelint::lint_source("src/messy.jsx", MESSY).unwrap();
    let second = guidelint::lint_source("src/messy.jsx", MESSY).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.render_json().unwrap(), second.render_json().unwrap());
}

#[test]
fn worker_count_does_not_change_the_report() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("src")).unwrap();
    for i in 0..6 {
        let body = if i % 2 == 0 { MESSY } else { CLEAN };
        fs::write(tmp.path().join(format!("src/file{i}.jsx")), body).unwrap();
    }

    let run = |workers: usize| {
        guidelint::analyzer()
            .unwrap()
            .root(tmp.path())
            .parallelism(workers)
            .build()
            .unwrap()
            .analyze()
            .unwrap()
    };

    let single = run(1);
    let many = run(4);
    assert_eq!(single.files_checked, 6);
    assert_eq!(single.render_json().unwrap(), many.render_json().unwrap());
    assert_eq!(
        single.findings[0].location.file,
        Path::new("src/file0.jsx")
    );
}

#[test]
fn four_parameters_yield_one_max_arguments_finding() {
    let four = guidelint::lint_source("a.js", "function f(a, b, c, d) {}\n").unwrap();
    assert_eq!(ids(&four.findings), vec!["complexity/max-arguments"]);
    assert_eq!(four.findings[0].message, "`f` has 4 parameters (max 3)");

    let three = guidelint::lint_source("a.js", "const g = (a, b, c) => a;\n").unwrap();
    assert!(three.is_empty());
}

#[test]
fn lowercase_constant_suggests_screaming_snake_case() {
    let report = guidelint::lint_source("a.js", "const basePath = \"/api\";\n").unwrap();
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.rule_id, "naming/constant-screaming-snake-case");
    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(finding.suggestion.as_deref(), Some("BASE_PATH"));
    assert!(finding.message.contains("BASE_PATH"));
}

#[test]
fn index_key_is_flagged_and_stable_key_is_not() {
    let flagged = guidelint::lint_source(
        "a.jsx",
        "const L = ({ xs }) => <ul>{xs.map((x, index) => <li key={index}>{x}</li>)}</ul>;\n",
    )
    .unwrap();
    assert_eq!(with_rule(&flagged.findings, "react/no-index-as-key"), 1);

    let stable = guidelint::lint_source(
        "a.jsx",
        "const L = ({ xs }) => <ul>{xs.map((item) => <li key={item.id}>{item.name}</li>)}</ul>;\n",
    )
    .unwrap();
    assert_eq!(with_rule(&stable.findings, "react/no-index-as-key"), 0);
}

#[test]
fn disabling_a_rule_removes_its_findings() {
    let config = Config::parse("[rules.\"style/no-var\"]\nenabled = false\n").unwrap();
    let report = guidelint::lint_source_with(&config, "src/messy.jsx", MESSY).unwrap();
    assert_eq!(with_rule(&report.findings, "style/no-var"), 0);
    assert_eq!(with_rule(&report.findings, "style/strict-equality"), 1);
}

#[test]
fn severity_override_changes_exit_status() {
    let config =
        Config::parse("[rules.\"naming/constant-screaming-snake-case\"]\nseverity = \"error\"\n")
            .unwrap();
    let report =
        guidelint::lint_source_with(&config, "a.js", "const basePath = \"/api\";\n").unwrap();
    assert_eq!(report.findings[0].severity, Severity::Error);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn unknown_rule_in_config_is_rejected() {
    let config = Config::parse("[rules.\"style/no-such-rule\"]\nenabled = true\n").unwrap();
    let err = guidelint::lint_source_with(&config, "a.js", "let a = 1;\n").unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::Config(ConfigError::UnknownRule { ref id }) if id == "style/no-such-rule"
    ));
}

#[test]
fn invalid_option_is_rejected() {
    let config =
        Config::parse("[rules.\"complexity/max-arguments\"]\noptions = { max = \"four\" }\n")
            .unwrap();
    let err = guidelint::lint_source_with(&config, "a.js", "let a = 1;\n").unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::Config(ConfigError::InvalidOption { .. })
    ));
}

#[test]
fn syntax_error_yields_single_parse_error() {
    let report = guidelint::lint_source("broken.js", "var x = ;\nfunction (\n").unwrap();
    assert_eq!(ids(&report.findings), vec![PARSE_ERROR_ID]);
    assert_eq!(report.findings[0].severity, Severity::Error);
    assert!(report.all_inputs_failed_to_parse());
}

struct Explodes;

impl Rule for Explodes {
    fn id(&self) -> &'static str {
        "test/explodes"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["variable_declaration"]
    }

    fn check(&self, _node: NodeId, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        panic!("rule bug");
    }
}

#[test]
fn panicking_rule_does_not_hide_other_findings() {
    let mut registry = guidelint::default_registry().unwrap();
    registry.register(Explodes).unwrap();
    let rules = registry.resolve(&Config::default()).unwrap();
    let linter = Linter::new(Arc::new(rules), Arc::new(guidelint::JsParser::new()));

    let file = linter.lint_source(Path::new("a.js"), "var a = 1;\nvar b = 2;\n");
    assert!(!file.parse_failed);
    assert_eq!(ids(&file.findings), vec!["style/no-var", "style/no-var"]);
}

#[test]
fn cancelled_run_returns_no_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.js"), "var a = 1;\n").unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let result = guidelint::analyzer()
        .unwrap()
        .root(tmp.path())
        .cancellation(token)
        .build()
        .unwrap()
        .analyze();
    assert!(matches!(result, Err(AnalyzerError::Cancelled)));
}

#[test]
fn allowance_suppresses_only_the_named_rule() {
    let source = "// guidelint: allow(style/no-var) reason=\"legacy\"\nvar total = a == b;\n";
    let report = guidelint::lint_source("a.js", source).unwrap();
    assert_eq!(ids(&report.findings), vec!["style/strict-equality"]);
    assert_eq!(report.findings[0].location.line, 2);
}

#[test]
fn directive_inside_a_string_does_not_suppress() {
    let report =
        guidelint::lint_source("a.js", "var a = \"// guidelint: allow(all)\";\n").unwrap();
    assert_eq!(ids(&report.findings), vec!["style/no-var"]);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn trailing_directive_after_url_string_suppresses() {
    let source = "var a = \"http://example.com\"; // guidelint: allow(style/no-var)\n";
    let report = guidelint::lint_source("a.js", source).unwrap();
    assert!(report.is_empty(), "{:?}", ids(&report.findings));
}

#[test]
fn jsx_block_comment_directive_covers_next_line() {
    let source = "const A = () => (\n  <div>\n    {/* guidelint: allow(markup/img-requires-alt) */}\n    <img src=\"a.png\" />\n  </div>\n);\n";
    let report = guidelint::lint_source("a.jsx", source).unwrap();
    assert_eq!(with_rule(&report.findings, "markup/img-requires-alt"), 0);

    let bare = source.replace("{/* guidelint: allow(markup/img-requires-alt) */}", "");
    let report = guidelint::lint_source("a.jsx", &bare).unwrap();
    assert_eq!(with_rule(&report.findings, "markup/img-requires-alt"), 1);
}
