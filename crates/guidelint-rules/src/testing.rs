//! Helpers for rule unit tests.

use std::path::Path;
use std::sync::Arc;

use guidelint_core::{ActiveRule, ActiveRuleSet, Finding, Linter, Rule, RuleOptions};
use guidelint_js::JsParser;

/// Runs a single rule with default options over `code`.
pub(crate) fn run(rule: impl Rule + 'static, code: &str) -> Vec<Finding> {
    run_with(rule, code, RuleOptions::new())
}

/// Runs a single rule with `options` over `code`.
///
/// Panics if `code` does not parse, so a typo in a test snippet fails loudly.
pub(crate) fn run_with(rule: impl Rule + 'static, code: &str, options: RuleOptions) -> Vec<Finding> {
    let rule: Arc<dyn Rule> = Arc::new(rule);
    rule.validate_options(&options).unwrap();
    let severity = rule.default_severity();
    let rules = ActiveRuleSet::new(vec![ActiveRule::new(rule, severity, options)]);
    let linter = Linter::new(Arc::new(rules), Arc::new(JsParser::new()));

    let report = linter.lint_source(Path::new("test.jsx"), code);
    assert!(!report.parse_failed, "snippet failed to parse: {:?}", report.findings);
    report.findings
}
