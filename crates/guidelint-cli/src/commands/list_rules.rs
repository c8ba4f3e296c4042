//! List rules command implementation.

use anyhow::{Context, Result};
use guidelint_core::RuleRegistry;
use std::fmt::Write as _;
use std::io::Write as _;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let registry =
        guidelint_rules::builtin_registry().context("Failed to register built-in rules")?;
    let table = render(&registry);
    std::io::stdout()
        .lock()
        .write_all(table.as_bytes())
        .context("Failed to write rule list")
}

fn render(registry: &RuleRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available rules:\n");
    let _ = writeln!(out, "{:<38} {:<8} Description", "Id", "Default");
    let _ = writeln!(out, "{}", "-".repeat(90));

    for rule in registry.iter() {
        let _ = writeln!(
            out,
            "{:<38} {:<8} {}",
            rule.id(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    let _ = writeln!(out, "\nConfigure a rule in guidelint.toml, e.g.:");
    let _ = writeln!(out, "  [rules.\"complexity/max-arguments\"]");
    let _ = writeln!(out, "  severity = \"error\"");
    let _ = writeln!(out, "  options = {{ max = 4 }}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_builtin_rule() {
        let registry = guidelint_rules::builtin_registry().unwrap();
        let table = render(&registry);
        for rule in registry.iter() {
            assert!(table.contains(rule.id()), "missing {}", rule.id());
        }
        assert!(table.contains("style/no-var"));
        assert!(table.contains("error"));
    }
}
