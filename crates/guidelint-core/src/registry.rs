//! Rule registry and configuration resolution.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError, RuleOptions};
use crate::rule::{Rule, RuleBox, PARSE_ERROR_ID};
use crate::types::Severity;

/// Errors raised while registering rules.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum RegistryError {
    /// A rule with the same id is already registered.
    #[error("Rule `{id}` is already registered")]
    #[diagnostic(code(guidelint::registry::duplicate_rule))]
    DuplicateRule {
        /// The duplicated id.
        id: String,
    },
}

/// Holds every known rule, in registration order.
///
/// Rules are registered once at startup and never mutated afterwards.
/// [`RuleRegistry::resolve`] turns a configuration into the
/// [`ActiveRuleSet`] the engine runs.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] if the id is taken, or is
    /// the reserved [`PARSE_ERROR_ID`].
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(rule))
    }

    /// Registers a boxed rule.
    ///
    /// # Errors
    ///
    /// See [`RuleRegistry::register`].
    pub fn register_box(&mut self, rule: RuleBox) -> Result<(), RegistryError> {
        self.register_arc(Arc::from(rule))
    }

    fn register_arc(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        let id = rule.id();
        if id == PARSE_ERROR_ID || self.index.contains_key(id) {
            return Err(RegistryError::DuplicateRule { id: id.to_string() });
        }
        self.index.insert(id, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Looks up a rule by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.index.get(id).map(|&i| &*self.rules[i])
    }

    /// Returns true if a rule with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| &**r)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves a configuration into the set of rules to run.
    ///
    /// Every configured id must name a registered rule, and every rule's
    /// options must pass its own validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRule`] or [`ConfigError::InvalidOption`].
    pub fn resolve(&self, config: &Config) -> Result<ActiveRuleSet, ConfigError> {
        if let Some(id) = config.rules.keys().find(|id| !self.contains(id)) {
            return Err(ConfigError::UnknownRule { id: id.clone() });
        }

        let mut active = Vec::new();
        for rule in &self.rules {
            let id = rule.id();
            let options = config.rule_options(id);
            rule.validate_options(&options)
                .map_err(|message| ConfigError::InvalidOption {
                    rule: id.to_string(),
                    message,
                })?;

            if !config.is_rule_enabled(id) {
                debug!("Skipping disabled rule: {}", id);
                continue;
            }

            let severity = config
                .rule_severity(id)
                .unwrap_or_else(|| rule.default_severity());
            active.push(ActiveRule::new(Arc::clone(rule), severity, options));
        }

        Ok(ActiveRuleSet::new(active))
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rules.iter().map(|r| r.id())).finish()
    }
}

/// A registered rule together with its resolved configuration.
#[derive(Clone)]
pub struct ActiveRule {
    rule: Arc<dyn Rule>,
    severity: Severity,
    options: RuleOptions,
}

impl ActiveRule {
    /// Creates an active rule.
    #[must_use]
    pub fn new(rule: Arc<dyn Rule>, severity: Severity, options: RuleOptions) -> Self {
        Self {
            rule,
            severity,
            options,
        }
    }

    /// The rule's id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.rule.id()
    }

    /// The underlying rule.
    #[must_use]
    pub fn rule(&self) -> &dyn Rule {
        &*self.rule
    }

    /// Effective severity (override or default).
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Resolved options.
    #[must_use]
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }
}

impl std::fmt::Debug for ActiveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveRule")
            .field("id", &self.id())
            .field("severity", &self.severity)
            .field("options", &self.options)
            .finish()
    }
}

/// The rules a run executes, with a node-kind dispatch table.
#[derive(Debug, Clone, Default)]
pub struct ActiveRuleSet {
    rules: Vec<ActiveRule>,
    dispatch: HashMap<&'static str, Vec<usize>>,
}

impl ActiveRuleSet {
    /// Builds the set and its dispatch table.
    #[must_use]
    pub fn new(rules: Vec<ActiveRule>) -> Self {
        let mut dispatch: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (i, active) in rules.iter().enumerate() {
            for &kind in active.rule().applies_to() {
                dispatch.entry(kind).or_default().push(i);
            }
        }
        Self { rules, dispatch }
    }

    /// Rules interested in nodes of `kind`, in registration order.
    pub fn rules_for<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a ActiveRule> + 'a {
        self.dispatch
            .get(kind)
            .into_iter()
            .flatten()
            .map(|&i| &self.rules[i])
    }

    /// Iterates over all active rules.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveRule> {
        self.rules.iter()
    }

    /// Returns true if a rule with this id is active.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.id() == id)
    }

    /// Number of active rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuleContext;
    use crate::syntax::NodeId;
    use crate::types::Finding;

    struct Named(&'static str, &'static [&'static str]);

    impl Rule for Named {
        fn id(&self) -> &'static str {
            self.0
        }
        fn applies_to(&self) -> &'static [&'static str] {
            self.1
        }
        fn check(&self, _node: NodeId, _ctx: &RuleContext<'_>) -> Vec<Finding> {
            Vec::new()
        }
    }

    struct WithMax;

    impl Rule for WithMax {
        fn id(&self) -> &'static str {
            "test/with-max"
        }
        fn default_severity(&self) -> Severity {
            Severity::Error
        }
        fn applies_to(&self) -> &'static [&'static str] {
            &["function_declaration"]
        }
        fn validate_options(&self, options: &RuleOptions) -> Result<(), String> {
            options.ensure_only(&["max"])?;
            if options.get_int("max", 1) < 0 {
                return Err("`max` must not be negative".to_string());
            }
            Ok(())
        }
        fn check(&self, _node: NodeId, _ctx: &RuleContext<'_>) -> Vec<Finding> {
            Vec::new()
        }
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register(Named("test/a", &["identifier"])).unwrap();
        registry
            .register(Named("test/b", &["identifier", "binary_expression"]))
            .unwrap();
        registry.register(WithMax).unwrap();
        registry
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut registry = registry();
        let err = registry
            .register(Named("test/a", &["identifier"]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRule { id } if id == "test/a"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn register_rejects_reserved_parse_error_id() {
        let mut registry = RuleRegistry::new();
        assert!(registry.register(Named(PARSE_ERROR_ID, &[])).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn resolve_defaults_enable_everything() {
        let active = registry().resolve(&Config::default()).unwrap();
        assert_eq!(active.len(), 3);
        let ids: Vec<&str> = active.rules_for("identifier").map(ActiveRule::id).collect();
        assert_eq!(ids, vec!["test/a", "test/b"]);
        assert_eq!(active.rules_for("string").count(), 0);
    }

    #[test]
    fn resolve_applies_enabled_and_severity() {
        let config = Config::parse(
            r#"
[rules."test/a"]
enabled = false

[rules."test/with-max"]
severity = "warning"
options = { max = 2 }
"#,
        )
        .unwrap();

        let active = registry().resolve(&config).unwrap();
        assert!(!active.contains("test/a"));
        let with_max = active.iter().find(|r| r.id() == "test/with-max").unwrap();
        assert_eq!(with_max.severity(), Severity::Warning);
        assert_eq!(with_max.options().get_int("max", 0), 2);
    }

    #[test]
    fn resolve_rejects_unknown_rule() {
        let config = Config::parse("[rules.\"test/missing\"]\nenabled = true\n").unwrap();
        let err = registry().resolve(&config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule { id } if id == "test/missing"));
    }

    #[test]
    fn resolve_rejects_bad_option() {
        let config =
            Config::parse("[rules.\"test/with-max\"]\noptions = { max = -1 }\n").unwrap();
        let err = registry().resolve(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { rule, .. } if rule == "test/with-max"));

        let config = Config::parse("[rules.\"test/a\"]\noptions = { max = 1 }\n").unwrap();
        assert!(registry().resolve(&config).is_err());
    }

    #[test]
    fn resolve_validates_options_of_disabled_rules_too() {
        let config =
            Config::parse("[rules.\"test/with-max\"]\nenabled = false\noptions = { max = -1 }\n")
                .unwrap();
        assert!(matches!(
            registry().resolve(&config),
            Err(ConfigError::InvalidOption { .. })
        ));
    }
}
