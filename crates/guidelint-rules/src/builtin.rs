//! The built-in rule set.

use guidelint_core::{RegistryError, RuleBox, RuleRegistry};
use tracing::debug;

use crate::{
    ComponentPascalCase, ConstantScreamingSnakeCase, HookUsePrefix, ImgRequiresAlt, MaxArguments,
    NoDangerousHtml, NoIndexAsKey, NoNestedTernary, NoVar, StrictEquality,
};

/// Returns all available rules, in registration order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ComponentPascalCase::new()),
        Box::new(ConstantScreamingSnakeCase::new()),
        Box::new(HookUsePrefix::new()),
        Box::new(NoVar::new()),
        Box::new(StrictEquality::new()),
        Box::new(NoNestedTernary::new()),
        Box::new(MaxArguments::new()),
        Box::new(NoIndexAsKey::new()),
        Box::new(NoDangerousHtml::new()),
        Box::new(ImgRequiresAlt::new()),
    ]
}

/// Returns a registry holding every built-in rule.
///
/// # Errors
///
/// Returns an error if two built-in rules share an id.
pub fn builtin_registry() -> Result<RuleRegistry, RegistryError> {
    let mut registry = RuleRegistry::new();
    for rule in all_rules() {
        registry.register_box(rule)?;
    }
    debug!("Registered {} built-in rules", registry.len());
    Ok(registry)
}
