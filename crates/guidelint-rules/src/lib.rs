//! # guidelint-rules
//!
//! Built-in style guide rules for guidelint.
//!
//! ## Available Rules
//!
//! | Id | Default | Description |
//! |----|---------|-------------|
//! | `naming/component-pascal-case` | warning | Module-level React components are `PascalCase` |
//! | `naming/constant-screaming-snake-case` | warning | Module-level literal constants are `SCREAMING_SNAKE_CASE` |
//! | `naming/hook-use-prefix` | warning | Functions calling hooks (and not components) start with `use` |
//! | `style/no-var` | error | No `var` declarations |
//! | `style/strict-equality` | error | `===`/`!==` instead of `==`/`!=` |
//! | `style/no-nested-ternary` | warning | No ternary inside a ternary branch |
//! | `complexity/max-arguments` | warning | At most `max` (3) parameters |
//! | `react/no-index-as-key` | warning | No list-callback index as JSX `key` |
//! | `react/no-dangerous-html` | warning | No `dangerouslySetInnerHTML` |
//! | `markup/img-requires-alt` | warning | `<img>` carries `alt` |
//!
//! ## Usage
//!
//! ```ignore
//! use guidelint_core::Analyzer;
//! use guidelint_js::JsParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JsParser::new())
//!     .registry(guidelint_rules::builtin_registry()?)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builtin;
mod component_pascal_case;
mod constant_screaming_snake_case;
mod hook_use_prefix;
mod img_requires_alt;
mod js;
mod max_arguments;
mod no_dangerous_html;
mod no_index_as_key;
mod no_nested_ternary;
mod no_var;
mod strict_equality;

#[cfg(test)]
mod testing;

pub use builtin::{all_rules, builtin_registry};
pub use component_pascal_case::ComponentPascalCase;
pub use constant_screaming_snake_case::ConstantScreamingSnakeCase;
pub use hook_use_prefix::HookUsePrefix;
pub use img_requires_alt::ImgRequiresAlt;
pub use max_arguments::MaxArguments;
pub use no_dangerous_html::NoDangerousHtml;
pub use no_index_as_key::NoIndexAsKey;
pub use no_nested_ternary::NoNestedTernary;
pub use no_var::NoVar;
pub use strict_equality::StrictEquality;

/// Re-export core types for convenience.
pub use guidelint_core::{Finding, Rule, Severity};
