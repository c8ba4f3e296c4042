//! # guidelint-core
//!
//! Core framework for style-guide linting over a parsed syntax tree.
//!
//! This crate provides the foundational traits and types for building
//! the linter. It includes:
//!
//! - [`Rule`] trait for stateless, node-kind driven checks
//! - [`RuleRegistry`] for registering rules and resolving configuration
//! - [`Linter`] for the single-pass traversal of one file
//! - [`Analyzer`] for discovering files and running them on a worker pool
//! - [`Report`] for the sorted, rendered result of a run
//!
//! The parser is not part of this crate. Anything implementing
//! [`SourceParser`] can feed the engine.
//!
//! ## Example
//!
//! ```ignore
//! use guidelint_core::{Analyzer, Config, RuleRegistry};
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(MyRule)?;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(MyParser::new())
//!     .registry(registry)
//!     .config(Config::default())
//!     .build()?;
//!
//! let report = analyzer.analyze()?;
//! print!("{}", report.render_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod engine;
mod registry;
mod report;
mod rule;
mod syntax;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, CancellationToken};
pub use config::{AnalyzerConfig, Config, ConfigError, OutputFormat, RuleConfig, RuleOptions};
pub use context::{FileContext, RuleContext};
pub use engine::{FileReport, Linter};
pub use registry::{ActiveRule, ActiveRuleSet, RegistryError, RuleRegistry};
pub use report::{exit_code, Report};
pub use rule::{Rule, RuleBox, PARSE_ERROR_ID};
pub use syntax::{
    NodeId, ParseError, Position, Preorder, SourceParser, SyntaxNode, SyntaxTree, TreeBuilder,
};
pub use types::{Finding, FindingDiagnostic, Location, Severity};
