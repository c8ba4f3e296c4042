//! # guidelint-js
//!
//! Tree-sitter based JavaScript/JSX adapter for guidelint.
//!
//! [`JsParser`] implements [`guidelint_core::SourceParser`] on top of
//! `tree-sitter-javascript`, which covers ES modules, CommonJS and JSX.
//! The tree-sitter tree is copied into a [`guidelint_core::SyntaxTree`] so
//! the engine and rules never depend on tree-sitter types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod javascript;

pub use javascript::JsParser;
