//! Utility functions for rule implementations.

pub mod allowance;
pub mod naming;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{AllowCheck, Allowances};
