//! Semantic equivalence of XML trees.

pub mod engine;
pub mod result;

pub use engine::{compare, equivalent};
pub use result::{Comparison, DocTypeMismatch, Mismatch, MismatchReason};
