//! Read-only views over DTD declarations.
//!
//! The views borrow the parsed node and derive the identifiers callers care
//! about; they never own or modify the tree.

pub mod doctype;
pub mod notation;

use thiserror::Error;

use crate::tree::NodeType;

pub use doctype::DocTypeView;
pub use notation::NotationView;

/// Errors raised while interpreting DTD declarations.
///
/// These describe input the model cannot represent, not documents that
/// merely differ, so they propagate instead of becoming a mismatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The identifier text after the notation keyword matched no grammar.
    #[error("could not parse identifiers of notation '{name}': |{rest}|")]
    NotationSyntax { name: String, rest: String },
    /// A single identifier followed a keyword other than PUBLIC or SYSTEM.
    #[error("unknown keyword '{keyword}' in notation '{name}'")]
    UnknownNotationKeyword { name: String, keyword: String },
    /// The DOCTYPE internal subset held a node that is not a declaration.
    #[error("unexpected {kind} node in DOCTYPE internal subset")]
    UnexpectedSubsetNode { kind: NodeType },
}
