use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

use crate::tree::{NodeType, XmlNode};

/// Outcome of comparing two documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Comparison<'a> {
    Equivalent,
    Mismatch(Mismatch<'a>),
}

impl<'a> Comparison<'a> {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Comparison::Equivalent)
    }

    pub fn mismatch(&self) -> Option<&Mismatch<'a>> {
        match self {
            Comparison::Equivalent => None,
            Comparison::Mismatch(mismatch) => Some(mismatch),
        }
    }
}

/// The first pair of significant nodes that did not match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch<'a> {
    /// Zero-based index of the pair in the filtered walk.
    pub position: usize,
    /// Location of the expected node (or the actual one when the expected
    /// side ran out first).
    pub path: String,
    pub reason: MismatchReason,
    #[serde(serialize_with = "serialize_label")]
    pub expected: Option<&'a XmlNode>,
    #[serde(serialize_with = "serialize_label")]
    pub actual: Option<&'a XmlNode>,
}

/// Why two nodes were judged different.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchReason {
    /// The actual document ran out of significant nodes first.
    MissingInActual,
    /// The actual document has significant nodes left over.
    UnexpectedInActual,
    KindMismatch {
        expected: NodeType,
        actual: NodeType,
    },
    XmlDecl,
    DocType(DocTypeMismatch),
    ElementName {
        expected: String,
        actual: String,
    },
    ElementNamespace {
        expected: Option<String>,
        actual: Option<String>,
    },
    AttributeCount {
        expected: usize,
        actual: usize,
    },
    AttributeMissing {
        name: String,
        namespace: Option<String>,
    },
    AttributeValue {
        name: String,
        expected: String,
        actual: String,
    },
    Text,
    CData,
    Comment,
    PiTarget,
    PiContent,
    /// A node kind the engine has no rule for.
    UnrecognizedKind {
        node: NodeType,
    },
}

/// Which DOCTYPE rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DocTypeMismatch {
    SystemId {
        expected: Option<String>,
        actual: Option<String>,
    },
    PublicId {
        expected: Option<String>,
        actual: Option<String>,
    },
    SubsetLength {
        expected: usize,
        actual: usize,
    },
    EntityMissing {
        name: String,
    },
    EntityValue {
        name: String,
    },
}

impl Display for MismatchReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::MissingInActual => write!(f, "actual document has fewer nodes"),
            MismatchReason::UnexpectedInActual => write!(f, "actual document has extra nodes"),
            MismatchReason::KindMismatch { expected, actual } => {
                write!(f, "node kind differs: expected {expected}, got {actual}")
            }
            MismatchReason::XmlDecl => write!(f, "XML declarations differ"),
            MismatchReason::DocType(inner) => write!(f, "DOCTYPE differs: {inner}"),
            MismatchReason::ElementName { expected, actual } => {
                write!(f, "element name differs: expected '{expected}', got '{actual}'")
            }
            MismatchReason::ElementNamespace { expected, actual } => write!(
                f,
                "element namespace differs: expected {}, got {}",
                display_opt(expected),
                display_opt(actual)
            ),
            MismatchReason::AttributeCount { expected, actual } => {
                write!(f, "attribute count differs: expected {expected}, got {actual}")
            }
            MismatchReason::AttributeMissing { name, namespace } => match namespace {
                Some(ns) => write!(f, "attribute '{{{ns}}}{name}' missing"),
                None => write!(f, "attribute '{name}' missing"),
            },
            MismatchReason::AttributeValue {
                name,
                expected,
                actual,
            } => write!(
                f,
                "attribute '{name}' differs: expected \"{expected}\", got \"{actual}\""
            ),
            MismatchReason::Text => write!(f, "text differs"),
            MismatchReason::CData => write!(f, "CDATA differs"),
            MismatchReason::Comment => write!(f, "comment differs"),
            MismatchReason::PiTarget => write!(f, "processing instruction target differs"),
            MismatchReason::PiContent => write!(f, "processing instruction content differs"),
            MismatchReason::UnrecognizedKind { node } => {
                write!(f, "no comparison rule for {node} nodes")
            }
        }
    }
}

impl Display for DocTypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DocTypeMismatch::SystemId { expected, actual } => write!(
                f,
                "system id: expected {}, got {}",
                display_opt(expected),
                display_opt(actual)
            ),
            DocTypeMismatch::PublicId { expected, actual } => write!(
                f,
                "public id: expected {}, got {}",
                display_opt(expected),
                display_opt(actual)
            ),
            DocTypeMismatch::SubsetLength { expected, actual } => write!(
                f,
                "internal subset size: expected {expected}, got {actual}"
            ),
            DocTypeMismatch::EntityMissing { name } => {
                write!(f, "entity '{name}' not declared in actual")
            }
            DocTypeMismatch::EntityValue { name } => write!(f, "entity '{name}' differs"),
        }
    }
}

fn display_opt(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("\"{v}\""),
        None => "none".to_string(),
    }
}

fn serialize_label<S: Serializer>(node: &Option<&XmlNode>, serializer: S) -> Result<S::Ok, S::Error> {
    match node {
        Some(node) => serializer.serialize_some(&node.label()),
        None => serializer.serialize_none(),
    }
}
