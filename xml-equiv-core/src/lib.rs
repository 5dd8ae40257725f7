//! Semantic equivalence checks for XML documents.
//!
//! Two documents are equivalent when they say the same thing, even if they
//! differ in whitespace-only text, namespace prefixes, where namespace
//! declarations sit, attribute order, or the URL a DOCTYPE points its DTD at.
//!
//! ```
//! use xml_equiv_core::{equivalent, parse_str};
//!
//! let expected = parse_str(r#"<p:r xmlns:p="urn:x" a="1" b="2"/>"#).unwrap();
//! let actual = parse_str("<q:r xmlns:q=\"urn:x\" b=\"2\" a=\"1\">\n</q:r>").unwrap();
//! assert!(equivalent(&expected, &actual).unwrap());
//! ```

pub mod assert;
pub mod dtd;
pub mod equiv;
pub mod filter;
pub mod format;
pub mod iter;
pub mod model;
pub mod parser;
pub mod tree;
pub mod writer;

pub use assert::{assert_xml_equal, assert_xml_not_equal, XmlSource};
pub use equiv::{compare, equivalent, Comparison, DocTypeMismatch, Mismatch, MismatchReason};
pub use filter::{NodeFilter, SignificanceFilter};
pub use format::{format_json, format_summary, format_text, render_tree};
pub use iter::NodeIterator;
pub use model::{DocTypeView, ModelError, NotationView};
pub use parser::{parse, parse_file, parse_reader, parse_str, ParseError};
pub use tree::{
    Attribute, DocTypeDecl, Element, EntityDecl, ExternalIdKeyword, NodeKind, NodeType,
    NotationDecl, ProcessingInstruction, XmlDecl, XmlNode,
};
pub use writer::{write, write_file, WriteError};
