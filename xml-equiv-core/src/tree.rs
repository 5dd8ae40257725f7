use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A node in a parsed XML document.
///
/// Every node owns its children in document order. Nodes that cannot have
/// children (text, comments, declarations) simply keep the vector empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// What this node is.
    pub kind: NodeKind,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

/// The closed set of node kinds the comparator understands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum NodeKind {
    Document,
    XmlDecl(XmlDecl),
    DocType(DocTypeDecl),
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(ProcessingInstruction),
    EntityDecl(EntityDecl),
    NotationDecl(NotationDecl),
}

/// Payload-free mirror of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Document,
    XmlDecl,
    DocType,
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
    EntityDecl,
    NotationDecl,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::XmlDecl => "xml declaration",
            NodeType::DocType => "doctype",
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::CData => "cdata",
            NodeType::Comment => "comment",
            NodeType::ProcessingInstruction => "processing instruction",
            NodeType::EntityDecl => "entity declaration",
            NodeType::NotationDecl => "notation declaration",
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `<?xml ...?>` declaration, compared as a flat record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// An element with its namespace already resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    /// Prefix as written in the source, empty when unprefixed.
    pub prefix: String,
    /// Local name.
    pub name: String,
    /// Namespace URI the prefix (or default namespace) resolved to.
    pub namespace: Option<String>,
    /// Attributes in source order, namespace declarations included.
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Prefixed name as it appeared in the source.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.prefix, self.name)
        }
    }

    /// Find a non-declaration attribute by namespace URI and local name.
    pub fn attribute_ns(&self, namespace: Option<&str>, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| {
            !attr.is_namespace_declaration()
                && attr.name == name
                && attr.namespace.as_deref() == namespace
        })
    }

    /// Attributes that carry meaning, i.e. everything but `xmlns` bindings.
    pub fn semantic_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|attr| !attr.is_namespace_declaration())
    }
}

/// An attribute with its namespace already resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Prefix as written in the source, empty when unprefixed.
    pub prefix: String,
    /// Local name.
    pub name: String,
    /// Namespace URI. Unprefixed attributes are never in a namespace.
    pub namespace: Option<String>,
    pub value: String,
}

impl Attribute {
    /// `xmlns:p="..."` and `xmlns="..."` bind prefixes; they are not data.
    pub fn is_namespace_declaration(&self) -> bool {
        self.prefix == "xmlns" || (self.prefix.is_empty() && self.name == "xmlns")
    }

    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.prefix, self.name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingInstruction {
    pub target: String,
    pub content: String,
}

/// Keyword introducing a DOCTYPE's external identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExternalIdKeyword {
    System,
    Public,
}

impl ExternalIdKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            ExternalIdKeyword::System => "SYSTEM",
            ExternalIdKeyword::Public => "PUBLIC",
        }
    }
}

/// A `<!DOCTYPE ...>` declaration.
///
/// `long_name` and `uri` keep the quotes they were written with; use
/// [`DocTypeView`](crate::model::DocTypeView) to read the identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocTypeDecl {
    /// Declared root element name.
    pub name: String,
    pub external_id: Option<ExternalIdKeyword>,
    /// Public literal for `PUBLIC`, system literal for `SYSTEM`.
    pub long_name: Option<String>,
    /// System literal following a public literal.
    pub uri: Option<String>,
    /// Declarations and comments from the bracketed internal subset.
    pub internal_subset: Vec<XmlNode>,
}

/// An `<!ENTITY ...>` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityDecl {
    pub name: String,
    /// `<!ENTITY % name ...>`
    pub parameter: bool,
    /// Replacement text of an internal entity.
    pub value: Option<String>,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
    /// Notation name of an unparsed external entity.
    pub ndata: Option<String>,
}

/// A `<!NOTATION ...>` declaration, kept close to its source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotationDecl {
    pub name: String,
    /// The keyword after the name, normally `PUBLIC` or `SYSTEM`.
    pub middle: String,
    /// Everything after the keyword: one or two quoted identifiers.
    pub rest: String,
}

impl XmlNode {
    /// Create a childless node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// Create an unprefixed element outside any namespace.
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Element(Element {
            name: name.into(),
            ..Element::default()
        }))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(value.into()))
    }

    pub fn cdata(value: impl Into<String>) -> Self {
        Self::new(NodeKind::CData(value.into()))
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment(value.into()))
    }

    pub fn processing_instruction(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(NodeKind::ProcessingInstruction(ProcessingInstruction {
            target: target.into(),
            content: content.into(),
        }))
    }

    /// Append a child and return `self`, for building trees inline.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::XmlDecl(_) => NodeType::XmlDecl,
            NodeKind::DocType(_) => NodeType::DocType,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::CData(_) => NodeType::CData,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
            NodeKind::EntityDecl(_) => NodeType::EntityDecl,
            NodeKind::NotationDecl(_) => NodeType::NotationDecl,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_doctype(&self) -> Option<&DocTypeDecl> {
        match &self.kind {
            NodeKind::DocType(doctype) => Some(doctype),
            _ => None,
        }
    }

    /// Return the first element child with the provided local name.
    pub fn get_child(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.as_element().is_some_and(|e| e.name == name))
    }

    /// Return the document's root element.
    pub fn root_element(&self) -> Option<&XmlNode> {
        match self.kind {
            NodeKind::Element(_) => Some(self),
            _ => self.children.iter().find(|c| c.as_element().is_some()),
        }
    }

    /// Return the document's DOCTYPE node, if any.
    pub fn doctype(&self) -> Option<&DocTypeDecl> {
        self.as_doctype()
            .or_else(|| self.children.iter().find_map(XmlNode::as_doctype))
    }

    /// Short one-line description used in outlines and mismatch reports.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Document => "#document".to_string(),
            NodeKind::XmlDecl(decl) => format!("<?xml version=\"{}\"?>", decl.version),
            NodeKind::DocType(doctype) => format!("<!DOCTYPE {}>", doctype.name),
            NodeKind::Element(element) => {
                let mut out = format!("<{}", element.qualified_name());
                for attr in &element.attributes {
                    out.push_str(&format!(" {}=\"{}\"", attr.qualified_name(), attr.value));
                }
                out.push('>');
                out
            }
            NodeKind::Text(value) => format!("text {:?}", value),
            NodeKind::CData(value) => format!("cdata {:?}", value),
            NodeKind::Comment(value) => format!("<!--{}-->", value),
            NodeKind::ProcessingInstruction(pi) => format!("<?{} {}?>", pi.target, pi.content),
            NodeKind::EntityDecl(entity) => format!("<!ENTITY {}>", entity.name),
            NodeKind::NotationDecl(notation) => format!("<!NOTATION {}>", notation.name),
        }
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bytes = crate::writer::write(self).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::{Attribute, Element, NodeKind, NodeType, XmlNode};

    #[test]
    fn get_child_finds_elements_by_local_name() {
        let root = XmlNode::element("root")
            .with_child(XmlNode::text("  "))
            .with_child(XmlNode::element("child"));

        assert!(root.get_child("child").is_some());
        assert!(root.get_child("missing").is_none());
    }

    #[test]
    fn namespace_declarations_are_not_semantic() {
        let element = Element {
            name: "e".to_string(),
            attributes: vec![
                Attribute {
                    prefix: "xmlns".to_string(),
                    name: "p".to_string(),
                    namespace: None,
                    value: "urn:p".to_string(),
                },
                Attribute {
                    name: "xmlns".to_string(),
                    value: "urn:default".to_string(),
                    ..Attribute::default()
                },
                Attribute {
                    name: "a".to_string(),
                    value: "1".to_string(),
                    ..Attribute::default()
                },
            ],
            ..Element::default()
        };

        assert_eq!(element.semantic_attributes().count(), 1);
        assert!(element.attribute_ns(None, "a").is_some());
        assert!(element.attribute_ns(None, "xmlns").is_none());
    }

    #[test]
    fn node_type_mirrors_kind() {
        let node = XmlNode::new(NodeKind::CData("x".to_string()));
        assert_eq!(node.node_type(), NodeType::CData);
        assert_eq!(NodeType::ProcessingInstruction.to_string(), "processing instruction");
    }
}
