use crate::model::NotationView;
use crate::tree::{DocTypeDecl, EntityDecl, ExternalIdKeyword, NodeKind, XmlNode};

/// Identifier and declaration accessors for a `<!DOCTYPE ...>` node.
///
/// Only the internal subset is visible; declarations in an external DTD are
/// never resolved.
#[derive(Debug, Clone, Copy)]
pub struct DocTypeView<'a> {
    decl: &'a DocTypeDecl,
}

impl<'a> DocTypeView<'a> {
    pub fn new(decl: &'a DocTypeDecl) -> Self {
        Self { decl }
    }

    /// Wrap a node if it is a DOCTYPE.
    pub fn from_node(node: &'a XmlNode) -> Option<Self> {
        node.as_doctype().map(Self::new)
    }

    pub fn decl(&self) -> &'a DocTypeDecl {
        self.decl
    }

    /// Declared root element name.
    pub fn name(&self) -> &'a str {
        &self.decl.name
    }

    /// Public identifier of the document's DTD.
    pub fn public(&self) -> Option<&'a str> {
        match self.decl.external_id {
            Some(ExternalIdKeyword::Public) => self.decl.long_name.as_deref().map(strip_quotes),
            Some(ExternalIdKeyword::System) | None => None,
        }
    }

    /// System identifier of the document's DTD.
    pub fn system(&self) -> Option<&'a str> {
        match self.decl.external_id {
            Some(ExternalIdKeyword::System) => self.decl.long_name.as_deref().map(strip_quotes),
            Some(ExternalIdKeyword::Public) => self.decl.uri.as_deref().map(strip_quotes),
            None => None,
        }
    }

    pub fn internal_subset(&self) -> &'a [XmlNode] {
        &self.decl.internal_subset
    }

    /// Notations declared in the internal subset, in declaration order.
    pub fn notations(&self) -> impl Iterator<Item = NotationView<'a>> {
        self.decl
            .internal_subset
            .iter()
            .filter_map(NotationView::from_node)
    }

    /// First internal-subset notation with the given name.
    pub fn notation(&self, name: &str) -> Option<NotationView<'a>> {
        self.notations().find(|notation| notation.name() == name)
    }

    /// Entities declared in the internal subset, in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &'a EntityDecl> {
        self.decl
            .internal_subset
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::EntityDecl(entity) => Some(entity),
                _ => None,
            })
    }

    /// First general (non-parameter) entity with the given name.
    pub fn entity(&self, name: &str) -> Option<&'a EntityDecl> {
        self.entities()
            .find(|entity| !entity.parameter && entity.name == name)
    }

    /// First entity matching both name and parameter-ness of `like`.
    pub(crate) fn entity_like(&self, like: &EntityDecl) -> Option<&'a EntityDecl> {
        self.entities()
            .find(|entity| entity.parameter == like.parameter && entity.name == like.name)
    }
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if value.len() >= 2 => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
