use std::collections::HashMap;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use thiserror::Error;

use crate::dtd::{parse_doctype, DtdError};
use crate::tree::{Attribute, Element, NodeKind, XmlDecl, XmlNode};

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode a character or entity reference.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input.
    #[error("failed to read XML input: {0}")]
    Io(#[from] std::io::Error),
    /// The DOCTYPE declaration could not be understood.
    #[error(transparent)]
    Dtd(#[from] DtdError),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into a document tree.
///
/// The returned node is always a [`NodeKind::Document`]. Whitespace is kept
/// exactly as written.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    build_document(NsReader::from_reader(xml))
}

/// Parse an XML string into a document tree.
pub fn parse_str(xml: &str) -> Result<XmlNode, ParseError> {
    parse(xml.as_bytes())
}

/// Parse a document from any buffered reader.
pub fn parse_reader<R: BufRead>(input: R) -> Result<XmlNode, ParseError> {
    build_document(NsReader::from_reader(input))
}

/// Parse an XML file into a document tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn build_document<R: BufRead>(mut reader: NsReader<R>) -> Result<XmlNode, ParseError> {
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut builder = TreeBuilder::new();
    // Fully expanded replacement text of internal entities declared in the DOCTYPE.
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element = open_element(&reader, &e, &entities)?;
                builder.stack.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(&reader, &e, &entities)?;
                builder.append(element)?;
            }
            Event::End(_) => {
                if builder.stack.len() < 2 {
                    return Err(ParseError::Malformed(
                        "encountered closing tag without open tag".to_string(),
                    ));
                }
                if let Some(element) = builder.stack.pop() {
                    builder.append(element)?;
                }
            }
            Event::Text(e) => {
                let text = e.unescape_with(|name| resolve_entity(&entities, name))?;
                builder.push_text(&text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                builder.append(XmlNode::cdata(text))?;
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e)?.to_string();
                builder.append(XmlNode::comment(text))?;
            }
            Event::PI(e) => {
                let target = std::str::from_utf8(e.target())?;
                let content = std::str::from_utf8(e.content())?.trim_start();
                builder.append(XmlNode::processing_instruction(target, content))?;
            }
            Event::Decl(e) => {
                let decl = build_xml_decl(&e)?;
                builder.append(XmlNode::new(NodeKind::XmlDecl(decl)))?;
            }
            Event::DocType(e) => {
                let doctype = parse_doctype(std::str::from_utf8(&e)?)?;
                for node in &doctype.internal_subset {
                    if let NodeKind::EntityDecl(entity) = &node.kind {
                        // The first declaration of an entity is binding.
                        if entity.parameter || entities.contains_key(&entity.name) {
                            continue;
                        }
                        if let Some(value) = &entity.value {
                            let expanded =
                                unescape_with(value, |name| resolve_entity(&entities, name))?
                                    .into_owned();
                            entities.insert(entity.name.clone(), expanded);
                        }
                    }
                }
                builder.append(XmlNode::new(NodeKind::DocType(doctype)))?;
            }
            Event::Eof => break,
        }
        buf.clear();
    }

    builder.finish()
}

fn build_xml_decl(e: &BytesDecl<'_>) -> Result<XmlDecl, ParseError> {
    let version = std::str::from_utf8(&e.version()?)?.to_string();
    Ok(XmlDecl {
        version,
        encoding: decl_field(e.encoding())?,
        standalone: decl_field(e.standalone())?,
    })
}

fn decl_field(
    value: Option<Result<std::borrow::Cow<'_, [u8]>, quick_xml::Error>>,
) -> Result<Option<String>, ParseError> {
    match value {
        Some(raw) => {
            let raw = raw.map_err(quick_xml::Error::from)?;
            Ok(Some(std::str::from_utf8(&raw)?.to_string()))
        }
        None => Ok(None),
    }
}

/// Build an element node, taking namespace URIs from the reader's scope.
///
/// Prefixes with no binding in scope resolve to no namespace.
fn open_element<R>(
    reader: &NsReader<R>,
    e: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> Result<XmlNode, ParseError> {
    let qname = std::str::from_utf8(e.name().as_ref())?.to_string();
    let (prefix, name) = split_qname(&qname);
    let (resolved, _) = reader.resolve_element(e.name());
    let mut element = Element {
        prefix: prefix.to_string(),
        name: name.to_string(),
        namespace: namespace_uri(resolved)?,
        attributes: Vec::new(),
    };

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let (prefix, name) = split_qname(key);
        let (resolved, _) = reader.resolve_attribute(attr.key);
        let value = attr
            .decode_and_unescape_value_with(reader.decoder(), |name| {
                resolve_entity(entities, name)
            })?
            .into_owned();
        element.attributes.push(Attribute {
            prefix: prefix.to_string(),
            name: name.to_string(),
            namespace: namespace_uri(resolved)?,
            value,
        });
    }

    Ok(XmlNode::new(NodeKind::Element(element)))
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match resolved {
        ResolveResult::Bound(ns) if !ns.as_ref().is_empty() => {
            Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string()))
        }
        ResolveResult::Bound(_) | ResolveResult::Unbound | ResolveResult::Unknown(_) => Ok(None),
    }
}

/// Assembles the tree from the event stream.
///
/// `stack` holds the document node followed by every open element.
struct TreeBuilder {
    stack: Vec<XmlNode>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![XmlNode::document()],
        }
    }

    fn append(&mut self, node: XmlNode) -> Result<(), ParseError> {
        let at_top_level = self.stack.len() == 1;
        let parent = self
            .stack
            .last_mut()
            .ok_or_else(|| ParseError::Malformed("document node missing".to_string()))?;

        if at_top_level
            && node.as_element().is_some()
            && parent.children.iter().any(|c| c.as_element().is_some())
        {
            return Err(ParseError::Malformed(
                "multiple top-level elements found".to_string(),
            ));
        }
        parent.children.push(node);
        Ok(())
    }

    /// Append text, merging with a directly preceding text node.
    fn push_text(&mut self, text: &str) {
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        if let Some(XmlNode {
            kind: NodeKind::Text(existing),
            ..
        }) = parent.children.last_mut()
        {
            existing.push_str(text);
        } else {
            parent.children.push(XmlNode::text(text));
        }
    }

    fn finish(mut self) -> Result<XmlNode, ParseError> {
        if self.stack.len() != 1 {
            return Err(ParseError::Malformed(
                "unclosed element(s) at end of document".to_string(),
            ));
        }
        let document = self
            .stack
            .pop()
            .ok_or_else(|| ParseError::Malformed("document node missing".to_string()))?;
        if document.root_element().is_none() {
            return Err(ParseError::Malformed("no root element found".to_string()));
        }
        Ok(document)
    }
}

/// Predefined XML entities first, then internal entities from the DOCTYPE.
fn resolve_entity<'e>(entities: &'e HashMap<String, String>, name: &str) -> Option<&'e str> {
    resolve_predefined_entity(name).or_else(|| entities.get(name).map(String::as_str))
}

fn split_qname(qname: &str) -> (&str, &str) {
    qname.split_once(':').unwrap_or(("", qname))
}
