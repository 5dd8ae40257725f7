use std::fs;
use std::io::Write as _;
use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::{DocTypeDecl, EntityDecl, NodeKind, NodeType, NotationDecl, XmlNode};

/// Errors that can occur while writing XML from an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Failed to write output file.
    #[error("failed to write XML file: {0}")]
    Io(#[from] std::io::Error),
    /// The tree holds a node where XML has no syntax for it.
    #[error("cannot write a {0} node inside a DOCTYPE internal subset")]
    MisplacedNode(NodeType),
}

/// Serialize an [`XmlNode`] tree into XML bytes.
///
/// No indentation is added: whitespace in the output is exactly the
/// whitespace text nodes in the tree.
pub fn write(node: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    Ok(writer.into_inner())
}

/// Serialize an [`XmlNode`] tree and write it to `path`.
pub fn write_file(node: &XmlNode, path: &Path) -> Result<(), WriteError> {
    let bytes = write(node)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), WriteError> {
    match &node.kind {
        NodeKind::Document => {}
        NodeKind::XmlDecl(decl) => {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        NodeKind::DocType(doctype) => {
            let body = render_doctype(doctype)?;
            writer.write_event(Event::DocType(BytesText::from_escaped(body)))?;
        }
        NodeKind::Element(element) => {
            let qname = element.qualified_name();
            let mut start = BytesStart::new(qname.as_str());
            for attr in &element.attributes {
                start.push_attribute((attr.qualified_name().as_str(), attr.value.as_str()));
            }

            if node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }

            writer.write_event(Event::Start(start))?;
            for child in &node.children {
                write_node(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(qname.as_str())))?;
            return Ok(());
        }
        NodeKind::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        NodeKind::CData(text) => {
            writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
        }
        NodeKind::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        }
        NodeKind::ProcessingInstruction(pi) => {
            let body = if pi.content.is_empty() {
                pi.target.clone()
            } else {
                format!("{} {}", pi.target, pi.content)
            };
            writer.write_event(Event::PI(BytesPI::new(body)))?;
        }
        NodeKind::EntityDecl(entity) => {
            writer.get_mut().write_all(render_entity(entity).as_bytes())?;
        }
        NodeKind::NotationDecl(notation) => {
            writer.get_mut().write_all(render_notation(notation).as_bytes())?;
        }
    }

    for child in &node.children {
        write_node(writer, child)?;
    }
    Ok(())
}

/// Text between `<!DOCTYPE ` and `>`.
fn render_doctype(doctype: &DocTypeDecl) -> Result<String, WriteError> {
    let mut out = doctype.name.clone();
    if let Some(keyword) = doctype.external_id {
        out.push(' ');
        out.push_str(keyword.as_str());
        for literal in [&doctype.long_name, &doctype.uri].into_iter().flatten() {
            out.push(' ');
            out.push_str(literal);
        }
    }

    if !doctype.internal_subset.is_empty() {
        out.push_str(" [");
        for node in &doctype.internal_subset {
            out.push_str("\n  ");
            match &node.kind {
                NodeKind::EntityDecl(entity) => out.push_str(&render_entity(entity)),
                NodeKind::NotationDecl(notation) => out.push_str(&render_notation(notation)),
                NodeKind::Comment(text) => out.push_str(&format!("<!--{text}-->")),
                _ => return Err(WriteError::MisplacedNode(node.node_type())),
            }
        }
        out.push_str("\n]");
    }
    Ok(out)
}

fn render_entity(entity: &EntityDecl) -> String {
    let mut out = String::from("<!ENTITY ");
    if entity.parameter {
        out.push_str("% ");
    }
    out.push_str(&entity.name);

    if let Some(value) = &entity.value {
        out.push(' ');
        out.push_str(&quote(value));
    } else if let Some(system) = &entity.system_id {
        match &entity.public_id {
            Some(public) => out.push_str(&format!(" PUBLIC {} {}", quote(public), quote(system))),
            None => out.push_str(&format!(" SYSTEM {}", quote(system))),
        }
        if let Some(ndata) = &entity.ndata {
            out.push_str(&format!(" NDATA {ndata}"));
        }
    }
    out.push('>');
    out
}

fn render_notation(notation: &NotationDecl) -> String {
    format!(
        "<!NOTATION {} {} {}>",
        notation.name, notation.middle, notation.rest
    )
}

fn quote(value: &str) -> String {
    if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::write;
    use crate::tree::XmlNode;

    #[test]
    fn writes_compact_xml_without_indentation() {
        let tree = XmlNode::document().with_child(
            XmlNode::element("r")
                .with_child(XmlNode::text("a < b"))
                .with_child(XmlNode::cdata("<raw>"))
                .with_child(XmlNode::comment(" note "))
                .with_child(XmlNode::processing_instruction("pi", "data"))
                .with_child(XmlNode::element("empty")),
        );

        let out = String::from_utf8(write(&tree).expect("write")).expect("utf8");
        assert_eq!(
            out,
            "<r>a &lt; b<![CDATA[<raw>]]><!-- note --><?pi data?><empty/></r>"
        );
    }
}
