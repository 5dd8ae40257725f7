use crate::tree::{NodeKind, XmlNode};

/// Decides whether a node takes part in a traversal.
pub trait NodeFilter {
    fn accept(&self, node: &XmlNode) -> bool;
}

impl<F> NodeFilter for F
where
    F: Fn(&XmlNode) -> bool,
{
    fn accept(&self, node: &XmlNode) -> bool {
        self(node)
    }
}

/// Accepts every node except text that is empty or whitespace only.
///
/// CDATA sections are always accepted, whatever they contain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignificanceFilter;

impl NodeFilter for SignificanceFilter {
    fn accept(&self, node: &XmlNode) -> bool {
        match &node.kind {
            NodeKind::Text(value) => is_significant(value),
            _ => true,
        }
    }
}

/// True unless `value` is empty or all ASCII whitespace.
pub fn is_significant(value: &str) -> bool {
    !value.chars().all(|c| c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::{NodeFilter, SignificanceFilter};
    use crate::tree::XmlNode;

    #[test]
    fn rejects_blank_text_only() {
        let filter = SignificanceFilter;
        assert!(!filter.accept(&XmlNode::text("")));
        assert!(!filter.accept(&XmlNode::text(" \n\t \r\n")));
        assert!(filter.accept(&XmlNode::text("  x  ")));
        assert!(filter.accept(&XmlNode::cdata("   ")));
        assert!(filter.accept(&XmlNode::comment("")));
        assert!(filter.accept(&XmlNode::element("e")));
    }

    #[test]
    fn closures_are_filters() {
        let only_elements = |node: &XmlNode| node.as_element().is_some();
        assert!(only_elements.accept(&XmlNode::element("e")));
        assert!(!only_elements.accept(&XmlNode::comment("c")));
    }
}
