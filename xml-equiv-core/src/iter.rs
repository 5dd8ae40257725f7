use std::slice;

use crate::filter::NodeFilter;
use crate::tree::XmlNode;

/// Lazy pre-order walk over the nodes a filter accepts.
///
/// A node rejected by the filter is skipped, but its descendants are still
/// visited. The walk keeps one child cursor per open ancestor, so memory is
/// bounded by tree depth rather than tree size.
///
/// Besides [`Iterator::next`], the iterator offers [`has_next`](Self::has_next)
/// so two walks can be advanced in lock-step.
pub struct NodeIterator<'a, F> {
    filter: F,
    root: Option<&'a XmlNode>,
    /// Child cursors of the nodes in `ancestors`.
    cursors: Vec<slice::Iter<'a, XmlNode>>,
    /// Open nodes from the root down to the last visited node.
    ancestors: Vec<&'a XmlNode>,
    peeked: Option<&'a XmlNode>,
}

impl<'a, F: NodeFilter> NodeIterator<'a, F> {
    pub fn new(root: &'a XmlNode, filter: F) -> Self {
        Self {
            filter,
            root: Some(root),
            cursors: Vec::new(),
            ancestors: Vec::new(),
            peeked: None,
        }
    }

    /// True if another accepted node remains.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.advance_accepted();
        }
        self.peeked.is_some()
    }

    /// Chain of nodes from the root to the node most recently returned by
    /// [`Iterator::next`], inclusive. Rejected ancestors are included.
    ///
    /// Only meaningful until the iterator moves again; calling
    /// [`has_next`](Self::has_next) may already move it.
    pub fn ancestors(&self) -> &[&'a XmlNode] {
        &self.ancestors
    }

    fn advance_accepted(&mut self) -> Option<&'a XmlNode> {
        while let Some(node) = self.advance() {
            if self.filter.accept(node) {
                return Some(node);
            }
        }
        None
    }

    fn advance(&mut self) -> Option<&'a XmlNode> {
        if let Some(root) = self.root.take() {
            self.open(root);
            return Some(root);
        }

        while let Some(cursor) = self.cursors.last_mut() {
            match cursor.next() {
                Some(child) => {
                    self.open(child);
                    return Some(child);
                }
                None => {
                    self.cursors.pop();
                    self.ancestors.pop();
                }
            }
        }
        None
    }

    fn open(&mut self, node: &'a XmlNode) {
        self.ancestors.push(node);
        self.cursors.push(node.children.iter());
    }
}

impl<'a, F: NodeFilter> Iterator for NodeIterator<'a, F> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(node) => Some(node),
            None => self.advance_accepted(),
        }
    }
}
