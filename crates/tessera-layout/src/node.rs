//! Layout Tree
//!
//! Nodes own their children; each node carries its style and the
//! rectangle written by the most recent layout pass.

use crate::box_model::Rect;
use crate::style::{Display, Style};

/// One box in the layout tree
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub style: Style,
    pub children: Vec<Node>,
    /// Text content of an `InlineText` leaf
    pub text: Option<String>,
    /// Border box relative to the parent's border-box origin
    pub rect: Rect,
}

impl Node {
    pub fn new(style: Style) -> Self {
        Self { style, ..Default::default() }
    }

    pub fn with_children(style: Style, children: Vec<Node>) -> Self {
        Self { style, children, ..Default::default() }
    }

    /// Text leaf. Forces `Display::InlineText`.
    pub fn text(style: Style, text: impl Into<String>) -> Self {
        Self {
            style: Style { display: Display::InlineText, ..style },
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Rects of the subtree in pre-order
    pub fn rects(&self) -> Vec<Rect> {
        let mut out = Vec::with_capacity(self.count());
        self.collect_rects(&mut out);
        out
    }

    fn collect_rects(&self, out: &mut Vec<Rect>) {
        out.push(self.rect);
        for child in &self.children {
            child.collect_rects(out);
        }
    }

    /// Zero the rects of this node and every descendant
    pub fn clear_rects(&mut self) {
        self.rect = Rect::default();
        for child in &mut self.children {
            child.clear_rects();
        }
    }

    /// Whether the node takes part in layout
    pub fn is_in_flow(&self) -> bool {
        self.style.display != Display::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_rects() {
        let tree = Node::with_children(
            Style::default(),
            vec![
                Node::new(Style::default()),
                Node::with_children(Style::default(), vec![Node::new(Style::default())]),
            ],
        );
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.rects().len(), 4);
    }

    #[test]
    fn test_text_leaf_display() {
        let leaf = Node::text(Style::default(), "hello");
        assert_eq!(leaf.style.display, Display::InlineText);
        assert_eq!(leaf.text.as_deref(), Some("hello"));
    }
}
