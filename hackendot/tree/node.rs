//! Labeled tree vertices

use crate::{
    display,
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
};
use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

/// Identity of a node. Labels are unique within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(u32);

impl Label {
    /// Label reserved for ghost roots created by [`Tree::from_forest`](crate::tree::Tree::from_forest)
    pub const GHOST: Label = Label(u32::MAX);

    /// Construct new label. `u32::MAX` is the value of [`Label::GHOST`].
    #[inline]
    pub const fn new(value: u32) -> Label {
        Label(value)
    }

    /// Get the underlying label value
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check if label is the reserved ghost label
    #[inline]
    pub const fn is_ghost(self) -> bool {
        self.0 == u32::MAX
    }

    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Label)> {
        if let Some(p) = p.parse_ascii_char('_') {
            return Some((p, Label::GHOST));
        }
        let (p, value) = try_option!(p.parse_u32());
        if value == u32::MAX {
            return None;
        }
        Some((p, Label(value)))
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ghost() {
            write!(f, "_")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Tree vertex with an ordered list of children.
///
/// Nodes compare and hash by label only: two nodes are the same node when they carry the same
/// label, even if they come from different copies of a tree.
#[derive(Debug, Clone)]
pub struct Node {
    label: Label,
    depth: u32,
    children: Vec<Node>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl Node {
    /// Create a node without children
    #[inline]
    pub const fn new(label: Label) -> Node {
        Node {
            label,
            depth: 0,
            children: Vec::new(),
        }
    }

    /// Create a node with given children. Depths are stamped relative to this node.
    pub fn with_children(label: Label, children: Vec<Node>) -> Node {
        let mut node = Node {
            label,
            depth: 0,
            children,
        };
        node.stamp_depths(0);
        node
    }

    /// Node label
    #[inline]
    pub const fn label(&self) -> Label {
        self.label
    }

    /// Distance from the root, as of the last re-stamp
    #[inline]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Children of the node in insertion order
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Consume the node returning its children
    #[inline]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Append a child. Depth of the new branch is stamped below this node.
    pub fn add_child(&mut self, mut child: Node) {
        child.stamp_depths(self.depth + 1);
        self.children.push(child);
    }

    /// Check if node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted at this node
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Find a node with given label in the subtree rooted at this node
    pub fn find(&self, label: Label) -> Option<&Node> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }

    pub(crate) fn stamp_depths(&mut self, depth: u32) {
        self.depth = depth;
        for child in &mut self.children {
            child.stamp_depths(depth + 1);
        }
    }

    pub(crate) fn collect_preorder<'n>(&'n self, acc: &mut Vec<&'n Node>) {
        acc.push(self);
        for child in &self.children {
            child.collect_preorder(acc);
        }
    }

    pub(crate) fn collect_postorder<'n>(&'n self, acc: &mut Vec<&'n Node>) {
        for child in &self.children {
            child.collect_postorder(acc);
        }
        acc.push(self);
    }

    pub(crate) fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Node)> {
        let (p, label) = try_option!(lexeme!(p, Label::parse));
        let Some(mut p) = p.parse_ascii_char('(') else {
            return Some((p, Node::new(label)));
        };

        let mut children = Vec::new();
        loop {
            let (pp, child) = try_option!(lexeme!(p, Node::parse));
            children.push(child);
            if let Some(pp) = pp.parse_ascii_char(',') {
                p = pp;
            } else {
                p = try_option!(pp.parse_ascii_char(')'));
                break;
            }
        }
        let p = p.trim_whitespace();
        Some((p, Node::with_children(label, children)))
    }
}

impl_from_str_via_parser!(Node);

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if !self.is_leaf() {
            display::parens(f, |f| display::commas(f, &self.children))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn equality_is_by_label() {
        let lhs = Node::with_children(Label::new(3), vec![Node::new(Label::new(4))]);
        let rhs = Node::new(Label::new(3));
        assert_eq!(lhs, rhs);
        assert_ne!(lhs, Node::new(Label::new(4)));

        let mut set = std::collections::HashSet::new();
        set.insert(lhs);
        assert!(set.contains(&rhs));
    }

    #[test]
    fn add_child_stamps_depth() {
        let mut root = Node::new(Label::new(0));
        let mut child = Node::new(Label::new(1));
        child.add_child(Node::new(Label::new(2)));
        root.add_child(child);

        let grandchild = root.find(Label::new(2)).unwrap();
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(root.size(), 3);
        assert!(root.find(Label::new(9)).is_none());
    }

    #[test]
    fn parse_and_display() {
        let node = Node::from_str(" 1 ( 2 , 3(4) ) ").unwrap();
        assert_eq!(node.to_string(), "1(2, 3(4))");
        assert_eq!(node.children()[1].children()[0].depth(), 2);

        assert_eq!(Node::from_str("_(5)").unwrap().label(), Label::GHOST);
        assert!(Node::from_str("1(").is_err());
        assert!(Node::from_str("1()").is_err());
        assert!(Node::from_str("1(2) 3").is_err());
    }

    #[test]
    fn ghost_value_is_reserved() {
        assert!(Label::new(u32::MAX).is_ghost());
        assert_eq!(Label::new(u32::MAX), Label::GHOST);
        assert!(!Label::new(u32::MAX - 1).is_ghost());
        assert!(Node::from_str("4294967295").is_err());
        assert_eq!(
            Node::from_str("4294967294").unwrap().label(),
            Label::new(u32::MAX - 1)
        );
    }
}
