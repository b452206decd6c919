//! Canonical fingerprints of rooted tree shapes.
//!
//! A leaf is encoded as `10`. An internal node is `1`, followed by the codes of its children
//! sorted in ascending order, followed by `0`. Codes are ordered by length first and then
//! lexicographically, so two trees get the same code exactly when they are isomorphic as rooted
//! unordered trees.

use crate::{
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
    tree::{
        Tree,
        node::{Label, Node},
    },
};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

/// Canonical code of a rooted tree shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Barcode(String);

impl Barcode {
    /// Compute code of the subtree rooted at `node`. Labels are ignored.
    pub fn of(node: &Node) -> Barcode {
        Barcode::compose(node.children().iter().map(Barcode::of).collect())
    }

    /// Code of a node whose children have given codes, in any order
    pub fn compose(mut children: Vec<Barcode>) -> Barcode {
        children.sort_unstable();
        let mut code = String::with_capacity(2 + children.iter().map(|c| c.0.len()).sum::<usize>());
        code.push('1');
        for child in &children {
            code.push_str(&child.0);
        }
        code.push('0');
        Barcode(code)
    }

    /// Number of nodes in the encoded tree
    #[inline]
    pub fn size(&self) -> usize {
        self.0.len() / 2
    }

    /// Binary string representation
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuild a tree of the encoded shape.
    ///
    /// Every node is labeled with the position of its opening `1` in the code, so the root gets
    /// label `0` and children appear in code order.
    pub fn to_tree(&self) -> Tree {
        fn build(code: &[u8], pos: &mut usize) -> Node {
            let label = Label::new(*pos as u32);
            *pos += 1;
            let mut node = Node::new(label);
            while code[*pos] == b'1' {
                node.add_child(build(code, pos));
            }
            *pos += 1;
            node
        }

        Tree::new(build(self.0.as_bytes(), &mut 0))
    }

    /// All distinct rooted tree shapes with `size` nodes, in ascending order
    pub fn enumerate(size: usize) -> Vec<Barcode> {
        // Pick subtrees by non-increasing pool index, so each multiset is built once
        fn extend(
            remaining: usize,
            bound: usize,
            pool: &[Barcode],
            chosen: &mut Vec<Barcode>,
            out: &mut Vec<Barcode>,
        ) {
            if remaining == 0 {
                out.push(Barcode::compose(chosen.clone()));
                return;
            }
            for (idx, subtree) in pool[..bound].iter().enumerate() {
                if subtree.size() > remaining {
                    break;
                }
                chosen.push(subtree.clone());
                extend(remaining - subtree.size(), idx + 1, pool, chosen, out);
                chosen.pop();
            }
        }

        let mut pool: Vec<Barcode> = Vec::new();
        let mut current = Vec::new();
        for n in 1..=size {
            current.clear();
            extend(n - 1, pool.len(), &pool, &mut Vec::new(), &mut current);
            current.sort_unstable();
            if n < size {
                pool.extend(current.iter().cloned());
            }
        }
        current
    }

    fn parse_node(p: Parser<'_>) -> Option<(Parser<'_>, Barcode)> {
        let mut p = try_option!(p.parse_ascii_char('1'));
        let mut children = Vec::new();
        loop {
            if let Some(p) = p.parse_ascii_char('0') {
                return Some((p, Barcode::compose(children)));
            }
            let (pp, child) = try_option!(Barcode::parse_node(p));
            children.push(child);
            p = pp;
        }
    }

    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Barcode)> {
        lexeme!(p, Barcode::parse_node)
    }
}

impl_from_str_via_parser!(Barcode);

impl PartialOrd for Barcode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Barcode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;
    use std::str::FromStr;

    fn mirror(node: &Node) -> Node {
        Node::with_children(node.label(), node.children().iter().rev().map(mirror).collect())
    }

    #[test]
    fn leaf_and_small_trees() {
        let leaf = Node::new(Label::new(0));
        assert_eq!(Barcode::of(&leaf).as_str(), "10");

        let tree = Tree::from_str("0(1(2), 3)").unwrap();
        assert_eq!(tree.barcode().as_str(), "11011000");
        assert_eq!(tree.barcode().size(), 4);
    }

    #[test]
    fn ordering_is_length_first() {
        let short = Barcode::from_str("1100").unwrap();
        let long = Barcode::from_str("110100").unwrap();
        assert!(short < long);
        assert!(Barcode::from_str("111000").unwrap() > Barcode::from_str("110100").unwrap());
    }

    #[test]
    fn parse_canonicalizes() {
        let parsed = Barcode::from_str(" 1110010100 ").unwrap();
        assert_eq!(parsed.as_str(), "1101011000");
        assert!(Barcode::from_str("").is_err());
        assert!(Barcode::from_str("10 10").is_err());
        assert!(Barcode::from_str("110").is_err());
        assert!(Barcode::from_str("1020").is_err());
    }

    #[test]
    fn to_tree_uses_code_positions() {
        let tree = Barcode::from_str("11011000").unwrap().to_tree();
        assert_eq!(tree.to_string(), "0(1, 3(4))");
        assert_eq!(tree.find(Label::new(4)).unwrap().depth(), 2);
    }

    #[test]
    fn enumeration_counts() {
        let counts: Vec<usize> = (1..=8).map(|n| Barcode::enumerate(n).len()).collect();
        assert_eq!(counts, vec![1, 1, 2, 4, 9, 20, 48, 115]);
        assert!(Barcode::enumerate(0).is_empty());

        let trees = Barcode::enumerate(5);
        assert!(trees.windows(2).all(|w| w[0] < w[1]));
        assert!(trees.iter().all(|code| code.size() == 5));
    }

    #[test]
    fn invariant_under_child_order() {
        fn test(tree: Tree) -> bool {
            tree.barcode() == Barcode::of(&mirror(tree.root()))
        }

        QuickCheck::new().quickcheck(test as fn(Tree) -> bool);
    }

    #[test]
    fn to_tree_reproduces_shape() {
        fn test(tree: Tree) -> bool {
            let code = tree.barcode();
            let rebuilt = code.to_tree();
            rebuilt.size() == tree.size() && rebuilt.barcode() == code
        }

        QuickCheck::new().quickcheck(test as fn(Tree) -> bool);
    }

    #[test]
    fn children_sort_below_parent() {
        fn test(tree: Tree) -> bool {
            tree.preorder().into_iter().all(|node| {
                let code = Barcode::of(node);
                node.children().iter().all(|child| Barcode::of(child) < code)
            })
        }

        QuickCheck::new().quickcheck(test as fn(Tree) -> bool);
    }
}
