//! Rooted trees and forests of von Neumann's Hackendot.
//!
//! A move picks a node and deletes it together with every node on its path up to the root.
//! Branches hanging off that path become independent trees. Forests are represented by a single
//! [`Tree`] whose root is a ghost: it anchors the forest and is never a legal move itself.

use crate::{
    parsing::{Parser, impl_from_str_via_parser, try_option},
    tree::{
        barcode::Barcode,
        node::{Label, Node},
    },
};
use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Display},
};

pub mod barcode;
pub mod node;
pub mod random;

pub(crate) type LabelMap<V> = HashMap<Label, V, ahash::RandomState>;
pub(crate) type LabelSet = HashSet<Label, ahash::RandomState>;

/// Rooted tree. The root of a game position is its ghost root.
#[derive(Debug, Clone)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Create a tree rooted at `root`, stamping depths from it
    pub fn new(mut root: Node) -> Tree {
        root.stamp_depths(0);
        Tree { root }
    }

    /// Put forest roots under a fresh ghost root labeled [`Label::GHOST`]
    pub fn from_forest(roots: Vec<Node>) -> Tree {
        Tree::new(Node::with_children(Label::GHOST, roots))
    }

    /// Root of the tree
    #[inline]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the tree returning its root
    #[inline]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Number of nodes, root included
    #[inline]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Find a node with given label
    #[inline]
    pub fn find(&self, label: Label) -> Option<&Node> {
        self.root.find(label)
    }

    /// Find the parent of a node with given label. `None` for the root and for unknown labels.
    pub fn parent_of(&self, label: Label) -> Option<&Node> {
        self.preorder()
            .into_iter()
            .find(|node| node.children().iter().any(|child| child.label() == label))
    }

    /// Nodes in depth-first prefix order
    pub fn preorder(&self) -> Vec<&Node> {
        let mut acc = Vec::with_capacity(self.size());
        self.root.collect_preorder(&mut acc);
        acc
    }

    /// Nodes in depth-first postfix order
    pub fn postorder(&self) -> Vec<&Node> {
        let mut acc = Vec::with_capacity(self.size());
        self.root.collect_postorder(&mut acc);
        acc
    }

    /// Nodes at given distance from the root, left to right
    pub fn level(&self, depth: u32) -> Vec<&Node> {
        let mut frontier = vec![&self.root];
        for _ in 0..depth {
            frontier = frontier
                .into_iter()
                .flat_map(|node| node.children().iter())
                .collect();
        }
        frontier
    }

    /// Recompute depth of every node from the root
    pub fn restamp_depths(&mut self) {
        self.root.stamp_depths(0);
    }

    /// Canonical fingerprint of the tree shape
    pub fn barcode(&self) -> Barcode {
        Barcode::of(&self.root)
    }

    fn removal_path(&self, label: Label) -> Option<Vec<&Node>> {
        let preorder_index: LabelMap<usize> = self
            .preorder()
            .into_iter()
            .enumerate()
            .map(|(idx, node)| (node.label(), idx))
            .collect();
        let postorder = self.postorder();
        let start = postorder.iter().position(|node| node.label() == label)?;

        // Nodes later in postorder but earlier in prefix order are exactly the ancestors
        let mut path = vec![postorder[start]];
        let mut last = preorder_index[&label];
        for &node in &postorder[start + 1..] {
            let idx = preorder_index[&node.label()];
            if idx < last {
                path.push(node);
                last = idx;
            }
        }
        Some(path)
    }

    /// Labels removed by deleting `label`: the node itself followed by its ancestors up to the
    /// root. `None` if the tree has no such node.
    pub fn removal_set(&self, label: Label) -> Option<Vec<Label>> {
        self.removal_path(label)
            .map(|path| path.into_iter().map(Node::label).collect())
    }

    /// Branches left behind by deleting a node and all its ancestors, in the order they hang
    /// off the path from the root down to the node. `None` if the tree has no such node.
    pub fn detached(&self, label: Label) -> Option<Vec<&Node>> {
        let path = self.removal_path(label)?;
        let removed: LabelSet = path.iter().map(|node| node.label()).collect();
        Some(
            path.into_iter()
                .rev()
                .flat_map(|node| node.children())
                .filter(|child| !removed.contains(&child.label()))
                .collect(),
        )
    }

    /// Delete a node and all its ancestors, returning the branches that became detached as new
    /// roots.
    ///
    /// The tree itself is left untouched. Returns `None` if the tree has no such node.
    pub fn delete(&self, label: Label) -> Option<Vec<Node>> {
        let orphans = self.detached(label)?;
        Some(
            orphans
                .into_iter()
                .map(|orphan| {
                    let mut orphan = orphan.clone();
                    orphan.stamp_depths(0);
                    orphan
                })
                .collect(),
        )
    }

    /// Positions reachable in one move, each under a fresh ghost root. Moves are tried on every
    /// node but the root, in prefix order.
    pub fn moves(&self) -> Vec<Tree> {
        self.preorder()
            .into_iter()
            .skip(1)
            .map(|node| Tree::from_forest(apply_move(self, node.label())))
            .collect()
    }

    /// Split nodes into the core and the complement-core.
    ///
    /// Leaves start in the core, internal nodes are candidates. A candidate joins the core when
    /// none of its children is in the core, until no candidate moves.
    pub fn partition(&self) -> Partition {
        let (mut core, mut candidates): (Vec<&Node>, Vec<&Node>) =
            self.postorder().into_iter().partition(|node| node.is_leaf());
        let mut core_set: LabelSet = core.iter().map(|node| node.label()).collect();

        loop {
            let before = candidates.len();
            candidates.retain(|node| {
                let has_core_child = node
                    .children()
                    .iter()
                    .any(|child| core_set.contains(&child.label()));
                if !has_core_child {
                    core_set.insert(node.label());
                    core.push(*node);
                }
                has_core_child
            });
            if candidates.len() == before {
                break;
            }
        }

        Partition {
            core: core.into_iter().map(Node::label).collect(),
            complement_core: candidates.into_iter().map(Node::label).collect(),
            core_set,
        }
    }

    /// Labels must be unique and only the root may be a ghost
    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Tree)> {
        let (p, root) = try_option!(Node::parse(p));
        let tree = Tree::new(root);

        let mut seen = LabelSet::default();
        let valid = tree
            .preorder()
            .into_iter()
            .enumerate()
            .all(|(idx, node)| {
                (idx == 0 || !node.label().is_ghost()) && seen.insert(node.label())
            });
        if !valid {
            return None;
        }
        Some((p, tree))
    }
}

impl_from_str_via_parser!(Tree);

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Core and complement-core of a tree
#[derive(Debug, Clone)]
pub struct Partition {
    core: Vec<Label>,
    complement_core: Vec<Label>,
    core_set: LabelSet,
}

impl Partition {
    /// Core nodes: leaves first, then nodes in the order they joined
    pub fn core(&self) -> &[Label] {
        &self.core
    }

    /// Complement-core nodes in postfix order
    pub fn complement_core(&self) -> &[Label] {
        &self.complement_core
    }

    /// Check if a node belongs to the core
    pub fn is_core(&self, label: Label) -> bool {
        self.core_set.contains(&label)
    }
}

/// Apply a move, returning the detached branches. Deleting a node that is not in the tree is a
/// no-op yielding an empty forest.
pub fn apply_move(tree: &Tree, label: Label) -> Vec<Node> {
    tree.delete(label).unwrap_or_default()
}

/// Canonical fingerprint of a tree
pub fn fingerprint(tree: &Tree) -> Barcode {
    tree.barcode()
}

/// Rebuild a tree from its fingerprint. Labels are positions in the code.
pub fn tree_from_fingerprint(barcode: &Barcode) -> Tree {
    barcode.to_tree()
}

#[cfg(any(test, feature = "quickcheck"))]
impl Tree {
    fn arbitrary_sized(g: &mut quickcheck::Gen, size: usize) -> Tree {
        use quickcheck::Arbitrary;

        let mut parents: Vec<usize> = Vec::with_capacity(size);
        for idx in 1..size {
            parents.push(usize::arbitrary(g) % idx);
        }
        Tree::from_parents(&parents)
    }

    /// Build a tree from a parent table: node `i + 1` hangs below node `parents[i]`
    fn from_parents(parents: &[usize]) -> Tree {
        fn build(idx: usize, children: &[Vec<usize>]) -> Node {
            Node::with_children(
                Label::new(idx as u32),
                children[idx].iter().map(|&c| build(c, children)).collect(),
            )
        }

        let mut children = vec![Vec::new(); parents.len() + 1];
        for (idx, &parent) in parents.iter().enumerate() {
            children[parent].push(idx + 1);
        }
        Tree::new(build(0, &children))
    }

    fn parents(&self) -> Vec<usize> {
        let index: LabelMap<usize> = self
            .preorder()
            .into_iter()
            .enumerate()
            .map(|(idx, node)| (node.label(), idx))
            .collect();
        let mut parents = vec![0; index.len().saturating_sub(1)];
        for node in self.preorder() {
            for child in node.children() {
                parents[index[&child.label()] - 1] = index[&node.label()];
            }
        }
        parents
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Tree {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let size = usize::arbitrary(g) % g.size().clamp(1, 12) + 1;
        Tree::arbitrary_sized(g, size)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Dropping the last node in prefix order always leaves a valid parent table
        let mut parents = self.parents();
        if parents.pop().is_none() {
            return quickcheck::empty_shrinker();
        }
        Box::new(std::iter::once(Tree::from_parents(&parents)))
    }
}
