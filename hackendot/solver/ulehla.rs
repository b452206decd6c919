//! Ulehla's method for Hackendot.
//!
//! Every node gets a nimber: core nodes get zero and complement-core nodes get the least positive
//! value not used by their children. Each turn the forest under the root is reduced by dropping
//! zero-nimber nodes and lifting their children to the grandparent. The parity of zero-nimber
//! top-level nodes at turn `i` is bit `i` of the Grundy value of the position, and the winning
//! moves are reconstructed by walking the recorded turns backwards from the last odd one.

use crate::{
    numeric::nimber::Nimber,
    solver::Solver,
    tree::{
        LabelMap, LabelSet, Tree,
        node::{Label, Node},
    },
};
use std::collections::HashMap;

/// Assign nimbers to every node of the tree.
///
/// # Panics
/// - When a complement-core node has no free value below the tree size
pub fn assign_nimbers(tree: &Tree) -> HashMap<Label, Nimber, ahash::RandomState> {
    let partition = tree.partition();
    let size = tree.size() as u32;

    let mut nimbers: LabelMap<Nimber> =
        HashMap::with_capacity_and_hasher(tree.size(), ahash::RandomState::new());
    for node in tree.postorder() {
        let nimber = if partition.is_core(node.label()) {
            Nimber::ZERO
        } else {
            let children = node
                .children()
                .iter()
                .map(|child| nimbers[&child.label()])
                .collect();
            match Nimber::mex_in(children, 1..size) {
                Some(nimber) => nimber,
                None => panic!("No nimber left for node {} of {}", node.label(), tree),
            }
        };
        nimbers.insert(node.label(), nimber);
    }
    nimbers
}

/// Snapshot of the working tree at one turn of the reduction
#[derive(Debug, Clone)]
struct Turn {
    tree: Tree,
    nimbers: LabelMap<Nimber>,
    parents: LabelMap<Label>,
    parity: bool,
}

impl Turn {
    fn new(tree: Tree) -> Turn {
        let nimbers = assign_nimbers(&tree);
        let zero_roots = tree
            .root()
            .children()
            .iter()
            .filter(|child| nimbers[&child.label()].is_zero())
            .count();
        let parents = tree
            .preorder()
            .into_iter()
            .flat_map(|node| {
                node.children()
                    .iter()
                    .map(move |child| (child.label(), node.label()))
            })
            .collect();
        Turn {
            tree,
            nimbers,
            parents,
            parity: zero_roots % 2 == 1,
        }
    }

    fn nimber(&self, label: Label) -> Nimber {
        match self.nimbers.get(&label) {
            Some(nimber) => *nimber,
            None => panic!("Node {} is missing from {}", label, self.tree),
        }
    }

    fn node(&self, label: Label) -> &Node {
        match self.tree.find(label) {
            Some(node) => node,
            None => panic!("Node {} is missing from {}", label, self.tree),
        }
    }

    /// Tree of the next turn: zero-nimber nodes are removed and their children hang from the
    /// removed node's parent
    fn reduce(&self) -> Tree {
        fn contract(node: &Node, nimbers: &LabelMap<Nimber>) -> Node {
            let mut children = Vec::new();
            for child in node.children() {
                if nimbers[&child.label()].is_zero() {
                    children.extend(
                        child
                            .children()
                            .iter()
                            .map(|grandchild| contract(grandchild, nimbers)),
                    );
                } else {
                    children.push(contract(child, nimbers));
                }
            }
            Node::with_children(node.label(), children)
        }

        Tree::new(contract(self.tree.root(), &self.nimbers))
    }

    /// Check if deleting the node leaves an even number of zero-nimber branches
    fn keeps_balance(&self, label: Label) -> bool {
        let Some(orphans) = self.tree.detached(label) else {
            panic!("Node {} is missing from {}", label, self.tree);
        };
        orphans
            .into_iter()
            .filter(|orphan| self.nimber(orphan.label()).is_zero())
            .count()
            % 2
            == 0
    }

    /// Node standing for the given one in the next turn. `None` if it is dropped together with
    /// everything above it.
    fn image(&self, label: Label) -> Option<Label> {
        if !self.nimber(label).is_zero() {
            return Some(label);
        }
        self.parents
            .get(&label)
            .copied()
            .filter(|&parent| parent != self.tree.root().label())
    }
}

/// Solver using Ulehla's reduction. Runs in time polynomial in the tree size.
#[derive(Debug, Clone, Default)]
pub struct UlehlaSolver {
    turns: Vec<Turn>,
}

impl UlehlaSolver {
    /// Create new solver
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of turns recorded by the last solve
    #[inline]
    pub fn turns(&self) -> usize {
        self.turns.len()
    }

    /// Parity of every turn recorded by the last solve
    pub fn parities(&self) -> Vec<bool> {
        self.turns.iter().map(|turn| turn.parity).collect()
    }

    /// Compute Grundy value of the position
    pub fn grundy_value(&mut self, position: &Tree) -> Nimber {
        self.reduce(position);
        Nimber::from_bits(self.turns.iter().map(|turn| turn.parity))
    }

    fn reduce(&mut self, position: &Tree) {
        self.turns.clear();

        let mut tree = position.clone();
        tree.restamp_depths();
        while !tree.root().is_leaf() {
            let turn = Turn::new(tree);
            log::trace!(
                "Turn {}: parity {}, {} nodes",
                self.turns.len(),
                u8::from(turn.parity),
                turn.tree.size()
            );
            tree = turn.reduce();
            self.turns.push(turn);
        }
    }

    /// Check that a node of turn `start` keeps balance there and so does its image at every
    /// later turn
    fn survives_from(&self, start: usize, label: Label) -> bool {
        let mut image = Some(label);
        for turn in &self.turns[start..] {
            let Some(label) = image else {
                break;
            };
            if !turn.keeps_balance(label) {
                return false;
            }
            image = turn.image(label);
        }
        true
    }
}

impl Solver for UlehlaSolver {
    fn winning_moves<'t>(&mut self, position: &'t Tree) -> Vec<&'t Node> {
        self.reduce(position);

        let Some(decisive) = self.turns.iter().rposition(|turn| turn.parity) else {
            log::debug!("No odd turn in {} turns", self.turns.len());
            return Vec::new();
        };

        let mut candidates: Vec<Label> = self.turns[decisive]
            .tree
            .preorder()
            .into_iter()
            .skip(1)
            .map(Node::label)
            .filter(|&label| self.survives_from(decisive, label))
            .collect();

        for turn in self.turns[..decisive].iter().rev() {
            let mut expanded = Vec::with_capacity(candidates.len());
            for label in candidates {
                expanded.push(label);
                expanded.extend(
                    turn.node(label)
                        .children()
                        .iter()
                        .map(Node::label)
                        .filter(|&child| turn.nimber(child).is_zero()),
                );
            }
            candidates = expanded
                .into_iter()
                .filter(|&label| turn.keeps_balance(label))
                .collect();
        }

        let winning: LabelSet = candidates.into_iter().collect();
        let moves: Vec<&Node> = position
            .preorder()
            .into_iter()
            .skip(1)
            .filter(|node| winning.contains(&node.label()))
            .collect();
        log::debug!(
            "Decisive turn {} of {}, found {} winning moves",
            decisive,
            self.turns.len(),
            moves.len()
        );
        moves
    }

    fn has_winning_move(&mut self, position: &Tree) -> bool {
        !self.grundy_value(position).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;
    use std::str::FromStr;

    fn tree(s: &str) -> Tree {
        Tree::from_str(s).unwrap()
    }

    fn labels(moves: &[&Node]) -> Vec<u32> {
        moves.iter().map(|node| node.label().value()).collect()
    }

    fn naive_grundy(position: &Tree, memo: &mut HashMap<String, Nimber>) -> Nimber {
        let key = position.barcode().to_string();
        if let Some(value) = memo.get(&key) {
            return *value;
        }
        let options = position
            .moves()
            .iter()
            .map(|next| naive_grundy(next, memo))
            .collect();
        let value = Nimber::mex(options);
        memo.insert(key, value);
        value
    }

    fn shifted(node: &Node, offset: u32) -> Node {
        Node::with_children(
            Label::new(node.label().value() + offset),
            node.children()
                .iter()
                .map(|child| shifted(child, offset))
                .collect(),
        )
    }

    #[test]
    fn nimbers_follow_partition() {
        let position = tree("0(1(2(3)), 4(5, 6(7)))");
        let nimbers = assign_nimbers(&position);
        let values: Vec<u32> = (1..=7)
            .map(|l| nimbers[&Label::new(l)].value())
            .collect();
        assert_eq!(values, vec![0, 1, 0, 2, 0, 1, 0]);
    }

    #[test]
    fn scenarios() {
        let mut solver = UlehlaSolver::new();
        assert!(solver.winning_moves(&tree("0")).is_empty());
        assert_eq!(solver.turns(), 0);
        assert_eq!(labels(&solver.winning_moves(&tree("0(1)"))), vec![1]);
        assert!(solver.winning_moves(&tree("0(1, 2)")).is_empty());
        assert!(!solver.has_winning_move(&tree("0(1, 2)")));
        assert_eq!(labels(&solver.winning_moves(&tree("0(1(2))"))), vec![2]);
        assert_eq!(solver.parities(), vec![false, true]);
    }

    #[test]
    fn paths_have_their_length_as_value() {
        let mut solver = UlehlaSolver::new();
        assert_eq!(solver.grundy_value(&tree("0(1(2(3)))")), Nimber::new(3));
        assert_eq!(solver.grundy_value(&tree("0(1(2(3(4(5)))))")), Nimber::new(5));
        assert_eq!(solver.grundy_value(&tree("0(1, 2, 3)")), Nimber::new(1));
        assert_eq!(
            labels(&solver.winning_moves(&tree("_(1(2(3)), 4(5))"))),
            vec![1]
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let position = tree("0(1(2, 3(4)), 5(6, 7), 8)");
        let before = position.to_string();
        let mut solver = UlehlaSolver::new();
        let first = labels(&solver.winning_moves(&position));
        assert_eq!(position.to_string(), before);
        assert_eq!(labels(&solver.winning_moves(&position.clone())), first);
    }

    #[test]
    fn grundy_value_matches_game_tree() {
        fn test(position: Tree) -> bool {
            let mut memo = HashMap::new();
            UlehlaSolver::new().grundy_value(&position) == naive_grundy(&position, &mut memo)
        }

        QuickCheck::new().quickcheck(test as fn(Tree) -> bool);
    }

    #[test]
    fn forest_value_is_nim_sum() {
        fn test(lhs: Tree, rhs: Tree) -> bool {
            let offset = lhs.size() as u32;
            let mut roots: Vec<Node> = lhs.root().children().to_vec();
            roots.extend(rhs.root().children().iter().map(|c| shifted(c, offset)));
            let forest = Tree::from_forest(roots);

            let mut solver = UlehlaSolver::new();
            let expected = solver.grundy_value(&lhs) + solver.grundy_value(&rhs);
            solver.grundy_value(&forest) == expected
        }

        QuickCheck::new()
            .tests(50)
            .quickcheck(test as fn(Tree, Tree) -> bool);
    }

    #[test]
    fn winning_moves_lead_to_zero() {
        fn test(position: Tree) -> bool {
            let mut solver = UlehlaSolver::new();
            let moves = solver.winning_moves(&position);
            let winning: Vec<Label> = moves.iter().map(|node| node.label()).collect();
            position.preorder().into_iter().skip(1).all(|node| {
                let next = Tree::from_forest(crate::tree::apply_move(&position, node.label()));
                let lost = UlehlaSolver::new().grundy_value(&next).is_zero();
                lost == winning.contains(&node.label())
            })
        }

        QuickCheck::new().quickcheck(test as fn(Tree) -> bool);
    }
}
