//! Exhaustive solver classifying every reachable position by backward induction

use crate::{
    solver::{
        Solver,
        position_table::{Outcome, PositionTable},
    },
    tree::{Tree, apply_move, barcode::Barcode, node::Node},
};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Positions above this many nodes take noticeable time to solve exhaustively
pub const EXHAUSTIVE_WARNING_SIZE: usize = 42;

/// Solver building the full table of positions reachable from the solved tree.
///
/// The table is kept between solves, so positions seen before are neither explored nor
/// classified again.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver {
    table: PositionTable,
}

impl ExhaustiveSolver {
    /// Create new solver with empty position table
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions seen so far
    #[inline]
    pub const fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Check if solving the tree exhaustively is expected to take noticeable time
    #[inline]
    pub fn is_expensive(tree: &Tree) -> bool {
        tree.size() > EXHAUSTIVE_WARNING_SIZE
    }

    /// Classify a position for the player about to move
    pub fn outcome(&mut self, position: &Tree) -> Outcome {
        let barcode = position.barcode();
        self.explore(barcode.clone());
        self.table.classify();
        self.table.outcome(&barcode)
    }

    fn successor(tree: &Tree, node: &Node) -> Barcode {
        Tree::from_forest(apply_move(tree, node.label())).barcode()
    }

    fn successors(position: &Barcode) -> Vec<Barcode> {
        let tree = position.to_tree();
        let nodes = tree.preorder();

        #[cfg(not(feature = "rayon"))]
        let iter = nodes.iter();

        #[cfg(feature = "rayon")]
        let iter = nodes.par_iter();

        let mut successors: Vec<Barcode> = iter
            .skip(1)
            .map(|node| Self::successor(&tree, node))
            .collect();
        successors.sort_unstable();
        successors.dedup();
        successors
    }

    /// Walk down the table from `start`, expanding every unexplored position. Successors are
    /// always smaller than their position, so they are reached later in the walk.
    fn explore(&mut self, start: Barcode) {
        let mut explored = 0usize;
        self.table.insert(start.clone());

        let mut current = Some(start);
        while let Some(position) = current {
            if !self.table.is_explored(&position) {
                let successors = Self::successors(&position);
                log::trace!("{} -> {} successors", position, successors.len());
                self.table.set_successors(position.clone(), successors);
                explored += 1;
            }
            current = self.table.next_below(&position).cloned();
        }

        log::debug!(
            "Explored {} new positions, {} in table",
            explored,
            self.table.len()
        );
    }
}

impl Solver for ExhaustiveSolver {
    fn winning_moves<'t>(&mut self, position: &'t Tree) -> Vec<&'t Node> {
        if Self::is_expensive(position) {
            log::debug!(
                "Exhaustive solve of {} nodes exceeds {}",
                position.size(),
                EXHAUSTIVE_WARNING_SIZE
            );
        }

        self.explore(position.barcode());
        self.table.classify();

        let moves: Vec<&Node> = position
            .preorder()
            .into_iter()
            .skip(1)
            .filter(|node| {
                self.table.outcome(&Self::successor(position, node)) == Outcome::LossForMover
            })
            .collect();
        log::debug!("Found {} winning moves", moves.len());
        moves
    }

    fn has_winning_move(&mut self, position: &Tree) -> bool {
        self.outcome(position) == Outcome::WinForMover
    }
}
