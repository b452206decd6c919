//! Solvers finding winning moves of Hackendot positions.
//!
//! Every solver takes a ghost-rooted [`Tree`] and reports the nodes whose deletion leaves the
//! opponent in a lost position. The root itself is never a move.

use crate::tree::{Tree, node::Node};

pub mod exhaustive;
pub mod position_table;
pub mod ulehla;

/// Interface of a winning move finder
pub trait Solver {
    /// Get all winning moves of the position, in prefix order of the tree. Empty if the mover
    /// loses or has no move at all.
    fn winning_moves<'t>(&mut self, position: &'t Tree) -> Vec<&'t Node>;

    /// Check if the player to move can win
    fn has_winning_move(&mut self, position: &Tree) -> bool {
        !self.winning_moves(position).is_empty()
    }
}

/// Find winning moves by backward induction over every reachable position
pub fn solve_exhaustive(tree: &Tree) -> Vec<&Node> {
    exhaustive::ExhaustiveSolver::new().winning_moves(tree)
}

/// Find winning moves with Ulehla's reduction
pub fn solve_ulehla(tree: &Tree) -> Vec<&Node> {
    ulehla::UlehlaSolver::new().winning_moves(tree)
}
