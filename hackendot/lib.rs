//! Solvers for von Neumann's Hackendot.
//!
//! Positions are [rooted trees](crate::tree::Tree) whose root is never played. A move deletes a
//! node together with its path to the root, and the player without a move loses. Winning moves
//! can be found [exhaustively](crate::solver::exhaustive) by classifying every reachable
//! position, or in polynomial time with [Ulehla's method](crate::solver::ulehla).

#![warn(missing_docs)]

pub mod numeric;
pub mod parsing;
pub mod solver;
pub mod tree;

mod display;
