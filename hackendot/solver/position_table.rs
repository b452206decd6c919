//! Table of positions reachable from a solved tree, keyed by their barcodes

use crate::{display, tree::barcode::Barcode};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display},
};

/// Outcome of a position for the player about to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Position was not classified yet
    #[default]
    Unknown,

    /// Every move leads to a position won by the opponent, including having no move at all
    LossForMover,

    /// Some move leads to a position lost by the opponent
    WinForMover,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unknown => write!(f, "?"),
            Outcome::LossForMover => write!(f, "P"),
            Outcome::WinForMover => write!(f, "N"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    /// `None` until the position is explored
    successors: Option<Vec<Barcode>>,
    outcome: Outcome,
}

/// Positions ordered by barcode.
///
/// Every move removes at least one node, so successors of a position always sort strictly
/// below it. Classifying in ascending order therefore sees every successor before the
/// position itself.
#[derive(Clone, Default)]
pub struct PositionTable {
    entries: BTreeMap<Barcode, Entry>,
}

impl PositionTable {
    /// Create new empty table
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if position is in the table
    #[inline]
    pub fn contains(&self, position: &Barcode) -> bool {
        self.entries.contains_key(position)
    }

    /// Add position without successors unless it is already present. Returns `true` if the
    /// position was new.
    pub fn insert(&mut self, position: Barcode) -> bool {
        if self.entries.contains_key(&position) {
            return false;
        }
        self.entries.insert(position, Entry::default());
        true
    }

    /// Check if successors of the position are known
    pub fn is_explored(&self, position: &Barcode) -> bool {
        self.entries
            .get(position)
            .is_some_and(|entry| entry.successors.is_some())
    }

    /// Record successors of a position, adding unseen successors as new entries
    pub fn set_successors(&mut self, position: Barcode, successors: Vec<Barcode>) {
        for successor in &successors {
            if !self.entries.contains_key(successor) {
                self.entries.insert(successor.clone(), Entry::default());
            }
        }
        self.entries.entry(position).or_default().successors = Some(successors);
    }

    /// Successors of an explored position
    pub fn successors(&self, position: &Barcode) -> Option<&[Barcode]> {
        self.entries
            .get(position)
            .and_then(|entry| entry.successors.as_deref())
    }

    /// Outcome of a position, [`Outcome::Unknown`] if the position is not in the table
    pub fn outcome(&self, position: &Barcode) -> Outcome {
        self.entries
            .get(position)
            .map_or(Outcome::Unknown, |entry| entry.outcome)
    }

    /// Largest position strictly smaller than given one
    pub fn next_below(&self, position: &Barcode) -> Option<&Barcode> {
        self.entries
            .range(..position)
            .next_back()
            .map(|(barcode, _)| barcode)
    }

    /// Classify every unknown position by backward induction, smallest positions first.
    /// Returns number of newly classified positions.
    ///
    /// # Panics
    /// - When an unknown position was never explored
    pub fn classify(&mut self) -> usize {
        let mut classified = 0;
        let pending: Vec<Barcode> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.outcome == Outcome::Unknown)
            .map(|(barcode, _)| barcode.clone())
            .collect();

        for position in pending {
            let Some(successors) = self.successors(&position) else {
                panic!("position {position} was never explored");
            };
            let outcome = if successors
                .iter()
                .any(|successor| self.outcome(successor) == Outcome::LossForMover)
            {
                Outcome::WinForMover
            } else {
                Outcome::LossForMover
            };
            if let Some(entry) = self.entries.get_mut(&position) {
                entry.outcome = outcome;
                classified += 1;
            }
        }
        classified
    }
}

impl Debug for PositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionTable")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Display for PositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, entry) in &self.entries {
            write!(f, "{} {} ", position, entry.outcome)?;
            match &entry.successors {
                Some(successors) => display::brackets(f, |f| display::commas(f, successors))?,
                None => write!(f, "?")?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn code(s: &str) -> Barcode {
        Barcode::from_str(s).unwrap()
    }

    #[test]
    fn lookup_and_ordering() {
        let mut table = PositionTable::new();
        assert!(table.is_empty());
        assert!(table.insert(code("1100")));
        assert!(!table.insert(code("1100")));
        table.set_successors(code("110100"), vec![code("1100"), code("10")]);

        assert_eq!(table.len(), 3);
        assert!(table.is_explored(&code("110100")));
        assert!(!table.is_explored(&code("1100")));
        assert_eq!(table.next_below(&code("110100")), Some(&code("1100")));
        assert_eq!(table.next_below(&code("1100")), Some(&code("10")));
        assert_eq!(table.next_below(&code("10")), None);
        assert_eq!(table.outcome(&code("111000")), Outcome::Unknown);
    }

    #[test]
    fn classify_by_backward_induction() {
        let mut table = PositionTable::new();
        table.set_successors(code("10"), vec![]);
        table.set_successors(code("1100"), vec![code("10")]);
        table.set_successors(code("110100"), vec![code("1100")]);
        table.set_successors(code("111000"), vec![code("10"), code("1100")]);

        assert_eq!(table.classify(), 4);
        assert_eq!(table.outcome(&code("10")), Outcome::LossForMover);
        assert_eq!(table.outcome(&code("1100")), Outcome::WinForMover);
        assert_eq!(table.outcome(&code("110100")), Outcome::LossForMover);
        assert_eq!(table.outcome(&code("111000")), Outcome::WinForMover);

        // already classified positions are left alone
        assert_eq!(table.classify(), 0);
        assert_eq!(
            table.to_string().lines().next(),
            Some("10 P []")
        );
    }

    #[test]
    #[should_panic]
    fn unexplored_positions_cannot_be_classified() {
        let mut table = PositionTable::new();
        table.insert(code("1100"));
        table.classify();
    }
}
