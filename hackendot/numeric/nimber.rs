//! Nimber is a number that represents a Nim heap of a given size.

use auto_ops::impl_op_ex;
use std::{fmt::Display, ops::Range};

/// Number that represents a Nim heap of given size.
///
/// Addition is overloaded to Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// The zero nimber
    pub const ZERO: Nimber = Nimber(0);

    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying nimber value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Check if nimber is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Compute the minimum excluded value from a vector of nimbers.
    /// See <https://en.wikipedia.org/wiki/Mex_(mathematics)>
    pub fn mex(nimbers: Vec<Self>) -> Self {
        // Values above the vector length cannot be the mex, so the range is never exhausted
        let bound = nimbers.len() as u32 + 1;
        match Self::mex_in(nimbers, 0..bound) {
            Some(mex) => mex,
            None => unreachable!("mex of {bound} values exceeds their count"),
        }
    }

    /// Compute the smallest value in `range` that is not in `nimbers`, if there is one.
    pub fn mex_in(mut nimbers: Vec<Self>, range: Range<u32>) -> Option<Self> {
        nimbers.sort_unstable();
        let mut current = range.start;
        for n in nimbers {
            match current.cmp(&n.0) {
                std::cmp::Ordering::Less => break,
                std::cmp::Ordering::Equal => current += 1,
                std::cmp::Ordering::Greater => {}
            }
        }
        range.contains(&current).then_some(Self(current))
    }

    /// Assemble a nimber from its binary digits, least significant first
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Self(
            bits.into_iter()
                .enumerate()
                .fold(0, |acc, (idx, bit)| acc | (u32::from(bit) << idx)),
        )
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// xor is correct, that's how nimbers additon works
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

impl std::iter::Sum for Nimber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nimber::ZERO, |acc, n| acc + n)
    }
}

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

#[test]
fn mex_works() {
    assert_eq!(
        Nimber(3),
        Nimber::mex(vec![Nimber(0), Nimber(0), Nimber(2), Nimber(5), Nimber(1)])
    );

    assert_eq!(
        Nimber(3),
        Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(2)])
    );

    assert_eq!(
        Nimber(2),
        Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(1)])
    );

    assert_eq!(Nimber(0), Nimber::mex(vec![]));
}

#[test]
fn mex_in_range() {
    assert_eq!(
        Some(Nimber(1)),
        Nimber::mex_in(vec![Nimber(0), Nimber(0), Nimber(2)], 1..5)
    );

    assert_eq!(
        Some(Nimber(3)),
        Nimber::mex_in(vec![Nimber(0), Nimber(1), Nimber(2), Nimber(4)], 1..5)
    );

    assert_eq!(None, Nimber::mex_in(vec![Nimber(1), Nimber(2)], 1..3));
    assert_eq!(None, Nimber::mex_in(vec![], 1..1));
}

#[test]
fn nim_sum() {
    assert_eq!(Nimber(3) + Nimber(5), Nimber(6));
    assert_eq!(
        [Nimber(1), Nimber(2), Nimber(3)].into_iter().sum::<Nimber>(),
        Nimber::ZERO
    );
    assert_eq!(Nimber::from_bits([true, false, true]), Nimber(5));
    assert_eq!(Nimber::from_bits([]), Nimber::ZERO);
    assert_eq!(Nimber(2).to_string(), "*2");
}
