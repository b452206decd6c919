//! Random tree generation

use crate::tree::{
    Tree,
    node::{Label, Node},
};
use rand::Rng;

/// Shape limits of randomly generated trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomTree {
    depth: u32,
    max_children: u32,
}

impl RandomTree {
    /// Largest number of levels grown below the root
    pub const MAX_DEPTH: u32 = 5;

    /// Largest number of children a single node can get
    pub const MAX_CHILDREN: u32 = 3;

    /// Create new generator. Out of range limits (zero or above the maximum) fall back to the
    /// maximum.
    pub const fn new(depth: u32, max_children: u32) -> RandomTree {
        RandomTree {
            depth: if depth == 0 || depth > Self::MAX_DEPTH {
                Self::MAX_DEPTH
            } else {
                depth
            },
            max_children: if max_children == 0 || max_children > Self::MAX_CHILDREN {
                Self::MAX_CHILDREN
            } else {
                max_children
            },
        }
    }

    /// Number of levels grown below the root
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Largest number of children per node
    pub const fn max_children(&self) -> u32 {
        self.max_children
    }

    /// Grow a tree level by level. Every node on a level gets between zero and `max_children`
    /// children. Labels are assigned sequentially in breadth-first order starting with `0` at the
    /// root.
    pub fn generate<R>(&self, rng: &mut R) -> Tree
    where
        R: Rng + ?Sized,
    {
        fn build(idx: usize, children: &[Vec<usize>]) -> Node {
            Node::with_children(
                Label::new(idx as u32),
                children[idx].iter().map(|&c| build(c, children)).collect(),
            )
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new()];
        let mut level = vec![0];
        for _ in 0..self.depth {
            let mut next = Vec::new();
            for parent in level {
                for _ in 0..rng.random_range(0..=self.max_children) {
                    let child = children.len();
                    children.push(Vec::new());
                    children[parent].push(child);
                    next.push(child);
                }
            }
            level = next;
        }

        Tree::new(build(0, &children))
    }
}

impl Default for RandomTree {
    fn default() -> Self {
        RandomTree::new(Self::MAX_DEPTH, Self::MAX_CHILDREN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn limits_are_clamped() {
        assert_eq!(RandomTree::new(0, 0), RandomTree::default());
        assert_eq!(RandomTree::new(9, 7), RandomTree::default());
        let small = RandomTree::new(2, 1);
        assert_eq!((small.depth(), small.max_children()), (2, 1));
    }

    #[test]
    fn respects_limits() {
        let mut rng = StdRng::seed_from_u64(0xdead_beef);
        let generator = RandomTree::new(3, 2);
        for _ in 0..64 {
            let tree = generator.generate(&mut rng);
            assert!(tree.level(4).is_empty());
            assert!(tree.preorder().iter().all(|node| node.children().len() <= 2));
            assert!(tree.size() <= 1 + 2 + 4 + 8);

            let mut labels: Vec<u32> = tree.preorder().iter().map(|n| n.label().value()).collect();
            labels.sort_unstable();
            assert_eq!(labels, (0..tree.size() as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn labels_follow_levels() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RandomTree::default().generate(&mut rng);
        let breadth_first: Vec<u32> = (0..=RandomTree::MAX_DEPTH)
            .flat_map(|depth| tree.level(depth))
            .map(|node| node.label().value())
            .collect();
        assert_eq!(breadth_first, (0..tree.size() as u32).collect::<Vec<_>>());
    }
}
