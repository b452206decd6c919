use hackendot::{
    solver::{Solver, exhaustive::ExhaustiveSolver, ulehla::UlehlaSolver},
    tree::{
        Tree,
        barcode::Barcode,
        node::{Label, Node},
        random::RandomTree,
    },
};
use rand::{SeedableRng, rngs::StdRng};

fn labels(moves: &[&Node]) -> Vec<u32> {
    moves.iter().map(|node| node.label().value()).collect()
}

fn check(exhaustive: &mut ExhaustiveSolver, ulehla: &mut UlehlaSolver, position: &Tree) {
    let expected = labels(&exhaustive.winning_moves(position));
    let found = labels(&ulehla.winning_moves(position));
    assert_eq!(expected, found, "{}", position);
    assert_eq!(
        exhaustive.has_winning_move(position),
        ulehla.has_winning_move(position),
        "{}",
        position
    );
}

#[test]
#[cfg(not(miri))]
fn solvers_agree_on_all_small_positions() {
    let mut exhaustive = ExhaustiveSolver::new();
    let mut ulehla = UlehlaSolver::new();

    // Root is the ghost, so positions up to 11 nodes hold up to 10 playable nodes
    for size in 1..=11 {
        for code in Barcode::enumerate(size) {
            check(&mut exhaustive, &mut ulehla, &code.to_tree());
        }
    }
}

#[test]
#[cfg(not(miri))]
fn solvers_agree_on_random_positions() {
    let mut rng = StdRng::seed_from_u64(42);
    let generator = RandomTree::new(4, 3);
    let mut exhaustive = ExhaustiveSolver::new();
    let mut ulehla = UlehlaSolver::new();

    let mut checked = 0;
    while checked < 40 {
        let position = generator.generate(&mut rng);
        if ExhaustiveSolver::is_expensive(&position) || position.size() > 16 {
            continue;
        }
        check(&mut exhaustive, &mut ulehla, &position);
        checked += 1;
    }
}

#[test]
fn scenarios() {
    let terminal = Tree::new(Node::new(Label::new(0)));
    assert!(hackendot::solver::solve_exhaustive(&terminal).is_empty());
    assert!(hackendot::solver::solve_ulehla(&terminal).is_empty());

    let single: Tree = "0(1)".parse().unwrap();
    assert_eq!(labels(&hackendot::solver::solve_exhaustive(&single)), vec![1]);
    assert_eq!(labels(&hackendot::solver::solve_ulehla(&single)), vec![1]);

    let star: Tree = "0(1, 2)".parse().unwrap();
    assert!(hackendot::solver::solve_exhaustive(&star).is_empty());
    assert!(hackendot::solver::solve_ulehla(&star).is_empty());
}
