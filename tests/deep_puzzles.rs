//! Deeper puzzles with every solution line pinned. They take minutes to hours without
//! optimisations: `cargo test --release -- --ignored`.

use santorini_solver::{BoardState, Coord, Outcome, Search, SearchConfig};

type Line = &'static [[(u8, u8); 3]];
type Plies = Vec<Vec<(u8, u8)>>;

fn distinct(mut lines: Vec<Plies>) -> Vec<Plies> {
    lines.sort();
    lines.dedup();
    lines
}

fn assert_lines(notation: &str, max_depth: usize, expected: &[Line]) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut search =
        Search::from_notation(notation, max_depth, SearchConfig::default()).expect("valid notation");
    assert_eq!(search.run(), Ok(Outcome::Win));

    let found = distinct(
        search
            .leaves()
            .iter()
            .map(|leaf| {
                leaf.history_coords()
                    .into_iter()
                    .map(|ply| ply.into_iter().map(|Coord { x, y }| (x, y)).collect())
                    .collect()
            })
            .collect(),
    );
    let expected = distinct(
        expected
            .iter()
            .map(|line| line.iter().map(|ply| ply.to_vec()).collect())
            .collect(),
    );
    assert_eq!(found, expected);

    for leaf in search.leaves() {
        let mut board = BoardState::from_notation(notation).expect("valid notation");
        for ply in leaf.plies() {
            board = board.apply(&ply).expect("solution plies are legal");
        }
        assert_eq!(
            leaf.last().map(|position| position.to_notation()),
            Some(board.to_notation())
        );
    }
}

#[test]
#[ignore = "slow without optimisations"]
fn five_ply_lines() {
    assert_lines("DAGMGAICBEAGAAAAAAAAAAAAD", 5, FIVE_PLY_LINES);
}

#[test]
#[ignore = "slow"]
fn seven_ply_with_two_lines() {
    assert_lines("JEJJGJACAEAAAFDGADAAAGAAA", 7, SEVEN_PLY_TWO);
}

#[test]
#[ignore = "slow"]
fn seven_ply_with_three_lines() {
    assert_lines("AGADAIACAADBAAAAADAAAAAED", 7, SEVEN_PLY_THREE);
}

#[test]
#[ignore = "slow"]
fn seven_ply_with_nine_lines() {
    assert_lines("ABJDAAACFAAAAAAEAAAADAAAA", 7, SEVEN_PLY_NINE);
}

#[test]
#[ignore = "slow"]
fn nine_ply_with_five_lines() {
    assert_lines("DJDDAAGJCAADBEAGAAIAADAGD", 9, NINE_PLY_LINES);
}

#[rustfmt::skip]
const FIVE_PLY_LINES: &[Line] = &[
    &[[(1, 1), (2, 0), (1, 0)], [(3, 1), (2, 2), (3, 1)], [(2, 0), (1, 0), (0, 0)], [(2, 2), (3, 2), (3, 1)], [(1, 0), (1, 1), (0, 0)]],
    &[[(1, 1), (2, 0), (1, 0)], [(3, 1), (2, 2), (3, 1)], [(2, 0), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (2, 0), (1, 0)], [(3, 1), (2, 2), (3, 1)], [(2, 0), (1, 1), (1, 0)], [(2, 2), (3, 2), (3, 1)], [(1, 1), (2, 0), (1, 0)]],
    &[[(1, 1), (2, 0), (1, 0)], [(3, 1), (2, 2), (3, 1)], [(2, 0), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (2, 0), (1, 0)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (2, 2)], [(2, 0), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 1)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (0, 1), (0, 0)], [(2, 2), (3, 2), (3, 1)], [(0, 1), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 1)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 1)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 1)], [(2, 2), (1, 3), (0, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (0, 1)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (0, 1)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (3, 1)], [(1, 2), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 2)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 2)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 2)], [(2, 2), (3, 1), (4, 0)], [(1, 1), (1, 2), (0, 2)]],
    &[[(1, 1), (1, 2), (0, 2)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (0, 2)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (3, 1)], [(1, 2), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (2, 2)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (0, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (1, 2), (0, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (0, 3)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (3, 1)], [(1, 2), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (1, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (1, 2), (1, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (1, 3)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (3, 1)], [(1, 2), (1, 1), (0, 0)]],
    &[[(1, 1), (1, 2), (2, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(2, 2), (3, 1), (4, 0)], [(2, 1), (1, 0), (0, 0)]],
    &[[(1, 1), (1, 2), (2, 3)], [(3, 1), (2, 2), (3, 1)], [(1, 2), (1, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(1, 1), (1, 2), (2, 3)], [(3, 1), (2, 2), (3, 1)], [(2, 1), (1, 0), (0, 0)], [(2, 2), (2, 1), (3, 1)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (0, 0), (0, 1)], [(2, 1), (3, 1), (4, 0)], [(0, 0), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (0, 1)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (0, 2)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (2, 2)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (0, 3)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (1, 3)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 1), (1, 2), (2, 3)], [(2, 1), (3, 1), (4, 0)], [(1, 2), (1, 1), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 0)], [(3, 1), (2, 1), (3, 1)], [(1, 0), (0, 1), (1, 2)], [(2, 1), (2, 2), (1, 2)], [(0, 1), (1, 0), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 1)], [(3, 1), (2, 2), (2, 1)], [(1, 0), (0, 1), (0, 0)], [(2, 2), (2, 1), (1, 0)], [(0, 1), (1, 0), (0, 0)]],
    &[[(2, 1), (1, 0), (0, 1)], [(3, 1), (2, 2), (2, 1)], [(1, 0), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (2, 1)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (2, 1)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
    &[[(2, 1), (3, 2), (2, 1)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 1)], [(2, 2), (3, 2), (2, 2)], [(1, 1), (2, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (2, 2)], [(3, 1), (2, 2), (2, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (2, 2)], [(3, 1), (2, 2), (2, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
    &[[(2, 1), (3, 2), (4, 2)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (4, 2)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
    &[[(2, 1), (3, 2), (2, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (2, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
    &[[(2, 1), (3, 2), (3, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (3, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
    &[[(2, 1), (3, 2), (4, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (2, 1), (1, 2)], [(2, 2), (1, 3), (1, 2)], [(2, 1), (3, 1), (2, 0)]],
    &[[(2, 1), (3, 2), (4, 3)], [(3, 1), (2, 2), (3, 1)], [(3, 2), (3, 1), (2, 0)], [(2, 2), (2, 1), (2, 0)], [(3, 1), (2, 2), (1, 2)]],
];

#[rustfmt::skip]
const SEVEN_PLY_TWO: &[Line] = &[
    &[[(2, 1), (1, 2), (2, 3)], [(4, 1), (4, 0), (4, 1)], [(1, 2), (2, 1), (3, 0)], [(4, 0), (4, 1), (4, 0)], [(2, 1), (3, 1), (4, 0)], [(1, 0), (1, 1), (0, 0)], [(3, 2), (2, 3), (1, 4)]],
    &[[(2, 1), (2, 2), (2, 3)], [(4, 1), (4, 0), (4, 1)], [(2, 2), (2, 1), (3, 0)], [(4, 0), (4, 1), (4, 0)], [(2, 1), (3, 1), (4, 0)], [(1, 0), (1, 1), (0, 0)], [(3, 2), (2, 3), (1, 4)]],
];

#[rustfmt::skip]
const SEVEN_PLY_THREE: &[Line] = &[
    &[[(0, 1), (1, 0), (0, 0)], [(1, 2), (1, 1), (2, 0)], [(1, 0), (0, 1), (0, 0)], [(1, 1), (2, 0), (3, 0)], [(0, 1), (0, 0), (1, 0)], [(2, 0), (1, 1), (1, 0)], [(0, 0), (0, 1), (0, 0)]],
    &[[(2, 1), (1, 1), (0, 2)], [(1, 2), (2, 1), (2, 2)], [(1, 1), (2, 2), (1, 1)], [(3, 4), (2, 3), (1, 3)], [(0, 1), (0, 2), (1, 1)], [(2, 1), (2, 0), (3, 0)], [(2, 2), (1, 2), (0, 1)]],
    &[[(2, 1), (1, 1), (0, 2)], [(1, 2), (2, 1), (2, 2)], [(1, 1), (2, 2), (1, 1)], [(3, 4), (2, 3), (1, 3)], [(2, 2), (1, 2), (1, 1)], [(2, 1), (2, 2), (2, 1)], [(0, 1), (1, 1), (0, 1)]],
];

#[rustfmt::skip]
const SEVEN_PLY_NINE: &[Line] = &[
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (2, 1)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (4, 1)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (4, 2)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (2, 3)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (3, 3)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (3, 0), (3, 1)], [(1, 0), (1, 1), (2, 0)], [(3, 0), (3, 1), (3, 0)], [(1, 1), (2, 2), (1, 1)], [(2, 1), (3, 2), (4, 3)], [(2, 2), (1, 1), (0, 0)], [(3, 2), (2, 1), (3, 0)]],
    &[[(3, 1), (4, 0), (3, 0)], [(1, 0), (1, 1), (2, 0)], [(4, 0), (3, 1), (3, 2)], [(1, 1), (1, 2), (0, 1)], [(3, 1), (3, 0), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(3, 0), (3, 1), (3, 0)]],
    &[[(3, 1), (4, 1), (3, 0)], [(1, 0), (1, 1), (2, 0)], [(4, 1), (3, 1), (3, 2)], [(1, 1), (1, 2), (0, 1)], [(3, 1), (3, 0), (3, 1)], [(1, 2), (1, 1), (0, 0)], [(3, 0), (3, 1), (3, 0)]],
    &[[(3, 1), (2, 2), (3, 2)], [(1, 0), (0, 0), (1, 0)], [(2, 2), (3, 1), (3, 0)], [(0, 0), (1, 1), (0, 0)], [(3, 1), (3, 0), (3, 1)], [(1, 1), (1, 0), (2, 0)], [(3, 0), (3, 1), (3, 0)]],
];

#[rustfmt::skip]
const NINE_PLY_LINES: &[Line] = &[
    &[[(3, 1), (2, 0), (3, 0)], [(2, 2), (1, 2), (2, 1)], [(2, 0), (1, 1), (2, 0)], [(1, 2), (0, 1), (1, 0)], [(3, 3), (2, 2), (3, 3)], [(3, 2), (3, 1), (4, 0)], [(1, 1), (2, 0), (1, 1)], [(0, 1), (0, 0), (1, 1)], [(2, 0), (3, 0), (2, 0)]],
    &[[(3, 1), (2, 0), (3, 0)], [(2, 2), (1, 2), (2, 1)], [(2, 0), (1, 1), (2, 0)], [(1, 2), (0, 1), (1, 0)], [(3, 3), (4, 2), (3, 3)], [(3, 2), (3, 1), (3, 2)], [(1, 1), (2, 0), (1, 1)], [(0, 1), (0, 0), (1, 1)], [(2, 0), (3, 0), (2, 0)]],
    &[[(3, 1), (2, 0), (3, 0)], [(2, 2), (1, 2), (2, 1)], [(2, 0), (1, 1), (2, 0)], [(1, 2), (0, 1), (1, 0)], [(3, 3), (3, 4), (4, 4)], [(0, 1), (1, 2), (0, 1)], [(1, 1), (2, 0), (3, 0)], [(3, 2), (4, 1), (3, 0)], [(3, 4), (3, 3), (4, 4)]],
    &[[(3, 1), (2, 0), (3, 0)], [(2, 2), (1, 2), (2, 1)], [(2, 0), (1, 1), (2, 0)], [(1, 2), (0, 1), (1, 0)], [(3, 3), (3, 4), (4, 4)], [(0, 1), (1, 2), (0, 1)], [(3, 4), (3, 3), (4, 4)], [(3, 2), (4, 3), (4, 4)], [(1, 1), (2, 0), (3, 0)]],
    &[[(3, 1), (2, 0), (3, 1)], [(2, 2), (1, 2), (2, 1)], [(2, 0), (1, 1), (2, 0)], [(1, 2), (0, 1), (1, 0)], [(1, 1), (2, 0), (3, 1)], [(0, 1), (1, 2), (2, 2)], [(3, 3), (2, 2), (1, 1)], [(1, 2), (0, 1), (1, 1)], [(2, 0), (3, 1), (2, 0)]],
];
