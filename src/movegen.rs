//! Move generation on packed positions.
//!
//! Two regimes: while the side to move has no workers on the board it places both of them in
//! one ply; afterwards each ply moves one worker and builds next to its destination. The
//! generator never produces a ply that leaves an opponent's immediate climb unanswered.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::bitmap::{
    bitmap_to_indexes, cell_bit, neighbour_bitmap, Bitmap, ALL_CELLS, NO_CELLS,
};
use crate::board::Coord;
use crate::position::Position;

/// One ply. Cells are row-major indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ply {
    /// Setup ply: both workers of the side to move are placed.
    Place { first: u8, second: u8 },
    /// Regular ply: the worker on `worker` steps to `to` and builds on `build`.
    Build { worker: u8, to: u8, build: u8 },
}

impl Ply {
    #[inline]
    pub fn place(first: usize, second: usize) -> Self {
        Ply::Place {
            first: first as u8,
            second: second as u8,
        }
    }

    #[inline]
    pub fn build(worker: usize, to: usize, build: usize) -> Self {
        Ply::Build {
            worker: worker as u8,
            to: to as u8,
            build: build as u8,
        }
    }

    /// The ply's cells in recorded order: two for a placement, three for a move and build.
    pub fn cells(&self) -> SmallVec<[usize; 3]> {
        match *self {
            Ply::Place { first, second } => SmallVec::from_slice(&[first as usize, second as usize]),
            Ply::Build { worker, to, build } => {
                SmallVec::from_slice(&[worker as usize, to as usize, build as usize])
            }
        }
    }

    pub fn coords(&self) -> Vec<Coord> {
        self.cells().into_iter().map(Coord::from_index).collect()
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Ply::Place { first, second } => write!(
                f,
                "{}+{}",
                Coord::from_index(first as usize),
                Coord::from_index(second as usize)
            ),
            Ply::Build { worker, to, build } => write!(
                f,
                "{}-{}^{}",
                Coord::from_index(worker as usize),
                Coord::from_index(to as usize),
                Coord::from_index(build as usize)
            ),
        }
    }
}

pub type MoveList = SmallVec<[Ply; 64]>;

/// Constraints the opponent's level-2 workers put on the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threats {
    /// Lowest level-3 cell an opponent could climb onto next ply; it has to be domed now.
    pub must_block: Option<u8>,
    /// Level-2 cells next to an opponent's level-2 worker: building there hands over a climb.
    pub cannot_build: Bitmap,
    /// More than one cell has to be blocked, which a single ply cannot do.
    pub lost: bool,
}

impl Threats {
    pub fn of(position: &Position) -> Self {
        let mut must_block = NO_CELLS;
        let mut cannot_build = NO_CELLS;
        for worker in position.other_workers().iter() {
            if position.level(worker) != 2 {
                continue;
            }
            cannot_build |= neighbour_bitmap(worker) & position.level2();
            must_block |= neighbour_bitmap(worker) & position.level3();
        }
        Self {
            must_block: bitmap_to_indexes(must_block).next().map(|cell| cell as u8),
            cannot_build,
            lost: must_block.count_ones() > 1,
        }
    }
}

/// Append every ply available to the side to move, in a fixed order: worker list order, then
/// ascending destination, then ascending build cell.
pub fn generate(position: &Position, threats: &Threats, out: &mut MoveList) {
    let players = position.workers_bitmap();
    let movers = position.next_workers();

    if movers.is_empty() {
        let empty = ALL_CELLS & !players;
        for first in bitmap_to_indexes(empty) {
            for second in bitmap_to_indexes(empty & !cell_bit(first)) {
                out.push(Ply::place(first, second));
            }
        }
        return;
    }

    if threats.lost {
        return;
    }

    let (block_bitmap, block_neighbours) = match threats.must_block {
        Some(cell) => (cell_bit(cell as usize), neighbour_bitmap(cell as usize)),
        None => (ALL_CELLS, ALL_CELLS),
    };
    let can_move_to = ALL_CELLS & !players & block_neighbours;
    let can_build_on = ALL_CELLS & block_bitmap & !threats.cannot_build & !position.level4();

    for worker in movers.iter() {
        let worker_level = position.level(worker);
        let mut reachable = position.level01();
        if worker_level >= 1 {
            reachable |= position.level2();
            if worker_level >= 2 {
                reachable |= position.level3();
            }
        }
        let others = players & !cell_bit(worker);
        for to in bitmap_to_indexes(can_move_to & neighbour_bitmap(worker) & reachable) {
            for build in bitmap_to_indexes(can_build_on & !others & neighbour_bitmap(to)) {
                out.push(Ply::build(worker, to, build));
            }
        }
    }
}
