//! Verbose board: one signed worker byte and one level byte per cell.
//!
//! This is the representation positions arrive in and solutions are replayed on. It knows the
//! full no-gods rules (placement, move, build, climb-to-3 victory) but none of the solver's
//! pruning; the solver packs it with [`crate::position::Position::from_board`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitmap::{neighbour_indexes, BOARD_SIZE, CELL_COUNT};
use crate::error::{Result, SolverError};
use crate::movegen::Ply;

pub const MAX_LEVEL: i8 = 4;
pub const WINNING_LEVEL: i8 = 3;

/// Length of a compressed position string, one character per cell.
pub const NOTATION_LENGTH: usize = CELL_COUNT;

const NOTATION_BASE: u8 = b'A';
const OCCUPANTS_PER_LEVEL: u8 = 3;

#[inline]
pub const fn idx(y: usize, x: usize) -> usize {
    y * BOARD_SIZE + x
}

/// Absolute player colour. Player A places first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    #[inline]
    fn sign(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    #[inline]
    fn owns(self, worker: i8) -> bool {
        worker != 0 && worker.signum() == self.sign()
    }
}

/// Board coordinates, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        idx(self.y as usize, self.x as usize)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.x) as char, self.y + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    workers: [i8; CELL_COUNT],
    levels: [i8; CELL_COUNT],
    next_player: Player,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            workers: [0; CELL_COUNT],
            levels: [0; CELL_COUNT],
            next_player: Player::A,
        }
    }

    /// Assemble a board from raw parts. `workers` holds `±1`/`±2` for player A/B's first and
    /// second worker.
    pub fn from_parts(
        workers: [i8; CELL_COUNT],
        levels: [i8; CELL_COUNT],
        next_player: Player,
    ) -> Self {
        Self {
            workers,
            levels,
            next_player,
        }
    }

    /// Decode a 25-character compressed position.
    ///
    /// Each character is `'A' + level * 3 + occupant` where the occupant is 0 for an empty
    /// cell, 1 for a player A worker and 2 for a player B worker. The side to move is implied:
    /// whoever still has to place workers, otherwise A when the total build count is even.
    pub fn from_notation(notation: &str) -> Result<Self> {
        let bytes = notation.as_bytes();
        if bytes.len() != NOTATION_LENGTH {
            return Err(SolverError::notation(
                notation,
                format!("expected {NOTATION_LENGTH} characters, got {}", bytes.len()),
            ));
        }

        let mut board = Self::new();
        let mut counts = [0i8; 2];
        for (index, &byte) in bytes.iter().enumerate() {
            let code = byte.wrapping_sub(NOTATION_BASE);
            if code >= OCCUPANTS_PER_LEVEL * (MAX_LEVEL as u8 + 1) {
                return Err(SolverError::notation(
                    notation,
                    format!("unexpected character '{}' at cell {index}", byte as char),
                ));
            }
            let level = (code / OCCUPANTS_PER_LEVEL) as i8;
            board.levels[index] = level;
            let player = match code % OCCUPANTS_PER_LEVEL {
                0 => continue,
                1 => Player::A,
                _ => Player::B,
            };
            if level == MAX_LEVEL {
                return Err(SolverError::notation(
                    notation,
                    format!("worker standing on a dome at cell {index}"),
                ));
            }
            let count = &mut counts[player as usize];
            *count += 1;
            if *count > 2 {
                return Err(SolverError::notation(notation, format!("more than two {player:?} workers")));
            }
            board.workers[index] = *count * player.sign();
        }
        if counts.iter().any(|&count| count == 1) {
            return Err(SolverError::notation(notation, "a side has a single worker"));
        }

        board.next_player = if counts[Player::A as usize] == 0 {
            Player::A
        } else if counts[Player::B as usize] == 0 {
            Player::B
        } else if board.levels.iter().map(|&level| level as u32).sum::<u32>() % 2 == 0 {
            Player::A
        } else {
            Player::B
        };
        Ok(board)
    }

    pub fn to_notation(&self) -> String {
        (0..CELL_COUNT)
            .map(|index| {
                let occupant = match self.workers[index].signum() {
                    1 => 1,
                    -1 => 2,
                    _ => 0,
                };
                (NOTATION_BASE + self.levels[index] as u8 * OCCUPANTS_PER_LEVEL + occupant) as char
            })
            .collect()
    }

    #[inline]
    pub fn level(&self, index: usize) -> i8 {
        self.levels[index]
    }

    #[inline]
    pub fn levels(&self) -> &[i8; CELL_COUNT] {
        &self.levels
    }

    /// The player owning the worker on `index`, if any.
    #[inline]
    pub fn occupant(&self, index: usize) -> Option<Player> {
        match self.workers[index].signum() {
            1 => Some(Player::A),
            -1 => Some(Player::B),
            _ => None,
        }
    }

    #[inline]
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Cells holding `player`'s workers, in ascending index order.
    pub fn worker_cells(&self, player: Player) -> Vec<usize> {
        (0..CELL_COUNT)
            .filter(|&index| player.owns(self.workers[index]))
            .collect()
    }

    pub fn setup_done(&self) -> bool {
        self.find_worker(Player::A.sign()).is_some() && self.find_worker(Player::B.sign()).is_some()
    }

    /// Every ply the side to move may play under the plain rules.
    pub fn legal_plies(&self) -> Vec<Ply> {
        let mut plies = Vec::new();
        if self.winner_on_level().is_some() {
            return plies;
        }

        let sign = self.next_player.sign();
        if self.find_worker(sign).is_none() {
            for first in 0..CELL_COUNT {
                if self.workers[first] != 0 {
                    continue;
                }
                for second in 0..CELL_COUNT {
                    if second != first && self.workers[second] == 0 {
                        plies.push(Ply::place(first, second));
                    }
                }
            }
            return plies;
        }

        for worker in 1..=2 {
            let worker_id = worker * sign;
            let Some(position) = self.find_worker(worker_id) else {
                continue;
            };
            for &target in neighbour_indexes(position) {
                let target = target as usize;
                if !self.can_move(position, target) {
                    continue;
                }
                for &build in neighbour_indexes(target) {
                    let build = build as usize;
                    if self.can_build(build, worker_id) {
                        plies.push(Ply::build(position, target, build));
                    }
                }
            }
        }
        plies
    }

    /// Play `ply` for the side to move and hand the turn over.
    pub fn apply(&self, ply: &Ply) -> Result<Self> {
        if !self.legal_plies().contains(ply) {
            return Err(SolverError::IllegalPly {
                ply: ply.to_string(),
            });
        }

        let mut next = *self;
        let sign = self.next_player.sign();
        match *ply {
            Ply::Place { first, second } => {
                next.workers[first as usize] = sign;
                next.workers[second as usize] = 2 * sign;
            }
            Ply::Build { worker, to, build } => {
                next.workers[to as usize] = next.workers[worker as usize];
                next.workers[worker as usize] = 0;
                next.levels[build as usize] += 1;
            }
        }
        next.next_player = self.next_player.other();
        Ok(next)
    }

    /// A worker standing on level 3 wins; after setup, a side to move without a ply loses.
    pub fn winner(&self) -> Option<Player> {
        if let Some(player) = self.winner_on_level() {
            return Some(player);
        }
        if self.setup_done() && self.legal_plies().is_empty() {
            return Some(self.next_player.other());
        }
        None
    }

    fn winner_on_level(&self) -> Option<Player> {
        (0..CELL_COUNT)
            .find(|&index| self.workers[index] != 0 && self.levels[index] == WINNING_LEVEL)
            .and_then(|index| self.occupant(index))
    }

    fn find_worker(&self, worker: i8) -> Option<usize> {
        self.workers.iter().position(|&occupant| occupant == worker)
    }

    fn can_move(&self, from: usize, to: usize) -> bool {
        if self.workers[to] != 0 {
            return false;
        }
        let new_level = self.levels[to];
        new_level <= WINNING_LEVEL && new_level <= self.levels[from] + 1
    }

    fn can_build(&self, index: usize, ignore: i8) -> bool {
        let occupant = self.workers[index];
        if occupant != 0 && occupant != ignore {
            return false;
        }
        self.levels[index] < MAX_LEVEL
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
