//! Packed position used by the search.
//!
//! Levels are kept twice: as a plain per-cell array for O(1) lookups and as four disjoint
//! bitmaps (`level01`, `level2`, `level3`, `level4`) that together cover every cell exactly
//! once. Workers are stored relative to the side to move, which is what makes
//! [`PositionKey`] colour-blind.

use std::fmt;

use crate::bitmap::{
    bitmap_to_indexes, cell_bit, indexes_to_bitmap, Bitmap, ALL_CELLS, CELL_COUNT, NO_CELLS,
};
use crate::board::{BoardState, Player};
use crate::error::Result;
use crate::movegen::Ply;

const LEVEL_BITS: u32 = 3;
const LEVELS_WIDTH: u32 = LEVEL_BITS * CELL_COUNT as u32;

/// Ordered list of up to two worker cells. The order is significant: a move relocates one slot
/// and leaves the other in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Workers {
    cells: [u8; 2],
    len: u8,
}

impl Workers {
    pub const EMPTY: Self = Self {
        cells: [0; 2],
        len: 0,
    };

    pub fn pair(first: usize, second: usize) -> Self {
        Self {
            cells: [first as u8, second as u8],
            len: 2,
        }
    }

    /// Build from cell indexes, keeping at most the first two.
    pub fn from_cells(cells: &[usize]) -> Self {
        let mut workers = Self::EMPTY;
        for &cell in cells.iter().take(2) {
            workers.cells[workers.len as usize] = cell as u8;
            workers.len += 1;
        }
        workers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells[..self.len as usize].iter().map(|&cell| cell as usize)
    }

    #[inline]
    pub fn bitmap(&self) -> Bitmap {
        indexes_to_bitmap(self.iter())
    }

    /// Copy with the slot holding `from` relocated to `to`.
    #[inline]
    pub fn moved(&self, from: usize, to: usize) -> Self {
        let mut next = *self;
        if let Some(slot) = next.cells[..next.len as usize]
            .iter_mut()
            .find(|cell| **cell as usize == from)
        {
            *slot = to as u8;
        }
        next
    }
}

impl fmt::Debug for Workers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Side-relative transposition key: every cell level, then the mover's worker bitmap, then
/// the opponent's. Two positions that differ only by which colour is to move share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(u128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    levels: [u8; CELL_COUNT],
    level01: Bitmap,
    level2: Bitmap,
    level3: Bitmap,
    level4: Bitmap,
    next_workers: Workers,
    other_workers: Workers,
    white_to_play: bool,
}

impl Position {
    /// Pack a verbose board. Worker lists are filled by scanning cells in index order.
    pub fn from_board(board: &BoardState) -> Self {
        let mover = board.next_player();
        let mut levels = [0u8; CELL_COUNT];
        for (index, level) in levels.iter_mut().enumerate() {
            *level = board.level(index) as u8;
        }
        Self::from_levels(
            levels,
            Workers::from_cells(&board.worker_cells(mover)),
            Workers::from_cells(&board.worker_cells(mover.other())),
            mover == Player::A,
        )
    }

    pub fn from_notation(notation: &str) -> Result<Self> {
        Ok(Self::from_board(&BoardState::from_notation(notation)?))
    }

    pub fn from_levels(
        levels: [u8; CELL_COUNT],
        next_workers: Workers,
        other_workers: Workers,
        white_to_play: bool,
    ) -> Self {
        let mut position = Self {
            levels,
            level01: NO_CELLS,
            level2: NO_CELLS,
            level3: NO_CELLS,
            level4: NO_CELLS,
            next_workers,
            other_workers,
            white_to_play,
        };
        for (index, &level) in levels.iter().enumerate() {
            let bit = cell_bit(index);
            match level {
                0 | 1 => position.level01 |= bit,
                2 => position.level2 |= bit,
                3 => position.level3 |= bit,
                _ => position.level4 |= bit,
            }
        }
        debug_assert!(position.levels_partition_board());
        position
    }

    /// Unpack into a verbose board, numbering each side's workers in list order.
    pub fn to_board(&self) -> BoardState {
        let mut workers = [0i8; CELL_COUNT];
        let (next_sign, other_sign) = if self.white_to_play { (1, -1) } else { (-1, 1) };
        for (list, sign) in [(&self.next_workers, next_sign), (&self.other_workers, other_sign)] {
            for (slot, cell) in list.iter().enumerate() {
                workers[cell] = (slot as i8 + 1) * sign;
            }
        }
        let mut levels = [0i8; CELL_COUNT];
        for (level, &packed) in levels.iter_mut().zip(self.levels.iter()) {
            *level = packed as i8;
        }
        let next_player = if self.white_to_play { Player::A } else { Player::B };
        BoardState::from_parts(workers, levels, next_player)
    }

    pub fn to_notation(&self) -> String {
        self.to_board().to_notation()
    }

    /// Apply a ply for the side to move and return the position with the turn handed over.
    pub fn play(&self, ply: &Ply) -> Self {
        match *ply {
            Ply::Place { first, second } => Self {
                next_workers: self.other_workers,
                other_workers: Workers::pair(first as usize, second as usize),
                white_to_play: !self.white_to_play,
                ..*self
            },
            Ply::Build { worker, to, build } => {
                let build = build as usize;
                let bit = cell_bit(build);
                let mut next = *self;
                match self.levels[build] {
                    1 => {
                        next.level01 &= !bit;
                        next.level2 |= bit;
                    }
                    2 => {
                        next.level2 &= !bit;
                        next.level3 |= bit;
                    }
                    3 => {
                        next.level3 &= !bit;
                        next.level4 |= bit;
                    }
                    _ => {}
                }
                next.levels[build] += 1;
                next.next_workers = self.other_workers;
                next.other_workers = self.next_workers.moved(worker as usize, to as usize);
                next.white_to_play = !self.white_to_play;
                next
            }
        }
    }

    pub fn key(&self) -> PositionKey {
        let mut key = 0u128;
        for (index, &level) in self.levels.iter().enumerate() {
            key |= (level as u128) << (LEVEL_BITS * index as u32);
        }
        key |= (self.next_workers.bitmap() as u128) << LEVELS_WIDTH;
        key |= (self.other_workers.bitmap() as u128) << (LEVELS_WIDTH + CELL_COUNT as u32);
        PositionKey(key)
    }

    #[inline]
    pub fn level(&self, index: usize) -> u8 {
        self.levels[index]
    }

    #[inline]
    pub fn levels(&self) -> &[u8; CELL_COUNT] {
        &self.levels
    }

    #[inline]
    pub fn level01(&self) -> Bitmap {
        self.level01
    }

    #[inline]
    pub fn level2(&self) -> Bitmap {
        self.level2
    }

    #[inline]
    pub fn level3(&self) -> Bitmap {
        self.level3
    }

    #[inline]
    pub fn level4(&self) -> Bitmap {
        self.level4
    }

    #[inline]
    pub fn next_workers(&self) -> &Workers {
        &self.next_workers
    }

    #[inline]
    pub fn other_workers(&self) -> &Workers {
        &self.other_workers
    }

    #[inline]
    pub fn workers_bitmap(&self) -> Bitmap {
        self.next_workers.bitmap() | self.other_workers.bitmap()
    }

    #[inline]
    pub fn white_to_play(&self) -> bool {
        self.white_to_play
    }

    /// Absolute colour of the side to move.
    #[inline]
    pub fn mover(&self) -> Player {
        if self.white_to_play {
            Player::A
        } else {
            Player::B
        }
    }

    fn levels_partition_board(&self) -> bool {
        let maps = [self.level01, self.level2, self.level3, self.level4];
        let union = maps.iter().fold(NO_CELLS, |acc, map| acc | map);
        let total: u32 = maps.iter().map(|map| map.count_ones()).sum();
        union == ALL_CELLS
            && total == CELL_COUNT as u32
            && bitmap_to_indexes(self.level01).all(|index| self.levels[index] <= 1)
            && bitmap_to_indexes(self.level2).all(|index| self.levels[index] == 2)
            && bitmap_to_indexes(self.level3).all(|index| self.levels[index] == 3)
            && bitmap_to_indexes(self.level4).all(|index| self.levels[index] == 4)
    }
}
