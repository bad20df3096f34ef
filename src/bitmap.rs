//! 25-bit cell sets and the neighbour tables shared by every move-generation call.
//!
//! Bit `i` stands for cell `i` in row-major order (`y * 5 + x`). The neighbour tables are
//! computed at compile time, so the hot path only ever does array lookups and bit twiddling.

pub const BOARD_SIZE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A set of cells, one bit per cell index.
pub type Bitmap = u32;

pub const NO_CELLS: Bitmap = 0;
pub const ALL_CELLS: Bitmap = (1 << CELL_COUNT) - 1;

const MAX_NEIGHBOURS: usize = 8;

const DIRECTIONS: [(i8, i8); MAX_NEIGHBOURS] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

struct NeighbourTable {
    indexes: [[u8; MAX_NEIGHBOURS]; CELL_COUNT],
    counts: [u8; CELL_COUNT],
    bitmaps: [Bitmap; CELL_COUNT],
}

impl NeighbourTable {
    const fn compute() -> Self {
        let mut indexes = [[0u8; MAX_NEIGHBOURS]; CELL_COUNT];
        let mut counts = [0u8; CELL_COUNT];
        let mut bitmaps = [NO_CELLS; CELL_COUNT];
        let mut cell = 0;
        while cell < CELL_COUNT {
            let y = (cell / BOARD_SIZE) as i8;
            let x = (cell % BOARD_SIZE) as i8;
            let mut direction = 0;
            while direction < MAX_NEIGHBOURS {
                let (dy, dx) = DIRECTIONS[direction];
                let ny = y + dy;
                let nx = x + dx;
                if ny >= 0 && ny < BOARD_SIZE as i8 && nx >= 0 && nx < BOARD_SIZE as i8 {
                    let neighbour = ny as usize * BOARD_SIZE + nx as usize;
                    indexes[cell][counts[cell] as usize] = neighbour as u8;
                    counts[cell] += 1;
                    bitmaps[cell] |= 1 << neighbour;
                }
                direction += 1;
            }
            cell += 1;
        }
        Self {
            indexes,
            counts,
            bitmaps,
        }
    }
}

static NEIGHBOURS: NeighbourTable = NeighbourTable::compute();

/// Cells at Chebyshev distance exactly 1 from `cell`.
#[inline]
pub fn neighbour_bitmap(cell: usize) -> Bitmap {
    NEIGHBOURS.bitmaps[cell]
}

/// Same cells as [`neighbour_bitmap`], as a list of indexes.
#[inline]
pub fn neighbour_indexes(cell: usize) -> &'static [u8] {
    &NEIGHBOURS.indexes[cell][..NEIGHBOURS.counts[cell] as usize]
}

#[inline]
pub const fn cell_bit(cell: usize) -> Bitmap {
    1 << cell
}

pub fn indexes_to_bitmap<I>(indexes: I) -> Bitmap
where
    I: IntoIterator,
    I::Item: Into<usize>,
{
    indexes
        .into_iter()
        .fold(NO_CELLS, |bitmap, index| bitmap | cell_bit(index.into()))
}

/// Iterate the cells of `bitmap` in ascending index order.
#[inline]
pub fn bitmap_to_indexes(bitmap: Bitmap) -> Cells {
    Cells(bitmap)
}

/// Ascending iterator over the cells of a bitmap.
#[derive(Debug, Clone, Copy)]
pub struct Cells(Bitmap);

impl Iterator for Cells {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}
