use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Dimensions of the tile matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridSize {
    pub const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub const fn area(self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn contains(self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }

    /// Next size up: a square gains a column, otherwise the rows catch up.
    pub const fn grown(self) -> Self {
        if self.rows == self.cols {
            Self::new(self.rows, self.cols.saturating_add(1))
        } else {
            Self::new(self.rows.saturating_add(1), self.cols)
        }
    }

    /// Mirror of [`GridSize::grown`]: a square loses a row, otherwise the columns shrink.
    pub const fn shrunk(self) -> Self {
        if self.rows == self.cols {
            Self::new(self.rows.saturating_sub(1), self.cols)
        } else {
            Self::new(self.rows, self.cols.saturating_sub(1))
        }
    }

    /// Decodes a row-major linear index into coordinates, bounds are not checked.
    pub fn decode_index(self, index: usize) -> Option<Coord2> {
        if self.cols == 0 {
            return None;
        }
        let cols = usize::from(self.cols);
        let row = (index / cols).try_into().ok()?;
        let col = (index % cols).try_into().ok()?;
        Some((row, col))
    }

    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        (self.rows, self.cols).to_nd_index()
    }
}
