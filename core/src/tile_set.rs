use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Validated request for a tile set: how many tiles on which grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSetConfig {
    pub size: GridSize,
    pub tiles: CellCount,
}

impl TileSetConfig {
    pub fn new(tiles: CellCount, size: GridSize) -> Result<Self> {
        if tiles > size.area() {
            log::warn!(
                "Rejected tile set request, {} tiles do not fit a {}x{} grid",
                tiles,
                size.rows,
                size.cols
            );
            return Err(GameError::InvalidArgument("tile count exceeds grid area"));
        }
        Ok(Self { size, tiles })
    }

    /// Accepts the loosely typed parameters the presentation layer hands over.
    pub fn from_signed(tiles: i64, rows: i64, cols: i64) -> Result<Self> {
        let tiles: CellCount = tiles
            .try_into()
            .map_err(|_| GameError::InvalidArgument("tile count must be a non-negative integer"))?;
        let rows: Coord = rows
            .try_into()
            .map_err(|_| GameError::InvalidArgument("rows must be a non-negative integer"))?;
        let cols: Coord = cols
            .try_into()
            .map_err(|_| GameError::InvalidArgument("cols must be a non-negative integer"))?;
        Self::new(tiles, GridSize::new(rows, cols))
    }
}

/// Hidden tiles of one level, stored as a grid where empty cells are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TileSetRepr")]
pub struct TileSet {
    cells: Array2<Option<TileStatus>>,
    count: CellCount,
}

/// Serialized form of [`TileSet`], the count is recomputed from the cells.
#[derive(Deserialize)]
struct TileSetRepr {
    cells: Array2<Option<TileStatus>>,
    count: CellCount,
}

impl TryFrom<TileSetRepr> for TileSet {
    type Error = GameError;

    fn try_from(TileSetRepr { cells, count }: TileSetRepr) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidArgument("tile grid too large"));
        }
        let actual = cells.iter().filter(|cell| cell.is_some()).count() as CellCount;
        if actual != count {
            log::warn!("Stored tile count {} does not match the grid, using {}", count, actual);
        }
        Ok(Self {
            cells,
            count: actual,
        })
    }
}

impl TileSet {
    /// Places `tiles` closed tiles on distinct random cells of a `rows x cols` grid.
    pub fn create(tiles: CellCount, rows: Coord, cols: Coord, seed: u64) -> Result<Self> {
        let config = TileSetConfig::new(tiles, GridSize::new(rows, cols))?;
        Ok(RandomTileSetGenerator::new(seed).generate(config))
    }

    pub fn empty(size: GridSize) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            count: 0,
        }
    }

    pub fn from_positions(size: GridSize, positions: &[Coord2]) -> Result<Self> {
        let mut cells: Array2<Option<TileStatus>> = Array2::default(size.to_nd_index());
        let mut count: CellCount = 0;

        for &coords in positions {
            if !size.contains(coords) {
                return Err(GameError::InvalidArgument("tile position outside the grid"));
            }
            let cell = &mut cells[coords.to_nd_index()];
            if cell.is_some() {
                return Err(GameError::InvalidArgument("duplicate tile position"));
            }
            *cell = Some(TileStatus::Closed);
            count += 1;
        }

        Ok(Self { cells, count })
    }

    pub fn size(&self) -> GridSize {
        let dim = self.cells.dim();
        GridSize::new(dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn len(&self) -> CellCount {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn open_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(TileStatus::Open)))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.status_at(coords).map(|status| Tile {
            position: coords,
            status,
        })
    }

    pub fn status_at(&self, coords: Coord2) -> Option<TileStatus> {
        self.cells.get(coords.to_nd_index()).copied().flatten()
    }

    /// Opens the tile at `coords`, a no-op for open tiles; `None` means there is no tile there.
    pub fn open(&mut self, coords: Coord2) -> Option<TileStatus> {
        let status = self.cells.get_mut(coords.to_nd_index())?.as_mut()?;
        *status = TileStatus::Open;
        Some(*status)
    }

    /// All tiles in row-major order.
    pub fn snapshot(&self) -> Vec<Tile> {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), cell)| {
                cell.map(|status| Tile {
                    position: (row as Coord, col as Coord),
                    status,
                })
            })
            .collect()
    }

    pub fn closed_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| matches!(cell, Some(TileStatus::Closed)))
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}
