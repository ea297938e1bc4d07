use alloc::vec::Vec;

use super::*;

/// Purely random placement: every cell of the grid is equally likely to hold a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomTileSetGenerator {
    seed: u64,
}

impl RandomTileSetGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generates the tile set and draws the seed for the next generation from the same stream.
    pub fn generate_with_next_seed(self, config: TileSetConfig) -> (TileSet, u64) {
        use rand::prelude::*;

        let TileSetConfig { size, tiles } = config;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // shuffle a prefix instead of retrying on collisions, terminates even on full grids
        let mut cells: Vec<Coord2> = (0..size.rows)
            .flat_map(|row| (0..size.cols).map(move |col| (row, col)))
            .collect();
        let (picked, _) = cells.partial_shuffle(&mut rng, tiles.into());

        log::trace!(
            "Placing {} tiles on a {}x{} grid (seed {})",
            tiles,
            size.rows,
            size.cols,
            self.seed
        );

        let tile_set =
            TileSet::from_positions(size, picked).expect("shuffled cells should be distinct");
        (tile_set, rng.random())
    }
}

impl TileSetGenerator for RandomTileSetGenerator {
    fn generate(self, config: TileSetConfig) -> TileSet {
        self.generate_with_next_seed(config).0
    }
}
