use crate::*;
pub use random::*;

mod random;

pub trait TileSetGenerator {
    fn generate(self, config: TileSetConfig) -> TileSet;
}
