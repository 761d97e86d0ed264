//! World module - terrain, atmosphere, and book pickups.

mod books;
mod plugin;
mod terrain;

pub use books::{Book, BookAssets, BookSpawner};
pub use plugin::WorldPlugin;
pub use terrain::{HeightSource, Terrain, TerrainMesh};

#[cfg(test)]
pub(crate) use terrain::FlatGround;
