use crate::{config::GridConfig, grid::HexGrid, hex::TilePoint};
#[cfg(feature = "json")]
use anyhow::Context;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// An ordered map of tiles to some `T`. Insertion order is preserved until
/// the map is explicitly sorted by key.
type TilePointIndexMap<T> = IndexMap<TilePoint, T, FnvBuildHasher>;

/// One occupied tile in a binning result: the tile's axial coordinates and
/// the number of points that landed in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCount {
    pub q: i64,
    pub r: i64,
    pub counts: usize,
}

/// The result of binning a batch of points: one row per tile that received
/// at least one point. Rows are sorted by the natural `(q, r)` ordering of
/// the tile coordinates, so output is deterministic for a given input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BinTable {
    rows: Vec<TileCount>,
}

impl BinTable {
    /// Get a reference to the per-tile rows of this table
    pub fn rows(&self) -> &[TileCount] {
        &self.rows
    }

    /// Move the rows out of this table
    pub fn into_rows(self) -> Vec<TileCount> {
        self.rows
    }

    /// The number of occupied tiles
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The total number of binned points, i.e. the sum of all counts. This
    /// always equals the length of the input batch.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.counts).sum()
    }

    /// Serialize this table to JSON
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing bin table")
    }
}

/// Perform an equal-weight binning of data points into hexagonal tiles:
/// map every `(x, y)` point to its enclosing tile, then count points per
/// tile. The two slices hold the x and y coordinates of the batch and must
/// have the same length.
///
/// Returns an error if the config is invalid or the slices have mismatched
/// lengths; no partial result is produced. An empty batch yields an empty
/// table.
pub fn hexbin(
    x: &[f64],
    y: &[f64],
    config: &GridConfig,
) -> anyhow::Result<BinTable> {
    let grid = HexGrid::new(*config)?;
    let tiles = grid.tile_coords(x, y)?;
    debug!("Binning {} points with {:?}", tiles.len(), config);

    let mut groups: TilePointIndexMap<usize> = TilePointIndexMap::default();
    for tile in tiles {
        *groups.entry(tile).or_insert(0) += 1;
    }
    groups.sort_keys();

    let rows = groups
        .into_iter()
        .map(|(tile, counts)| TileCount {
            q: tile.q(),
            r: tile.r(),
            counts,
        })
        .collect();
    Ok(BinTable { rows })
}
