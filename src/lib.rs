//! Hexbin aggregates scattered 2D Cartesian points into counts on a
//! hexagonal tiling. The core is a coordinate transform from data space to
//! axial hex coordinates plus a cube-constrained rounding rule that picks
//! the nearest hexagon center; binning is a thin grouping step on top.
//! Rendering the tiles is left to whatever presentation layer consumes the
//! output.
//!
//! ```
//! use hexbin::{hexbin, GridConfig};
//!
//! let x = vec![0.0, 0.05, 1.8];
//! let y = vec![0.0, -0.1, 1.2];
//! let table = hexbin(&x, &y, &GridConfig::default()).unwrap();
//! // Every input point lands in exactly one tile
//! assert_eq!(table.total(), 3);
//! for row in table.rows() {
//!     println!("tile ({}, {}): {} points", row.q, row.r, row.counts);
//! }
//! ```
//!
//! See [GridConfig] for the tiling parameters (tile size, orientation,
//! aspect correction), or use [HexGrid] directly for the raw coordinate
//! conversions without binning.
//!
//! ## Cargo features
//!
//! - `tabular` (default): the [hexbin] aggregator and its [BinTable]
//!   output, which pull in the grouping facility (`indexmap` + `fnv`). The
//!   coordinate types and [HexGrid] have no such dependency.
//! - `json`: [BinTable::to_json] via `serde_json` (implies `tabular`).

#[cfg(feature = "tabular")]
mod binning;
mod config;
mod grid;
mod hex;

pub use crate::{
    config::{GridConfig, Orientation},
    grid::HexGrid,
    hex::{AxialPoint, TilePoint},
};

#[cfg(feature = "tabular")]
pub use crate::binning::{hexbin, BinTable, TileCount};
