use crate::{
    config::{GridConfig, Orientation},
    hex::{AxialPoint, TilePoint},
};
use anyhow::{anyhow, Context};
use nalgebra::{Matrix2, Vector2};
use validator::Validate;

/// A hexagonal tiling of the 2D plane, used to convert Cartesian data points
/// into the hex coordinate system (and back). A grid is created from a
/// particular [GridConfig] and is immutable afterwards; grids are cheap to
/// create, so to change the config just create a new one.
///
/// The conversion is adapted from
/// <https://www.redblobgames.com/grids/hexagons/#pixel-to-hex>: normalize
/// each point by the tile size, correct for the aspect scale, then apply a
/// fixed orientation-dependent change-of-basis matrix. The grid holds no
/// state beyond the config and the precomputed basis, so a single grid can
/// be shared freely across threads.
#[derive(Clone, Debug)]
pub struct HexGrid {
    config: GridConfig,
    basis: Matrix2<f64>,
    inverse: Matrix2<f64>,
}

impl HexGrid {
    /// Create a new grid with the given config. Returns an error if the
    /// config is invalid, so no coordinate math ever runs against a
    /// non-positive size or aspect scale.
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        Ok(Self {
            config,
            basis: Self::basis(config.orientation),
            inverse: Self::basis_inverse(config.orientation),
        })
    }

    /// The Cartesian→axial change-of-basis matrix for an orientation. Rows
    /// are the coefficients of `q` and `r` respectively.
    fn basis(orientation: Orientation) -> Matrix2<f64> {
        let sqrt3 = 3.0_f64.sqrt();
        match orientation {
            Orientation::PointyTop => {
                Matrix2::new(sqrt3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0)
            }
            Orientation::FlatTop => {
                Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, sqrt3 / 3.0)
            }
        }
    }

    /// Exact inverse of [Self::basis], for mapping axial coordinates back
    /// into data space.
    fn basis_inverse(orientation: Orientation) -> Matrix2<f64> {
        let sqrt3 = 3.0_f64.sqrt();
        match orientation {
            Orientation::PointyTop => {
                Matrix2::new(sqrt3, sqrt3 / 2.0, 0.0, 1.5)
            }
            Orientation::FlatTop => Matrix2::new(1.5, 0.0, sqrt3 / 2.0, sqrt3),
        }
    }

    /// Get a reference to the config this grid was created from
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Map a single Cartesian point to the continuous axial coordinates of
    /// its position on the grid. The result is generally fractional; use
    /// [AxialPoint::round] to get the enclosing tile.
    pub fn cartesian_to_axial(&self, x: f64, y: f64) -> AxialPoint {
        let GridConfig {
            size,
            orientation,
            aspect_scale,
        } = self.config;
        // y is negated going in: data-space y grows downward (screen
        // convention) while axial r grows upward. The aspect correction
        // applies to whichever axis the orientation stretches.
        let scaled = match orientation {
            Orientation::PointyTop => {
                Vector2::new(x / size * aspect_scale, -y / size)
            }
            Orientation::FlatTop => {
                Vector2::new(x / size, -y / size / aspect_scale)
            }
        };
        let axial = self.basis * scaled;
        AxialPoint::new(axial.x, axial.y)
    }

    /// Map parallel slices of x and y coordinates to continuous axial
    /// coordinates, one output per input point. Returns an error if the
    /// slices have different lengths; no partial output is produced.
    pub fn axial_coords(
        &self,
        x: &[f64],
        y: &[f64],
    ) -> anyhow::Result<Vec<AxialPoint>> {
        check_lengths(x, y)?;
        Ok(x.iter()
            .zip(y)
            .map(|(&x, &y)| self.cartesian_to_axial(x, y))
            .collect())
    }

    /// Map parallel slices of x and y coordinates to the tiles that enclose
    /// them. This is [Self::axial_coords] followed by [AxialPoint::round]
    /// on every point.
    pub fn tile_coords(
        &self,
        x: &[f64],
        y: &[f64],
    ) -> anyhow::Result<Vec<TilePoint>> {
        let axial = self.axial_coords(x, y)?;
        Ok(axial.into_iter().map(AxialPoint::round).collect())
    }

    /// Map an axial position back to Cartesian data space. This is the
    /// exact inverse of [Self::cartesian_to_axial].
    pub fn axial_to_cartesian(&self, point: AxialPoint) -> (f64, f64) {
        let GridConfig {
            size,
            orientation,
            aspect_scale,
        } = self.config;
        let scaled = self.inverse * Vector2::new(point.q(), point.r());
        match orientation {
            Orientation::PointyTop => {
                (scaled.x * size / aspect_scale, -scaled.y * size)
            }
            Orientation::FlatTop => {
                (scaled.x * size, -scaled.y * size * aspect_scale)
            }
        }
    }

    /// Get the center of a tile in Cartesian data space. Useful for
    /// consumers that place binned tiles back onto the plane they came
    /// from.
    pub fn tile_center(&self, tile: TilePoint) -> (f64, f64) {
        self.axial_to_cartesian(tile.into())
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> anyhow::Result<()> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(anyhow!(
            "mismatched coordinate slices: {} x values vs {} y values",
            x.len(),
            y.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    fn grid(orientation: Orientation) -> HexGrid {
        HexGrid::new(GridConfig {
            orientation,
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_origin_maps_to_origin() {
        for orientation in Orientation::iter() {
            let axial = grid(orientation).cartesian_to_axial(0.0, 0.0);
            assert_approx_eq!(axial.q(), 0.0);
            assert_approx_eq!(axial.r(), 0.0);
            assert_eq!(axial.round(), TilePoint::ORIGIN);
        }
    }

    #[test]
    fn test_pointy_axial_coords() {
        let grid = grid(Orientation::PointyTop);

        let axial = grid.cartesian_to_axial(1.0, 0.0);
        assert_approx_eq!(axial.q(), 0.5773503);
        assert_approx_eq!(axial.r(), 0.0);

        // y is inverted on the way in
        let axial = grid.cartesian_to_axial(0.0, -1.0);
        assert_approx_eq!(axial.q(), -0.3333333);
        assert_approx_eq!(axial.r(), 0.6666667);
    }

    #[test]
    fn test_flat_axial_coords() {
        let grid = grid(Orientation::FlatTop);

        let axial = grid.cartesian_to_axial(1.0, 0.0);
        assert_approx_eq!(axial.q(), 0.6666667);
        assert_approx_eq!(axial.r(), -0.3333333);

        let axial = grid.cartesian_to_axial(0.0, 1.0);
        assert_approx_eq!(axial.q(), 0.0);
        assert_approx_eq!(axial.r(), -0.5773503);
    }

    #[test]
    fn test_size_scaling() {
        let grid = HexGrid::new(GridConfig {
            size: 2.0,
            ..GridConfig::default()
        })
        .unwrap();
        let axial = grid.cartesian_to_axial(2.0, -3.0);
        assert_approx_eq!(axial.q(), 0.0773503);
        assert_approx_eq!(axial.r(), 1.0);
    }

    #[test]
    fn test_aspect_scale() {
        // Pointy-top stretches x by the aspect scale
        let grid = HexGrid::new(GridConfig {
            aspect_scale: 2.0,
            ..GridConfig::default()
        })
        .unwrap();
        let axial = grid.cartesian_to_axial(1.0, 0.0);
        assert_approx_eq!(axial.q(), 1.1547005);
        assert_approx_eq!(axial.r(), 0.0);

        // Flat-top divides y by it
        let grid = HexGrid::new(GridConfig {
            orientation: Orientation::FlatTop,
            aspect_scale: 2.0,
            ..GridConfig::default()
        })
        .unwrap();
        let axial = grid.cartesian_to_axial(0.0, 1.0);
        assert_approx_eq!(axial.q(), 0.0);
        assert_approx_eq!(axial.r(), -0.2886751);
    }

    #[test]
    fn test_tile_coords() {
        let grid = grid(Orientation::PointyTop);
        let tiles = grid
            .tile_coords(&[0.0, 0.5, 1.0, -1.04, 0.2], &[0.0, 0.0, 0.0, 0.0, -1.9])
            .unwrap();
        assert_eq!(
            tiles,
            vec![
                TilePoint::ORIGIN,
                TilePoint::ORIGIN,
                TilePoint::new(1, 0),
                TilePoint::new(-1, 0),
                TilePoint::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_flat_boundary_tie() {
        // (1, 0) with size 1 is the shared corner of three flat-top tiles:
        // all three cube rounding errors are exactly 1/3, and the tie
        // deterministically resolves to (1, -1)
        let tiles = grid(Orientation::FlatTop)
            .tile_coords(&[1.0], &[0.0])
            .unwrap();
        assert_eq!(tiles, vec![TilePoint::new(1, -1)]);
    }

    #[test]
    fn test_orientation_tilings_differ() {
        let x = [1.0, -0.7, 0.3, 2.2];
        let y = [0.4, 1.9, -1.1, 0.8];
        let pointy = grid(Orientation::PointyTop).tile_coords(&x, &y).unwrap();
        let flat = grid(Orientation::FlatTop).tile_coords(&x, &y).unwrap();
        assert_ne!(pointy, flat);
    }

    #[test]
    fn test_axial_to_cartesian() {
        let (x, y) = grid(Orientation::PointyTop)
            .axial_to_cartesian(AxialPoint::new(1.0, 0.0));
        assert_approx_eq!(x, 1.7320508);
        assert_approx_eq!(y, 0.0);

        let (x, y) = grid(Orientation::FlatTop)
            .axial_to_cartesian(AxialPoint::new(1.0, 0.0));
        assert_approx_eq!(x, 1.5);
        assert_approx_eq!(y, -0.8660254);
    }

    #[test]
    fn test_tile_center_round_trip() {
        // A tile's center is an interior point of that tile, so it has to
        // map back to the same tile under any valid config
        for orientation in Orientation::iter() {
            let grid = HexGrid::new(GridConfig {
                size: 2.5,
                orientation,
                aspect_scale: 1.5,
            })
            .unwrap();
            for q in -3..=3 {
                for r in -3..=3 {
                    let tile = TilePoint::new(q, r);
                    let (x, y) = grid.tile_center(tile);
                    assert_eq!(
                        grid.cartesian_to_axial(x, y).round(),
                        tile,
                        "round trip failed for {} ({:?})",
                        tile,
                        orientation
                    );
                }
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let grid = grid(Orientation::PointyTop);
        let err = grid.axial_coords(&[0.0, 1.0], &[0.0]).unwrap_err();
        assert!(err.to_string().contains("mismatched"));
        assert!(grid.tile_coords(&[], &[1.0]).is_err());
    }

    #[test]
    fn test_invalid_config() {
        assert!(HexGrid::new(GridConfig {
            size: 0.0,
            ..GridConfig::default()
        })
        .is_err());
        assert!(HexGrid::new(GridConfig {
            size: -2.0,
            ..GridConfig::default()
        })
        .is_err());
        assert!(HexGrid::new(GridConfig {
            aspect_scale: 0.0,
            ..GridConfig::default()
        })
        .is_err());
    }
}
