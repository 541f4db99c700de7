use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use validator::{Validate, ValidationError};

/// Parameters that define a hexagonal tiling of the 2D plane. Two batches of
/// points binned with the same config always produce the same tiles.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// The size of the hexagonal tiling: the distance from the center of a
    /// hexagon to one of its corners. For [Orientation::PointyTop] that's
    /// the top corner, for [Orientation::FlatTop] a side corner. Must be
    /// finite and strictly positive, otherwise the coordinate math degrades
    /// into division garbage.
    #[validate(custom = "validate_positive")]
    pub size: f64,

    /// Which way the hexagons face. This selects the basis matrix used to
    /// convert Cartesian points to axial coordinates, so the two
    /// orientations produce two different (individually consistent)
    /// tilings of the same data.
    pub orientation: Orientation,

    /// Scaling correction for data spaces whose x and y units differ.
    /// Stretches one axis (which one depends on the orientation) so that
    /// tiles stay visually regular hexagons when drawn on a non-square
    /// aspect ratio. Must be finite and strictly positive. The default of 1
    /// means no correction.
    #[validate(custom = "validate_positive")]
    pub aspect_scale: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            orientation: Orientation::PointyTop,
            aspect_scale: 1.0,
        }
    }
}

/// The two standard hexagon orientations. They differ in which pair of
/// opposite corners is vertical: a pointy-top hexagon has corners at the
/// top and bottom, a flat-top hexagon has horizontal top and bottom sides.
///
/// Parsing from a string (serde or [std::str::FromStr]) accepts exactly
/// `pointy_top` and `flat_top`; anything else is an error rather than a
/// silent default.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    PointyTop,
    FlatTop,
}

/// Strict positivity check. `range` validation is inclusive on its bounds,
/// which would let zero through.
fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}
