// Imports
use super::{
    ring_vertices, Outline, ShapeBehaviour, DEFAULT_MAX_RATIO, DEFAULT_MIN_RATIO, RATIO_RANGE,
    ROTATION_RANGE,
};
use crate::utils::{self, ensure_bounds, ensure_in_range};
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The valid range of the number of polygon sides.
pub const SIDES_RANGE: RangeInclusive<u32> = 3..=12;

/// A regular polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    ratio: f64,
    sides: u32,
    /// Rotation in degrees.
    rotation: u32,
}

impl ShapeBehaviour for Polygon {
    fn ratio(&self) -> f64 {
        self.ratio
    }

    fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        self.ratio = ensure_in_range("ratio", ratio, RATIO_RANGE)?;
        Ok(())
    }

    fn outline(&self, center: kurbo::Point, radius: f64) -> Outline {
        Outline::Polygon(self.vertices(center, radius))
    }
}

impl Polygon {
    /// A new polygon.
    ///
    /// `ratio` must be between 0.0 and 1.0, `sides` between 3 and 12 and `rotation` between 0 and 360 degrees.
    pub fn new(ratio: f64, sides: u32, rotation: u32) -> Result<Self> {
        Ok(Self {
            ratio: ensure_in_range("ratio", ratio, RATIO_RANGE)?,
            sides: ensure_in_range("sides", sides, SIDES_RANGE)?,
            rotation: ensure_in_range("rotation", rotation, ROTATION_RANGE)?,
        })
    }

    /// The number of sides.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Set the number of sides. Must be between 3 and 12.
    pub fn set_sides(&mut self, sides: u32) -> Result<&mut Self> {
        self.sides = ensure_in_range("sides", sides, SIDES_RANGE)?;
        Ok(self)
    }

    /// The rotation angle in degrees.
    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    /// Set the rotation angle in degrees. Must be between 0 and 360.
    pub fn set_rotation(&mut self, rotation: u32) -> Result<&mut Self> {
        self.rotation = ensure_in_range("rotation", rotation, ROTATION_RANGE)?;
        Ok(self)
    }

    /// The vertices of the polygon, all at `radius` from `center`.
    ///
    /// Vertex `i` lies at `rotation + 360 / sides * i` degrees.
    pub fn vertices(&self, center: kurbo::Point, radius: f64) -> Vec<kurbo::Point> {
        ring_vertices(center, self.rotation, self.sides, |_| radius)
    }

    /// A random polygon.
    pub fn random<R>(range: &PolygonRange, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let (ratio, sides, rotation) = range.bounds()?;

        Self::new(
            utils::sample_hundredths(rng, ratio),
            rng.random_range(sides),
            rng.random_range(rotation),
        )
    }
}

/// The inclusive ranges a random polygon is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "polygon_range")]
pub struct PolygonRange {
    /// Minimum size ratio. Defaults to 0.125.
    #[serde(rename = "min_ratio")]
    pub min_ratio: f64,
    /// Maximum size ratio. Defaults to 0.25.
    #[serde(rename = "max_ratio")]
    pub max_ratio: f64,
    /// Minimum number of sides. Defaults to 3.
    #[serde(rename = "min_sides")]
    pub min_sides: u32,
    /// Maximum number of sides. Defaults to 12.
    #[serde(rename = "max_sides")]
    pub max_sides: u32,
    /// Minimum rotation in degrees. Defaults to 0.
    #[serde(rename = "min_rotation")]
    pub min_rotation: u32,
    /// Maximum rotation in degrees. Defaults to 360.
    #[serde(rename = "max_rotation")]
    pub max_rotation: u32,
}

impl Default for PolygonRange {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
            min_sides: *SIDES_RANGE.start(),
            max_sides: *SIDES_RANGE.end(),
            min_rotation: *ROTATION_RANGE.start(),
            max_rotation: *ROTATION_RANGE.end(),
        }
    }
}

impl PolygonRange {
    /// Checks that the bounds are ordered and inside their valid ranges.
    pub fn validate(&self) -> Result<()> {
        self.bounds().map(|_| ())
    }

    #[allow(clippy::type_complexity)]
    fn bounds(
        &self,
    ) -> Result<(
        RangeInclusive<f64>,
        RangeInclusive<u32>,
        RangeInclusive<u32>,
    )> {
        Ok((
            ensure_bounds("ratio", self.min_ratio, self.max_ratio, RATIO_RANGE)?,
            ensure_bounds("sides", self.min_sides, self.max_sides, SIDES_RANGE)?,
            ensure_bounds(
                "rotation",
                self.min_rotation,
                self.max_rotation,
                ROTATION_RANGE,
            )?,
        ))
    }
}
