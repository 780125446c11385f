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

/// The valid range of the number of star points.
pub const POINTS_RANGE: RangeInclusive<u32> = 4..=8;

/// A star, alternating between outer tips and inner vertices at half the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    ratio: f64,
    points: u32,
    /// Rotation in degrees.
    rotation: u32,
}

impl ShapeBehaviour for Star {
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

impl Star {
    /// A new star.
    ///
    /// `ratio` must be between 0.0 and 1.0, `points` between 4 and 8 and `rotation` between 0 and 360 degrees.
    pub fn new(ratio: f64, points: u32, rotation: u32) -> Result<Self> {
        Ok(Self {
            ratio: ensure_in_range("ratio", ratio, RATIO_RANGE)?,
            points: ensure_in_range("points", points, POINTS_RANGE)?,
            rotation: ensure_in_range("rotation", rotation, ROTATION_RANGE)?,
        })
    }

    /// The number of outer tips.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Set the number of outer tips. Must be between 4 and 8.
    pub fn set_points(&mut self, points: u32) -> Result<&mut Self> {
        self.points = ensure_in_range("points", points, POINTS_RANGE)?;
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

    /// The `2 * points` vertices of the star.
    ///
    /// Vertex `i` lies at `rotation + 360 / (2 * points) * i` degrees, even indices at `radius`, odd ones at `radius / 2`.
    pub fn vertices(&self, center: kurbo::Point, radius: f64) -> Vec<kurbo::Point> {
        ring_vertices(center, self.rotation, self.points * 2, |i| {
            if i % 2 == 0 {
                radius
            } else {
                radius * 0.5
            }
        })
    }

    /// A random star.
    pub fn random<R>(range: &StarRange, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let (ratio, points, rotation) = range.bounds()?;

        Self::new(
            utils::sample_hundredths(rng, ratio),
            rng.random_range(points),
            rng.random_range(rotation),
        )
    }
}

/// The inclusive ranges a random star is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "star_range")]
pub struct StarRange {
    /// Minimum size ratio. Defaults to 0.125.
    #[serde(rename = "min_ratio")]
    pub min_ratio: f64,
    /// Maximum size ratio. Defaults to 0.25.
    #[serde(rename = "max_ratio")]
    pub max_ratio: f64,
    /// Minimum number of points. Defaults to 4.
    #[serde(rename = "min_points")]
    pub min_points: u32,
    /// Maximum number of points. Defaults to 8.
    #[serde(rename = "max_points")]
    pub max_points: u32,
    /// Minimum rotation in degrees. Defaults to 0.
    #[serde(rename = "min_rotation")]
    pub min_rotation: u32,
    /// Maximum rotation in degrees. Defaults to 360.
    #[serde(rename = "max_rotation")]
    pub max_rotation: u32,
}

impl Default for StarRange {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
            min_points: *POINTS_RANGE.start(),
            max_points: *POINTS_RANGE.end(),
            min_rotation: *ROTATION_RANGE.start(),
            max_rotation: *ROTATION_RANGE.end(),
        }
    }
}

impl StarRange {
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
            ensure_bounds("points", self.min_points, self.max_points, POINTS_RANGE)?,
            ensure_bounds(
                "rotation",
                self.min_rotation,
                self.max_rotation,
                ROTATION_RANGE,
            )?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_rng_default_pcg64;
    use crate::Error;
    use approx::assert_relative_eq;

    #[test]
    fn parameters_are_validated() {
        assert!(Star::new(0.2, 4, 0).is_ok());
        assert!(Star::new(0.2, 8, 360).is_ok());
        assert!(matches!(
            Star::new(0.2, 3, 0),
            Err(Error::InvalidParameter { name: "points", .. })
        ));
        assert!(Star::new(0.2, 9, 0).is_err());
        assert!(Star::new(0.2, 5, 720).is_err());
        assert!(Star::new(-1.0, 5, 0).is_err());

        let mut star = Star::new(0.2, 5, 0).unwrap();
        assert!(star.set_points(2).is_err());
        assert_eq!(star.points(), 5);
    }

    #[test]
    fn vertices_alternate_between_radii() {
        let star = Star::new(0.5, 4, 0).unwrap();
        let center = kurbo::Point::ZERO;
        let radius = 12.0;
        let vertices = star.vertices(center, radius);

        assert_eq!(vertices.len(), 8);
        for (i, vertex) in vertices.iter().enumerate() {
            let expected = if i % 2 == 0 { radius } else { radius / 2.0 };
            assert_relative_eq!(vertex.distance(center), expected, epsilon = 1e-9);
        }
        // first tip on the positive x axis, second vertex at 45 degrees
        assert_relative_eq!(vertices[0].x, radius, epsilon = 1e-9);
        assert_relative_eq!(vertices[1].x, vertices[1].y, epsilon = 1e-9);
    }

    #[test]
    fn random_respects_ranges() {
        let mut rng = new_rng_default_pcg64(Some(31));

        for _ in 0..200 {
            let star = Star::random(&StarRange::default(), &mut rng).unwrap();
            assert!(POINTS_RANGE.contains(&star.points()));
            assert!(ROTATION_RANGE.contains(&star.rotation()));
        }

        let out_of_domain = StarRange {
            max_points: 10,
            ..Default::default()
        };
        assert!(out_of_domain.validate().is_err());
    }
}
