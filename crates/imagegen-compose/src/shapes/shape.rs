// Imports
use super::{Circle, CircleRange, Outline, Polygon, PolygonRange, ShapeBehaviour, Star, StarRange};
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shape, storing shape variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A circle shape.
    Circle(Circle),
    /// A regular polygon shape.
    Polygon(Polygon),
    /// A star shape.
    Star(Star),
}

impl ShapeBehaviour for Shape {
    fn ratio(&self) -> f64 {
        match self {
            Self::Circle(circle) => circle.ratio(),
            Self::Polygon(polygon) => polygon.ratio(),
            Self::Star(star) => star.ratio(),
        }
    }

    fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        match self {
            Self::Circle(circle) => circle.set_ratio(ratio),
            Self::Polygon(polygon) => polygon.set_ratio(ratio),
            Self::Star(star) => star.set_ratio(ratio),
        }
    }

    fn outline(&self, center: kurbo::Point, radius: f64) -> Outline {
        match self {
            Self::Circle(circle) => circle.outline(center, radius),
            Self::Polygon(polygon) => polygon.outline(center, radius),
            Self::Star(star) => star.outline(center, radius),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<Star> for Shape {
    fn from(star: Star) -> Self {
        Self::Star(star)
    }
}

impl Shape {
    /// A random shape. Each variant is picked with equal probability and sampled from its range in `range`.
    ///
    /// All three ranges are validated, regardless of which variant gets picked.
    pub fn random<R>(range: &ShapeRange, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        range.validate()?;

        let shape = match rng.random_range(0..3) {
            0 => Self::Circle(Circle::random(&range.circle, rng)?),
            1 => Self::Polygon(Polygon::random(&range.polygon, rng)?),
            _ => Self::Star(Star::random(&range.star, rng)?),
        };
        tracing::trace!("generated random shape {shape:?}");
        Ok(shape)
    }
}

/// The ranges of each shape variant, used by [Shape::random].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "shape_range")]
pub struct ShapeRange {
    /// Range for circles.
    #[serde(rename = "circle")]
    pub circle: CircleRange,
    /// Range for polygons.
    #[serde(rename = "polygon")]
    pub polygon: PolygonRange,
    /// Range for stars.
    #[serde(rename = "star")]
    pub star: StarRange,
}

impl ShapeRange {
    /// Checks the ranges of all variants.
    pub fn validate(&self) -> Result<()> {
        self.circle.validate()?;
        self.polygon.validate()?;
        self.star.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_rng_default_pcg64;
    use crate::Error;

    #[test]
    fn random_picks_every_variant() {
        let mut rng = new_rng_default_pcg64(Some(41));
        let mut counts = [0usize; 3];

        for _ in 0..3000 {
            match Shape::random(&ShapeRange::default(), &mut rng).unwrap() {
                Shape::Circle(_) => counts[0] += 1,
                Shape::Polygon(_) => counts[1] += 1,
                Shape::Star(_) => counts[2] += 1,
            }
        }
        // roughly a third each
        for count in counts {
            assert!((800..=1200).contains(&count), "unbalanced counts {counts:?}");
        }
    }

    #[test]
    fn random_forwards_sub_ranges() {
        let mut rng = new_rng_default_pcg64(Some(42));
        let range = ShapeRange {
            circle: CircleRange {
                min_ratio: 0.9,
                max_ratio: 0.9,
            },
            polygon: PolygonRange {
                min_sides: 7,
                max_sides: 7,
                ..Default::default()
            },
            star: StarRange {
                min_points: 5,
                max_points: 5,
                ..Default::default()
            },
        };

        for _ in 0..100 {
            match Shape::random(&range, &mut rng).unwrap() {
                Shape::Circle(circle) => assert_eq!(circle.ratio(), 0.9),
                Shape::Polygon(polygon) => assert_eq!(polygon.sides(), 7),
                Shape::Star(star) => assert_eq!(star.points(), 5),
            }
        }
    }

    #[test]
    fn invalid_sub_range_always_fails() {
        let mut rng = new_rng_default_pcg64(Some(43));
        let range = ShapeRange {
            star: StarRange {
                min_points: 8,
                max_points: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        for _ in 0..20 {
            assert!(matches!(
                Shape::random(&range, &mut rng),
                Err(Error::InvalidParameter { name: "points", .. })
            ));
        }
    }

    #[test]
    fn set_ratio_dispatches() {
        let mut shape = Shape::from(Polygon::new(0.1, 5, 0).unwrap());

        shape.set_ratio(0.6).unwrap();
        assert_eq!(shape.ratio(), 0.6);
        assert!(shape.set_ratio(1.2).is_err());
        assert_eq!(shape.ratio(), 0.6);
    }

    #[test]
    fn range_deserializes_nested_defaults() {
        let range: ShapeRange =
            serde_json::from_str(r#"{"polygon": {"max_sides": 6}, "star": {}}"#).unwrap();

        assert_eq!(range.polygon.max_sides, 6);
        assert_eq!(range.polygon.min_sides, 3);
        assert_eq!(range.circle, CircleRange::default());
        assert_eq!(range.star, StarRange::default());
    }
}
