// Imports
use super::{Outline, ShapeBehaviour, DEFAULT_MAX_RATIO, DEFAULT_MIN_RATIO, RATIO_RANGE};
use crate::utils::{self, ensure_bounds, ensure_in_range};
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    ratio: f64,
}

impl ShapeBehaviour for Circle {
    fn ratio(&self) -> f64 {
        self.ratio
    }

    fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        self.ratio = ensure_in_range("ratio", ratio, RATIO_RANGE)?;
        Ok(())
    }

    fn outline(&self, center: kurbo::Point, radius: f64) -> Outline {
        Outline::Disk(kurbo::Circle::new(center, radius))
    }
}

impl Circle {
    /// A new circle with the given size ratio. Must be between 0.0 and 1.0.
    pub fn new(ratio: f64) -> Result<Self> {
        Ok(Self {
            ratio: ensure_in_range("ratio", ratio, RATIO_RANGE)?,
        })
    }

    /// A random circle.
    pub fn random<R>(range: &CircleRange, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let ratio = range.ratio_bounds()?;
        Self::new(utils::sample_hundredths(rng, ratio))
    }
}

/// The inclusive ranges a random circle is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "circle_range")]
pub struct CircleRange {
    /// Minimum size ratio. Defaults to 0.125.
    #[serde(rename = "min_ratio")]
    pub min_ratio: f64,
    /// Maximum size ratio. Defaults to 0.25.
    #[serde(rename = "max_ratio")]
    pub max_ratio: f64,
}

impl Default for CircleRange {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}

impl CircleRange {
    /// Checks that the bounds are ordered and inside their valid ranges.
    pub fn validate(&self) -> Result<()> {
        self.ratio_bounds().map(|_| ())
    }

    fn ratio_bounds(&self) -> Result<RangeInclusive<f64>> {
        ensure_bounds("ratio", self.min_ratio, self.max_ratio, RATIO_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_rng_default_pcg64;
    use crate::Error;

    #[test]
    fn ratio_is_validated() {
        for ratio in [0.0, 0.3, 1.0] {
            assert_eq!(Circle::new(ratio).unwrap().ratio(), ratio);
        }
        assert!(matches!(
            Circle::new(1.5),
            Err(Error::InvalidParameter { name: "ratio", .. })
        ));
        assert!(Circle::new(-0.01).is_err());

        let mut circle = Circle::new(0.5).unwrap();
        assert!(circle.set_ratio(2.0).is_err());
        assert_eq!(circle.ratio(), 0.5);
        circle.set_ratio(0.75).unwrap();
        assert_eq!(circle.ratio(), 0.75);
    }

    #[test]
    fn outline_is_a_disk() {
        let circle = Circle::new(0.2).unwrap();
        let center = kurbo::Point::new(3.0, 4.0);

        assert_eq!(
            circle.outline(center, 10.0),
            Outline::Disk(kurbo::Circle::new(center, 10.0))
        );
    }

    #[test]
    fn random_uses_hundredths_of_the_range() {
        let mut rng = new_rng_default_pcg64(Some(11));

        for _ in 0..200 {
            let ratio = Circle::random(&CircleRange::default(), &mut rng)
                .unwrap()
                .ratio();
            // 0.125 truncates to 0.12
            assert!((0.12..=0.25).contains(&ratio));
        }

        let exact = CircleRange {
            min_ratio: 0.4,
            max_ratio: 0.4,
        };
        assert_eq!(Circle::random(&exact, &mut rng).unwrap().ratio(), 0.4);
    }

    #[test]
    fn random_rejects_inverted_range() {
        let mut rng = new_rng_default_pcg64(Some(12));
        let range = CircleRange {
            min_ratio: 0.5,
            max_ratio: 0.1,
        };

        assert!(range.validate().is_err());
        assert!(Circle::random(&range, &mut rng).is_err());
    }
}
