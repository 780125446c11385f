// Imports
use crate::{Error, Result};
use rand::{Rng, SeedableRng};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Tolerance when converting a float to whole hundredths, absorbing binary representation error (e.g. `0.57 * 100.0`).
const HUNDREDTHS_EPSILON: f64 = 1e-9;

/// A new random number generator with the pcg64 algorithm.
///
/// Used for seedable, reproducible random numbers.
pub fn new_rng_default_pcg64(seed: Option<u64>) -> rand_pcg::Pcg64 {
    if let Some(seed) = seed {
        rand_pcg::Pcg64::seed_from_u64(seed)
    } else {
        rand_pcg::Pcg64::from_os_rng()
    }
}

/// Ensures `value` lies inside the inclusive `range`, returning it unchanged.
pub fn ensure_in_range<T>(name: &'static str, value: T, range: RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(
            name,
            format!(
                "{value} is not between {} and {}",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Ensures both bounds of a sampling range lie in `domain` and that `min <= max`.
pub fn ensure_bounds<T>(
    name: &'static str,
    min: T,
    max: T,
    domain: RangeInclusive<T>,
) -> Result<RangeInclusive<T>>
where
    T: PartialOrd + Display + Copy,
{
    let min = ensure_in_range(name, min, domain.clone())?;
    let max = ensure_in_range(name, max, domain)?;

    if min > max {
        return Err(Error::invalid_parameter(
            name,
            format!("minimum {min} is greater than maximum {max}"),
        ));
    }
    Ok(min..=max)
}

/// The number of whole hundredths in `value`, truncated.
pub fn to_hundredths(value: f64) -> i64 {
    (value * 100.0 + HUNDREDTHS_EPSILON).floor() as i64
}

/// Uniformly samples a value at 1/100 granularity from the inclusive `range`.
///
/// Both bounds are truncated to whole hundredths before sampling.
pub fn sample_hundredths<R>(rng: &mut R, range: RangeInclusive<f64>) -> f64
where
    R: Rng + ?Sized,
{
    let hundredths = rng.random_range(to_hundredths(*range.start())..=to_hundredths(*range.end()));
    hundredths as f64 / 100.0
}
