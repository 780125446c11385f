// Imports
use crate::utils::{self, ensure_bounds, ensure_in_range};
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The valid range of the red, green and blue components.
pub const CHANNEL_RANGE: RangeInclusive<i32> = 0..=255;
/// The valid range of the alpha value.
pub const ALPHA_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// The most transparent value on the rasterizer's alpha scale, where 0 is fully opaque.
pub const RASTERIZER_ALPHA_MAX: u8 = 127;

/// A rgba color.
///
/// The components are validated on construction and on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename = "color", try_from = "ColorComponents")]
pub struct Color {
    /// Red, ranging [0, 255].
    #[serde(rename = "r")]
    red: u8,
    /// Green, ranging [0, 255].
    #[serde(rename = "g")]
    green: u8,
    /// Blue, ranging [0, 255].
    #[serde(rename = "b")]
    blue: u8,
    /// Alpha, ranging [0.0 (fully transparent), 1.0 (fully opaque)].
    #[serde(rename = "a")]
    alpha: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Fully transparent color with r,g,b set to 0.
    pub const TRANSPARENT: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0.0,
    };

    /// Black color.
    pub const BLACK: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 1.0,
    };

    /// White color.
    pub const WHITE: Self = Self {
        red: 255,
        green: 255,
        blue: 255,
        alpha: 1.0,
    };

    /// A new color from rgba values.
    ///
    /// Fails with [Error::InvalidParameter] if a component is outside of [0, 255] or alpha is outside of [0.0, 1.0].
    pub fn new(red: i32, green: i32, blue: i32, alpha: f64) -> Result<Self> {
        Ok(Self {
            red: validate_channel("red", red)?,
            green: validate_channel("green", green)?,
            blue: validate_channel("blue", blue)?,
            alpha: ensure_in_range("alpha", alpha, ALPHA_RANGE)?,
        })
    }

    /// The red component.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// The green component.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// The blue component.
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// The alpha value.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set the red component. Must be between 0 and 255.
    pub fn set_red(&mut self, red: i32) -> Result<&mut Self> {
        self.red = validate_channel("red", red)?;
        Ok(self)
    }

    /// Set the green component. Must be between 0 and 255.
    pub fn set_green(&mut self, green: i32) -> Result<&mut Self> {
        self.green = validate_channel("green", green)?;
        Ok(self)
    }

    /// Set the blue component. Must be between 0 and 255.
    pub fn set_blue(&mut self, blue: i32) -> Result<&mut Self> {
        self.blue = validate_channel("blue", blue)?;
        Ok(self)
    }

    /// Set the alpha value. Must be between 0.0 and 1.0.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<&mut Self> {
        self.alpha = ensure_in_range("alpha", alpha, ALPHA_RANGE)?;
        Ok(self)
    }

    /// The color with the given red component.
    pub fn with_red(mut self, red: i32) -> Result<Self> {
        self.set_red(red)?;
        Ok(self)
    }

    /// The color with the given green component.
    pub fn with_green(mut self, green: i32) -> Result<Self> {
        self.set_green(green)?;
        Ok(self)
    }

    /// The color with the given blue component.
    pub fn with_blue(mut self, blue: i32) -> Result<Self> {
        self.set_blue(blue)?;
        Ok(self)
    }

    /// The color with the given alpha value.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.set_alpha(alpha)?;
        Ok(self)
    }

    /// The alpha value on the rasterizer's scale, running from 0 (opaque) to [RASTERIZER_ALPHA_MAX] (transparent).
    ///
    /// The fractional part is truncated.
    pub fn rasterizer_alpha(&self) -> u8 {
        let max = f64::from(RASTERIZER_ALPHA_MAX);
        (max - self.alpha * max) as u8
    }

    /// A random color with components sampled uniformly from the given range.
    ///
    /// Alpha is sampled at 1/100 granularity.
    pub fn random<R>(range: &ColorRange, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let red = ensure_bounds("red", range.min_red, range.max_red, CHANNEL_RANGE)?;
        let green = ensure_bounds("green", range.min_green, range.max_green, CHANNEL_RANGE)?;
        let blue = ensure_bounds("blue", range.min_blue, range.max_blue, CHANNEL_RANGE)?;
        let alpha = ensure_bounds("alpha", range.min_alpha, range.max_alpha, ALPHA_RANGE)?;

        Self::new(
            rng.random_range(red),
            rng.random_range(green),
            rng.random_range(blue),
            utils::sample_hundredths(rng, alpha),
        )
    }
}

fn validate_channel(name: &'static str, value: i32) -> Result<u8> {
    ensure_in_range(name, value, CHANNEL_RANGE).map(|v| v as u8)
}

/// Unvalidated components, deserialized before being checked by [Color::new].
#[derive(Debug, Deserialize)]
struct ColorComponents {
    r: i32,
    g: i32,
    b: i32,
    a: f64,
}

impl TryFrom<ColorComponents> for Color {
    type Error = Error;

    fn try_from(c: ColorComponents) -> Result<Self> {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

/// The inclusive ranges a random color is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "color_range")]
pub struct ColorRange {
    /// Minimum red component. Defaults to 0.
    #[serde(rename = "min_red")]
    pub min_red: i32,
    /// Maximum red component. Defaults to 255.
    #[serde(rename = "max_red")]
    pub max_red: i32,
    /// Minimum green component. Defaults to 0.
    #[serde(rename = "min_green")]
    pub min_green: i32,
    /// Maximum green component. Defaults to 255.
    #[serde(rename = "max_green")]
    pub max_green: i32,
    /// Minimum blue component. Defaults to 0.
    #[serde(rename = "min_blue")]
    pub min_blue: i32,
    /// Maximum blue component. Defaults to 255.
    #[serde(rename = "max_blue")]
    pub max_blue: i32,
    /// Minimum alpha value. Defaults to 0.6.
    #[serde(rename = "min_alpha")]
    pub min_alpha: f64,
    /// Maximum alpha value. Defaults to 0.8.
    #[serde(rename = "max_alpha")]
    pub max_alpha: f64,
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            min_red: 0,
            max_red: 255,
            min_green: 0,
            max_green: 255,
            min_blue: 0,
            max_blue: 255,
            min_alpha: 0.6,
            max_alpha: 0.8,
        }
    }
}

impl ColorRange {
    /// A range that only ever yields `color`.
    pub fn exactly(color: Color) -> Self {
        Self {
            min_red: i32::from(color.red),
            max_red: i32::from(color.red),
            min_green: i32::from(color.green),
            max_green: i32::from(color.green),
            min_blue: i32::from(color.blue),
            max_blue: i32::from(color.blue),
            min_alpha: color.alpha,
            max_alpha: color.alpha,
        }
    }
}
