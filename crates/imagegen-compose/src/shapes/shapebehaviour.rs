// Imports
use super::Outline;
use crate::Result;

/// Types that behave as a shape.
///
/// Shapes are sized by a ratio relative to the geometric mean of the canvas they are drawn on,
/// the canvas decides the actual radius and center.
pub trait ShapeBehaviour {
    /// The size ratio, ranging [0.0, 1.0].
    fn ratio(&self) -> f64;
    /// Set the size ratio. Fails if it is outside of [0.0, 1.0].
    fn set_ratio(&mut self, ratio: f64) -> Result<()>;
    /// The filled outline for the given center and radius in pixels.
    fn outline(&self, center: kurbo::Point, radius: f64) -> Outline;
}
