// Modules
mod circle;
mod outline;
mod polygon;
mod shape;
mod shapebehaviour;
mod star;

// Re-exports
pub use circle::{Circle, CircleRange};
pub use outline::Outline;
pub use polygon::{Polygon, PolygonRange};
pub use shape::{Shape, ShapeRange};
pub use shapebehaviour::ShapeBehaviour;
pub use star::{Star, StarRange};

// Imports
use std::ops::RangeInclusive;

/// The valid range of a shape size ratio.
pub const RATIO_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// The valid range of a rotation angle in degrees.
pub const ROTATION_RANGE: RangeInclusive<u32> = 0..=360;

/// The default minimum size ratio of randomly generated shapes.
const DEFAULT_MIN_RATIO: f64 = 0.125;
/// The default maximum size ratio of randomly generated shapes.
const DEFAULT_MAX_RATIO: f64 = 0.25;

/// Vertices evenly spaced around `center`, starting at `rotation` degrees.
///
/// `distance` maps the vertex index to its distance from the center.
fn ring_vertices(
    center: kurbo::Point,
    rotation: u32,
    count: u32,
    distance: impl Fn(u32) -> f64,
) -> Vec<kurbo::Point> {
    let step = 360.0 / f64::from(count);

    (0..count)
        .map(|i| {
            let angle = (f64::from(rotation) + step * f64::from(i)).to_radians();
            let distance = distance(i);
            kurbo::Point::new(
                center.x + distance * angle.cos(),
                center.y + distance * angle.sin(),
            )
        })
        .collect()
}
