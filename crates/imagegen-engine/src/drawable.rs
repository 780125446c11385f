// Imports
use crate::Canvas;
use imagegen_compose::shapes::ShapeBehaviour;
use imagegen_compose::{Color, Result};

/// Trait for types that can draw themselves on a [Canvas].
pub trait Drawable {
    /// Draw itself with the given color.
    fn draw(&self, canvas: &mut Canvas, color: Color) -> Result<()>;
}

/// Shapes are sized by the canvas geometric mean and placed at a random center,
/// which may lie up to one radius outside of the canvas so that shapes get clipped at the edges.
impl<T> Drawable for T
where
    T: ShapeBehaviour,
{
    fn draw(&self, canvas: &mut Canvas, color: Color) -> Result<()> {
        let radius = canvas.shape_radius(self.ratio());
        let center = canvas.random_center(radius);

        canvas.composite(&self.outline(center, radius as f64), color)
    }
}
