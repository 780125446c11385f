/// The filled area of a shape, ready for the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// A filled disk.
    Disk(kurbo::Circle),
    /// A filled polygon, vertices in drawing order.
    Polygon(Vec<kurbo::Point>),
}

impl Outline {
    /// The outline as a closed bezier path.
    pub fn to_bezpath(&self) -> kurbo::BezPath {
        match self {
            Self::Disk(circle) => kurbo::Shape::to_path(circle, 0.1),
            Self::Polygon(vertices) => {
                let mut path = kurbo::BezPath::new();
                let mut vertices = vertices.iter();

                if let Some(first) = vertices.next() {
                    path.move_to(*first);
                    for vertex in vertices {
                        path.line_to(*vertex);
                    }
                    path.close_path();
                }
                path
            }
        }
    }
}
