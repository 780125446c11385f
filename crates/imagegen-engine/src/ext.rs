// Imports
use imagegen_compose::color::RASTERIZER_ALPHA_MAX;
use imagegen_compose::Color;

/// Extension trait for [Color].
pub trait ColorExt {
    /// Converts to a [tiny_skia::Color], going through the rasterizer alpha scale.
    ///
    /// Returns None when the components can't be represented.
    fn to_skia_color(&self) -> Option<tiny_skia::Color>;
}

impl ColorExt for Color {
    fn to_skia_color(&self) -> Option<tiny_skia::Color> {
        let max = f32::from(RASTERIZER_ALPHA_MAX);
        let opacity = (max - f32::from(self.rasterizer_alpha())) / max;

        tiny_skia::Color::from_rgba(
            f32::from(self.red()) / 255.0,
            f32::from(self.green()) / 255.0,
            f32::from(self.blue()) / 255.0,
            opacity,
        )
    }
}

/// Extension trait for [kurbo::BezPath].
pub trait BezPathExt {
    /// Converts to a [tiny_skia::Path].
    ///
    /// Returns None for empty or degenerate paths.
    fn to_skia_path(&self) -> Option<tiny_skia::Path>;
}

impl BezPathExt for kurbo::BezPath {
    fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();

        for el in self.elements() {
            match *el {
                kurbo::PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                kurbo::PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                kurbo::PathEl::QuadTo(p1, p2) => {
                    builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
                }
                kurbo::PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                    p1.x as f32,
                    p1.y as f32,
                    p2.x as f32,
                    p2.y as f32,
                    p3.x as f32,
                    p3.y as f32,
                ),
                kurbo::PathEl::ClosePath => builder.close(),
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn opacity_follows_the_rasterizer_scale() {
        let opaque = Color::new(255, 0, 0, 1.0).unwrap().to_skia_color().unwrap();
        assert_eq!(opaque.alpha(), 1.0);
        assert_eq!(opaque.red(), 1.0);

        let transparent = Color::TRANSPARENT.to_skia_color().unwrap();
        assert_eq!(transparent.alpha(), 0.0);

        // 0.5 truncates to 63 on the 127 scale
        let half = Color::new(0, 0, 0, 0.5).unwrap().to_skia_color().unwrap();
        assert_relative_eq!(half.alpha(), 64.0 / 127.0, epsilon = 1e-6);
    }

    #[test]
    fn bezpath_conversion() {
        let mut path = kurbo::BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 5.0));
        path.close_path();

        let skia_path = path.to_skia_path().unwrap();
        assert_eq!(skia_path.len(), 4);
        assert_eq!(skia_path.bounds().width(), 10.0);
        assert_eq!(skia_path.bounds().height(), 5.0);

        assert!(kurbo::BezPath::new().to_skia_path().is_none());
    }
}
