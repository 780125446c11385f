// Imports
use crate::ext::{BezPathExt, ColorExt};
use anyhow::Context;
use core::fmt::Debug;
use imagegen_compose::shapes::Outline;
use imagegen_compose::Color;

/// The raster surface a canvas draws on.
///
/// Shapes are scan-converted without anti-aliasing and composited with source-over blending.
pub(crate) struct Surface {
    pixmap: tiny_skia::Pixmap,
    /// Whether exports keep the alpha channel.
    save_alpha: bool,
}

impl Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("pixmap", &"{.. no debug impl ..}")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("save_alpha", &self.save_alpha)
            .finish()
    }
}

impl Surface {
    /// A new opaque black surface.
    pub(crate) fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            anyhow::anyhow!("creating pixmap with dimensions ({width}, {height}) failed")
        })?;
        pixmap.fill(tiny_skia::Color::BLACK);

        Ok(Self {
            pixmap,
            save_alpha: false,
        })
    }

    /// A solid paint for the color.
    ///
    /// The paint is owned by the caller and released when it goes out of scope, it must not be kept beyond the
    /// operation it was created for.
    pub(crate) fn allocate_paint(color: Color) -> anyhow::Result<tiny_skia::Paint<'static>> {
        let skia_color = color
            .to_skia_color()
            .ok_or_else(|| anyhow::anyhow!("allocating color {color:?} failed"))?;

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(skia_color);
        paint.anti_alias = false;
        Ok(paint)
    }

    pub(crate) fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn save_alpha(&self) -> bool {
        self.save_alpha
    }

    pub(crate) fn set_save_alpha(&mut self, save_alpha: bool) {
        self.save_alpha = save_alpha;
    }

    /// Replaces every pixel with full transparency.
    pub(crate) fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Blends the paint over the whole surface.
    pub(crate) fn fill(&mut self, paint: &tiny_skia::Paint) -> anyhow::Result<()> {
        let rect =
            tiny_skia::Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
                .context("surface bounds are not a valid rect")?;

        self.pixmap
            .fill_rect(rect, paint, tiny_skia::Transform::identity(), None);
        Ok(())
    }

    /// Blends the paint over the area of the outline.
    ///
    /// Returns false if the outline is degenerate and nothing was drawn.
    pub(crate) fn fill_outline(&mut self, outline: &Outline, paint: &tiny_skia::Paint) -> bool {
        let Some(path) = outline.to_bezpath().to_skia_path() else {
            return false;
        };

        self.pixmap.fill_path(
            &path,
            paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
        true
    }

    /// The demultiplied pixel at the given position.
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<tiny_skia::ColorU8> {
        self.pixmap.pixel(x, y).map(|p| p.demultiply())
    }

    /// Copies the surface into an [image::DynamicImage].
    ///
    /// The image is rgba8 if the surface saves alpha, rgb8 otherwise.
    pub(crate) fn to_dynamic_image(&self) -> anyhow::Result<image::DynamicImage> {
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect::<Vec<u8>>();

        let rgba = image::RgbaImage::from_raw(self.width(), self.height(), data)
            .context("creating RgbaImage from surface data failed")?;

        if self.save_alpha {
            Ok(image::DynamicImage::ImageRgba8(rgba))
        } else {
            Ok(image::DynamicImage::ImageRgb8(
                image::DynamicImage::ImageRgba8(rgba).into_rgb8(),
            ))
        }
    }
}
