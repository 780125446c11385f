// Imports
use crate::render::{self, ExportFormat, Image, RenderOptions};
use crate::surface::Surface;
use crate::{codecs, Drawable};
use anyhow::Context;
use imagegen_compose::shapes::Outline;
use imagegen_compose::utils;
use imagegen_compose::{Color, Error, Result};
use rand::Rng;
use std::path::Path;

/// A fixed-size raster canvas that shapes are drawn on.
///
/// Freshly created canvases are opaque black. Shapes are placed with the canvas-owned random number generator,
/// so canvases created with the same seed and fed the same calls end up with identical pixels.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    surface: Surface,
    rng: rand_pcg::Pcg64,
}

impl Canvas {
    /// A new canvas with the given dimensions in pixels. Both must be greater than zero.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::build(width, height, None)
    }

    /// A new canvas whose shape placement is seeded for reproducible output.
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self> {
        Self::build(width, height, Some(seed))
    }

    fn build(width: i32, height: i32, seed: Option<u64>) -> Result<Self> {
        let width = dimension("width", width)?;
        let height = dimension("height", height)?;
        let surface = Surface::new(width, height)
            .with_context(|| format!("allocating canvas surface of size {width}x{height} failed"))?;

        tracing::debug!("created canvas of size {width}x{height}, seed: {seed:?}");
        Ok(Self {
            width,
            height,
            surface,
            rng: utils::new_rng_default_pcg64(seed),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The square root of the area, the reference length that shape ratios are relative to.
    pub fn geometric_mean(&self) -> f64 {
        (f64::from(self.width) * f64::from(self.height)).sqrt()
    }

    /// The random number generator used for shape placement.
    ///
    /// Can be used to sample shapes and colors so that the whole image derives from a single seed.
    pub fn rng_mut(&mut self) -> &mut rand_pcg::Pcg64 {
        &mut self.rng
    }

    /// The radius of a shape with the given size ratio, truncated to whole pixels.
    pub(crate) fn shape_radius(&self, ratio: f64) -> i64 {
        (ratio * self.geometric_mean() / 2.0) as i64
    }

    /// A random shape center in whole pixels, lying up to `radius` outside of the canvas bounds.
    pub(crate) fn random_center(&mut self, radius: i64) -> kurbo::Point {
        let x = self
            .rng
            .random_range(-radius..=i64::from(self.width) + radius);
        let y = self
            .rng
            .random_range(-radius..=i64::from(self.height) + radius);

        kurbo::Point::new(x as f64, y as f64)
    }

    /// Blends the color over the area of the outline.
    pub(crate) fn composite(&mut self, outline: &Outline, color: Color) -> Result<()> {
        let paint = Surface::allocate_paint(color)?;

        if !self.surface.fill_outline(outline, &paint) {
            tracing::trace!("outline {outline:?} is degenerate, nothing drawn");
        }
        Ok(())
    }

    /// Replaces every pixel with full transparency and keeps the alpha channel in exports.
    ///
    /// Everything drawn before is erased, so this should be called first.
    pub fn enable_transparency(&mut self) -> &mut Self {
        self.surface.clear();
        self.surface.set_save_alpha(true);

        tracing::debug!("enabled canvas transparency");
        self
    }

    /// Blends the color over the whole canvas.
    pub fn fill(&mut self, color: Color) -> Result<&mut Self> {
        let paint = Surface::allocate_paint(color)?;
        self.surface.fill(&paint)?;

        tracing::trace!("filled canvas with {color:?}");
        Ok(self)
    }

    /// Draws the shape with the given color.
    pub fn draw<D>(&mut self, drawable: &D, color: Color) -> Result<&mut Self>
    where
        D: Drawable + ?Sized,
    {
        drawable.draw(self, color)?;
        Ok(self)
    }

    /// Renders the canvas to an image file.
    ///
    /// `format` is one of the exact names `avif`, `bmp`, `gif`, `jpeg`, `png`, `wbmp`, `webp` or `xbm`.
    /// Without a path, the image is written to a new temporary file that is not deleted automatically.
    pub fn render(
        &self,
        path: Option<&Path>,
        format: &str,
        options: &RenderOptions,
    ) -> Result<Image> {
        let format = format.parse::<ExportFormat>()?;
        self.render_as(path, format, options)
    }

    /// Renders the canvas to an image file of the given format.
    ///
    /// Nothing is written when the format is unavailable or the options are invalid.
    pub fn render_as(
        &self,
        path: Option<&Path>,
        format: ExportFormat,
        options: &RenderOptions,
    ) -> Result<Image> {
        format.ensure_available()?;
        options.validate()?;

        let image = self.surface.to_dynamic_image()?;
        let (path, temp_file) = match path {
            Some(path) => (path.to_path_buf(), None),
            None => {
                let temp_file = render::create_temp_file()?;
                (temp_file.path().to_path_buf(), Some(temp_file))
            }
        };

        let bytes = render::encode(&image, format, options, &codecs::xbm_identifier(&path))?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("writing image to `{}` failed", path.display()))?;
        if let Some(temp_file) = temp_file {
            temp_file
                .keep()
                .context("persisting temporary image file failed")?;
        }

        tracing::debug!("rendered canvas as {format} to `{}`", path.display());
        Ok(Image::new(
            path,
            self.width,
            self.height,
            format.mime_type(),
        ))
    }
}

fn dimension(name: &'static str, value: i32) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::invalid_parameter(name, format!("{value} must be greater than 0")))
}
