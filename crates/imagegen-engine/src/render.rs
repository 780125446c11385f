// Imports
use crate::codecs;
use anyhow::Context;
use imagegen_compose::utils::ensure_in_range;
use imagegen_compose::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of the temporary files created when rendering without a destination path.
pub(crate) const TEMP_FILE_PREFIX: &str = "img";

/// Image export format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename = "export_format")]
pub enum ExportFormat {
    #[serde(rename = "avif")]
    Avif,
    #[serde(rename = "bmp")]
    Bmp,
    #[serde(rename = "gif")]
    Gif,
    #[serde(rename = "jpeg")]
    Jpeg,
    #[default]
    #[serde(rename = "png")]
    Png,
    #[serde(rename = "wbmp")]
    Wbmp,
    #[serde(rename = "webp")]
    Webp,
    #[serde(rename = "xbm")]
    Xbm,
}

impl ExportFormat {
    /// All formats, including the ones unavailable in this build.
    pub const ALL: [Self; 8] = [
        Self::Avif,
        Self::Bmp,
        Self::Gif,
        Self::Jpeg,
        Self::Png,
        Self::Wbmp,
        Self::Webp,
        Self::Xbm,
    ];

    /// The exact name the format is parsed from.
    pub fn name(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Wbmp => "wbmp",
            Self::Webp => "webp",
            Self::Xbm => "xbm",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Avif => "image/avif",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Wbmp => "image/vnd.wap.wbmp",
            Self::Webp => "image/webp",
            Self::Xbm => "image/xbm",
        }
    }

    /// File extension for the format.
    pub fn file_ext(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            other => other.name(),
        }
    }

    /// Whether the format can be encoded by this build.
    ///
    /// Avif is only available with the `avif` feature.
    pub fn is_available(self) -> bool {
        match self {
            Self::Avif => cfg!(feature = "avif"),
            _ => true,
        }
    }

    pub(crate) fn ensure_available(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::unsupported_format(
                self.name(),
                "support for this format is not compiled in",
            ))
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Parses the exact, case-sensitive format name.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| Error::unsupported_format(s, "unknown format"))
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoder options, forwarded to the formats that support them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "render_options")]
pub struct RenderOptions {
    /// Quality from 0 to 100. Used by jpeg and avif.
    #[serde(rename = "quality")]
    pub quality: Option<u8>,
    /// Compression level from 0 (fastest) to 9 (smallest). Used by png.
    #[serde(rename = "compression")]
    pub compression: Option<u8>,
    /// Encoding speed from 1 (slowest) to 10 (fastest). Used by avif.
    #[serde(rename = "speed")]
    pub speed: Option<u8>,
}

impl RenderOptions {
    pub const JPEG_QUALITY_DEFAULT: u8 = 75;
    pub const AVIF_QUALITY_DEFAULT: u8 = 30;
    pub const AVIF_SPEED_DEFAULT: u8 = 6;

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_compression(mut self, compression: u8) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Checks that the set options are inside their valid ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(quality) = self.quality {
            ensure_in_range("quality", quality, 0..=100)?;
        }
        if let Some(compression) = self.compression {
            ensure_in_range("compression", compression, 0..=9)?;
        }
        if let Some(speed) = self.speed {
            ensure_in_range("speed", speed, 1..=10)?;
        }
        Ok(())
    }

    fn png_compression(&self) -> image::codecs::png::CompressionType {
        use image::codecs::png::CompressionType;

        match self.compression {
            None => CompressionType::Default,
            Some(0..=3) => CompressionType::Fast,
            Some(4..=6) => CompressionType::Default,
            Some(_) => CompressionType::Best,
        }
    }

    fn warn_ignored(&self, format: ExportFormat) {
        let ignored = match format {
            ExportFormat::Avif => [None, self.compression.map(|_| "compression"), None],
            ExportFormat::Jpeg => [
                None,
                self.compression.map(|_| "compression"),
                self.speed.map(|_| "speed"),
            ],
            ExportFormat::Png => [self.quality.map(|_| "quality"), None, self.speed.map(|_| "speed")],
            _ => [
                self.quality.map(|_| "quality"),
                self.compression.map(|_| "compression"),
                self.speed.map(|_| "speed"),
            ],
        };

        for option in ignored.into_iter().flatten() {
            tracing::warn!("option `{option}` is ignored when rendering to {format}");
        }
    }
}

/// Encodes the image into the provided format.
///
/// `name` is the identifier prefix of xbm sources.
pub(crate) fn encode(
    image: &image::DynamicImage,
    format: ExportFormat,
    options: &RenderOptions,
    name: &str,
) -> anyhow::Result<Vec<u8>> {
    use image::codecs::{jpeg::JpegEncoder, png::FilterType, png::PngEncoder};

    options.warn_ignored(format);
    let mut bytes_buf: Cursor<Vec<u8>> = Cursor::new(Vec::new());

    match format {
        #[cfg(feature = "avif")]
        ExportFormat::Avif => {
            image
                .write_with_encoder(image::codecs::avif::AvifEncoder::new_with_speed_quality(
                    &mut bytes_buf,
                    options.speed.unwrap_or(RenderOptions::AVIF_SPEED_DEFAULT),
                    options
                        .quality
                        .unwrap_or(RenderOptions::AVIF_QUALITY_DEFAULT),
                ))
                .context("Encode image to avif failed.")?;
        }
        #[cfg(not(feature = "avif"))]
        ExportFormat::Avif => {
            return Err(anyhow::anyhow!("avif support is not compiled in"));
        }
        ExportFormat::Bmp => {
            image
                .write_to(&mut bytes_buf, image::ImageFormat::Bmp)
                .context("Encode image to bmp failed.")?;
        }
        ExportFormat::Gif => {
            image::DynamicImage::ImageRgba8(image.to_rgba8())
                .write_to(&mut bytes_buf, image::ImageFormat::Gif)
                .context("Encode image to gif failed.")?;
        }
        ExportFormat::Jpeg => {
            // jpeg has no alpha channel
            JpegEncoder::new_with_quality(
                &mut bytes_buf,
                options
                    .quality
                    .unwrap_or(RenderOptions::JPEG_QUALITY_DEFAULT),
            )
            .encode_image(&image.to_rgb8())
            .context("Encode image to jpeg failed.")?;
        }
        ExportFormat::Png => {
            image
                .write_with_encoder(PngEncoder::new_with_quality(
                    &mut bytes_buf,
                    options.png_compression(),
                    FilterType::Adaptive,
                ))
                .context("Encode image to png failed.")?;
        }
        ExportFormat::Wbmp => {
            codecs::encode_wbmp(&image.to_luma8(), &mut bytes_buf)
                .context("Encode image to wbmp failed.")?;
        }
        ExportFormat::Webp => {
            image
                .write_to(&mut bytes_buf, image::ImageFormat::WebP)
                .context("Encode image to webp failed.")?;
        }
        ExportFormat::Xbm => {
            codecs::encode_xbm(&image.to_luma8(), name, &mut bytes_buf)
                .context("Encode image to xbm failed.")?;
        }
    }

    Ok(bytes_buf.into_inner())
}

/// A new temporary file that is kept on disk once it is persisted.
pub(crate) fn create_temp_file() -> anyhow::Result<tempfile::NamedTempFile> {
    tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .tempfile()
        .context("Creating temporary file failed.")
}

/// A rendered image file.
///
/// Deleting the file is up to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    path: PathBuf,
    width: u32,
    height: u32,
    mime_type: &'static str,
}

impl Image {
    pub(crate) fn new(path: PathBuf, width: u32, height: u32, mime_type: &'static str) -> Self {
        Self {
            path,
            width,
            height,
            mime_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Whether the file still exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
            assert_eq!(format.to_string(), format.name());
        }
        assert!(matches!(
            "bogus".parse::<ExportFormat>(),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!("PNG".parse::<ExportFormat>().is_err());
        assert!("jpg".parse::<ExportFormat>().is_err());
        assert!(" png".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn mime_types() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ExportFormat::Wbmp.mime_type(), "image/vnd.wap.wbmp");
        assert_eq!(ExportFormat::Xbm.mime_type(), "image/xbm");
        assert_eq!(ExportFormat::default(), ExportFormat::Png);
        assert_eq!(ExportFormat::Jpeg.file_ext(), "jpg");
    }

    #[test]
    fn avif_availability_follows_feature() {
        assert_eq!(ExportFormat::Avif.is_available(), cfg!(feature = "avif"));
        assert!(ExportFormat::Png.ensure_available().is_ok());
    }

    #[test]
    fn options_validation() {
        assert!(RenderOptions::default().validate().is_ok());
        assert!(RenderOptions::default()
            .with_quality(100)
            .with_compression(9)
            .with_speed(1)
            .validate()
            .is_ok());
        assert!(matches!(
            RenderOptions::default().with_quality(101).validate(),
            Err(Error::InvalidParameter { name: "quality", .. })
        ));
        assert!(RenderOptions::default().with_compression(10).validate().is_err());
        assert!(RenderOptions::default().with_speed(0).validate().is_err());
    }

    #[test]
    fn options_deserialize() {
        let options: RenderOptions = serde_json::from_str(r#"{"quality": 90}"#).unwrap();
        assert_eq!(options, RenderOptions::default().with_quality(90));

        let format: ExportFormat = serde_json::from_str(r#""webp""#).unwrap();
        assert_eq!(format, ExportFormat::Webp);
    }

    #[test]
    fn png_compression_levels() {
        use image::codecs::png::CompressionType;

        let level = |c| RenderOptions::default().with_compression(c).png_compression();
        assert!(matches!(level(0), CompressionType::Fast));
        assert!(matches!(level(5), CompressionType::Default));
        assert!(matches!(level(9), CompressionType::Best));
    }

    #[test]
    fn encode_produces_format_signatures() {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([200, 10, 10]),
        ));
        let options = RenderOptions::default();
        let encoded = |format| encode(&image, format, &options, "test").unwrap();

        assert!(encoded(ExportFormat::Png).starts_with(b"\x89PNG"));
        assert!(encoded(ExportFormat::Jpeg).starts_with(&[0xff, 0xd8]));
        assert!(encoded(ExportFormat::Gif).starts_with(b"GIF8"));
        assert!(encoded(ExportFormat::Bmp).starts_with(b"BM"));
        assert!(encoded(ExportFormat::Webp).starts_with(b"RIFF"));
        assert!(encoded(ExportFormat::Wbmp).starts_with(&[0, 0, 4, 4]));
        assert!(encoded(ExportFormat::Xbm).starts_with(b"#define test_width 4"));
    }
}
