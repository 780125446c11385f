//! Encoders for the monochrome formats the image crate does not provide.
//!
//! Both reduce the image to black and white by thresholding its luma.

// Imports
use std::io::{self, Write};
use std::path::Path;

/// Pixels with a luma below this are considered dark.
const LUMA_THRESHOLD: u8 = 128;
/// Number of bytes per line in the xbm bits array.
const XBM_BYTES_PER_LINE: usize = 12;

/// Encodes as a type 0 (uncompressed, monochrome) WBMP.
///
/// Rows are packed most significant bit first and padded to whole bytes, white is 1 and black is 0.
pub(crate) fn encode_wbmp<W: Write>(image: &image::GrayImage, writer: &mut W) -> io::Result<()> {
    // type 0, fixed header field 0
    writer.write_all(&[0x00, 0x00])?;
    writer.write_all(&wbmp_multibyte_int(image.width()))?;
    writer.write_all(&wbmp_multibyte_int(image.height()))?;

    for row in image.rows() {
        let bits = row.map(|luma| luma.0[0] >= LUMA_THRESHOLD).collect::<Vec<bool>>();
        writer.write_all(&pack_bits(&bits, true))?;
    }
    Ok(())
}

/// Encodes as X11 bitmap C source, using `name` as the identifier prefix.
///
/// Rows are packed least significant bit first and padded to whole bytes, a set bit marks a dark pixel.
pub(crate) fn encode_xbm<W: Write>(
    image: &image::GrayImage,
    name: &str,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "#define {name}_width {}", image.width())?;
    writeln!(writer, "#define {name}_height {}", image.height())?;
    write!(writer, "static unsigned char {name}_bits[] = {{")?;

    let bytes = image
        .rows()
        .flat_map(|row| {
            let bits = row.map(|luma| luma.0[0] < LUMA_THRESHOLD).collect::<Vec<bool>>();
            pack_bits(&bits, false)
        })
        .collect::<Vec<u8>>();

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        if i % XBM_BYTES_PER_LINE == 0 {
            write!(writer, "\n  ")?;
        } else {
            write!(writer, " ")?;
        }
        write!(writer, "0x{byte:02x}")?;
    }
    writeln!(writer, "\n}};")
}

/// A C identifier derived from the file stem of `path`.
pub(crate) fn xbm_identifier(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut identifier = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();

    if identifier.is_empty() {
        identifier = String::from("image");
    } else if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}

/// Packs a row of bits into bytes, padding the last one with zeros.
fn pack_bits(bits: &[bool], msb_first: bool) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk.iter().enumerate().fold(0u8, |byte, (i, &bit)| {
                if !bit {
                    byte
                } else if msb_first {
                    byte | (0x80 >> i)
                } else {
                    byte | (1 << i)
                }
            })
        })
        .collect()
}

/// WBMP multi-byte integer: 7 bits per byte, most significant group first, continuation flag in the high bit.
fn wbmp_multibyte_int(value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7f) as u8];
    let mut rest = value >> 7;

    while rest > 0 {
        bytes.push((rest & 0x7f) as u8 | 0x80);
        rest >>= 7;
    }
    bytes.reverse();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> image::GrayImage {
        image::GrayImage::from_fn(width, height, |x, y| image::Luma([f(x, y)]))
    }

    #[test]
    fn multibyte_ints() {
        assert_eq!(wbmp_multibyte_int(0), vec![0x00]);
        assert_eq!(wbmp_multibyte_int(127), vec![0x7f]);
        assert_eq!(wbmp_multibyte_int(128), vec![0x81, 0x00]);
        assert_eq!(wbmp_multibyte_int(200), vec![0x81, 0x48]);
    }

    #[test]
    fn wbmp_layout() {
        // left half white, right half black, 10 px wide so rows need padding
        let image = gray(10, 2, |x, _| if x < 5 { 255 } else { 0 });
        let mut bytes = Vec::new();
        encode_wbmp(&image, &mut bytes).unwrap();

        assert_eq!(
            bytes,
            vec![0x00, 0x00, 10, 2, 0b1111_1000, 0x00, 0b1111_1000, 0x00]
        );
    }

    #[test]
    fn xbm_layout() {
        // first pixel dark, rest light
        let image = gray(3, 1, |x, _| if x == 0 { 0 } else { 255 });
        let mut bytes = Vec::new();
        encode_xbm(&image, "art", &mut bytes).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "#define art_width 3\n#define art_height 1\nstatic unsigned char art_bits[] = {\n  0x01\n};\n"
        );
    }

    #[test]
    fn xbm_wraps_lines() {
        let image = gray(8, 13, |_, _| 0);
        let mut bytes = Vec::new();
        encode_xbm(&image, "x", &mut bytes).unwrap();
        let source = String::from_utf8(bytes).unwrap();

        assert_eq!(source.matches("0xff").count(), 13);
        assert!(source.contains("0xff,\n  0xff"));
    }

    #[test]
    fn identifiers() {
        assert_eq!(xbm_identifier(Path::new("/tmp/my-art.xbm")), "my_art");
        assert_eq!(xbm_identifier(Path::new("1st.xbm")), "_1st");
        assert_eq!(xbm_identifier(Path::new("/")), "image");
    }
}
