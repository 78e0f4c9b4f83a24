use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::io::writers::atomic::write_atomically;

fn check_buffer(width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let expected = width as u64 * height as u64 * 4;
    if pixels.len() as u64 != expected {
        return Err(Error::Processing(format!(
            "RGBA buffer of {} bytes does not match {}x{} ({} bytes)",
            pixels.len(),
            width,
            height,
            expected
        )));
    }
    Ok(())
}

/// Encode straight-alpha RGBA8 `pixels` as PNG.
pub fn encode_rgba_png(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    check_buffer(width, height, pixels)?;
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(pixels, width, height, ExtendedColorType::Rgba8)?;
    Ok(bytes)
}

/// Write `pixels` as a PNG at `output`, replacing any existing file.
///
/// The image goes to a temporary file in the destination directory first and is
/// renamed over `output` only once fully written, so `output` is never left
/// truncated.
pub fn write_rgba_png(output: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    check_buffer(width, height, pixels)?;
    write_atomically(output, |w| {
        PngEncoder::new(w).write_image(pixels, width, height, ExtendedColorType::Rgba8)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("px.png");
        let pixels = [255, 0, 0, 255, 0, 0, 255, 128];
        write_rgba_png(&out, 2, 1, &pixels).unwrap();

        let decoded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 128]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nope").join("px.png");
        let err = write_rgba_png(&out, 1, 1, &[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::Write { path, .. } if path == out));
    }

    #[test]
    fn rejected_buffer_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("keep.png");
        std::fs::write(&out, b"previous").unwrap();

        // Buffer too short for the declared dimensions.
        assert!(write_rgba_png(&out, 4, 4, &[0; 8]).is_err());
        assert_eq!(std::fs::read(&out).unwrap(), b"previous");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn in_memory_encoding_matches_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("same.png");
        let pixels = [10, 20, 30, 255];
        write_rgba_png(&out, 1, 1, &pixels).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), encode_rgba_png(1, 1, &pixels).unwrap());
    }
}
