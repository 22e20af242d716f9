//! Custom crosshair image decoding

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Decoded RGBA8 image (straight alpha, row-major)
#[derive(Clone, PartialEq, Eq)]
pub struct CustomImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl CustomImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Decode a PNG or JPEG file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let decoded = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba(width, height, rgba.into_raw()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    /// RGBA8 bytes, four per pixel
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for CustomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs::File;
    use std::io::BufWriter;

    /// Write a small RGBA PNG for tests
    pub(crate) fn write_png(path: &Path, width: u32, height: u32, pixel: [u8; 4]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data: Vec<u8> = pixel.iter().copied().cycle().take((width * height * 4) as usize).collect();
        writer.write_image_data(&data).unwrap();
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        write_png(&path, 3, 2, [10, 20, 30, 40]);

        let image = CustomImage::load(&path).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(&image.pixels()[..4], &[10, 20, 30, 40]);
        assert_eq!(image.pixels().len(), 24);
    }

    #[test]
    fn test_load_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reticle.jpg");
        image::RgbImage::from_pixel(8, 6, image::Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();

        let image = CustomImage::load(&path).unwrap();
        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(image.pixels().len(), 8 * 6 * 4);
        for px in image.pixels().chunks_exact(4) {
            // Lossy, so only roughly the source color, but always opaque
            assert!(px[0].abs_diff(200) <= 8 && px[1].abs_diff(40) <= 8 && px[2].abs_diff(40) <= 8);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(CustomImage::load(Path::new("/nonexistent/crosshair.png")).is_err());
    }

    #[test]
    fn test_load_non_png_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(CustomImage::load(&path).is_err());
    }
}
