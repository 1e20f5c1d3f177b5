//! Decoded frame: one concatenated image as an RGBA8 pixel buffer.
//!
//! Demo frames are LDR (PNG/JPEG), so a single 8-bit format is enough; the
//! buffer is uploaded as-is to an egui texture by the compare view.

use anyhow::Context;
use std::path::Path;

/// One decoded concatenated frame (all channel segments side by side).
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA8, row-major
}

impl Frame {
    /// Decode a frame file into RGBA8.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_decodes_rgba8() {
        let dir = std::env::temp_dir().join("wipeview-frame");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("one.png");
        let img = image::RgbaImage::from_pixel(5, 3, image::Rgba([1, 2, 3, 255]));
        img.save(&path).unwrap();

        let frame = Frame::load(&path).unwrap();
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.pixels().len(), 5 * 3 * 4);
        assert_eq!(&frame.pixels()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = Frame::load(Path::new("/nonexistent/frame.png")).unwrap_err();
        assert!(err.to_string().contains("frame.png"));
    }
}
