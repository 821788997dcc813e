// badgetrim/src/processors/loader.rs
use crate::core::{BadgeError, PixelGrid, Result};
use image::{GenericImageView, ImageReader};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    /// Reads any supported file and converts it to RGBA8.
    pub fn load(&self, path: &Path) -> Result<PixelGrid> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let decode_error = |e: image::ImageError| BadgeError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(decode_error)?;

        let (width, height) = image.dimensions();
        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(BadgeError::InvalidParameter(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::debug!(
            "Loaded image: {}x{} pixels, format: {:?}",
            width,
            height,
            image.color()
        );

        Ok(PixelGrid::from(image.to_rgba8()))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(BadgeError::Decode {
                path: path.to_path_buf(),
                message: "file is empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken@full.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            Loader::new().load(&path),
            Err(BadgeError::Decode { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Loader::new().load(&dir.path().join("nope.png")),
            Err(BadgeError::Io(_))
        ));
    }

    #[test]
    fn rgb_input_becomes_opaque_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        RgbImage::from_pixel(3, 2, Rgb([5, 6, 7])).save(&path).unwrap();

        let grid = Loader::new().load(&path).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.get(2, 1).unwrap().0, [5, 6, 7, 255]);
    }

    #[test]
    fn enforces_dimension_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        RgbImage::new(8, 8).save(&path).unwrap();

        let result = Loader::new().with_max_dimensions(4, 4).load(&path);
        assert!(matches!(result, Err(BadgeError::InvalidParameter(_))));
    }
}
