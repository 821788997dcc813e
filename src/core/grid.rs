// badgetrim/src/core/grid.rs
use super::{BadgeError, Result};
use image::{Rgba, RgbaImage};

/// RGBA8 raster with bounds-checked pixel access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    image: RgbaImage,
}

impl PixelGrid {
    /// Wraps raw interleaved RGBA bytes, row-major.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(BadgeError::InvalidParameter(format!(
                "Pixel buffer holds {} bytes, {}x{} RGBA needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }

        RgbaImage::from_raw(width, height, data)
            .map(Self::from)
            .ok_or_else(|| BadgeError::ProcessingError("Pixel buffer rejected".to_string()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Rgba<u8>> {
        self.check(x, y)?;
        Ok(*self.image.get_pixel(x, y))
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba<u8>) -> Result<()> {
        self.check(x, y)?;
        self.image.put_pixel(x, y, pixel);
        Ok(())
    }

    /// Clears every pixel flagged in `mask` to fully transparent black.
    pub fn apply_mask(&mut self, mask: &BackgroundMask) -> Result<()> {
        if mask.dimensions() != self.dimensions() {
            let (mw, mh) = mask.dimensions();
            return Err(BadgeError::InvalidParameter(format!(
                "Mask is {}x{} but image is {}x{}",
                mw,
                mh,
                self.width(),
                self.height()
            )));
        }

        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            if mask.is_set(x, y) {
                *pixel = Rgba([0, 0, 0, 0]);
            }
        }

        Ok(())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn check(&self, x: u32, y: u32) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(BadgeError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

/// Per-pixel background flags, same dimensions as the grid it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BackgroundMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Out-of-range coordinates read as not background.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.index(x, y).map(|i| self.bits[i]).unwrap_or(false)
    }

    pub(crate) fn mark(&mut self, x: u32, y: u32) {
        if let Some(i) = self.index(x, y) {
            self.bits[i] = true;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        assert!(PixelGrid::from_raw(2, 2, vec![0; 15]).is_err());
        assert!(PixelGrid::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = PixelGrid::from_raw(3, 2, vec![0; 24]).unwrap();
        grid.set(2, 1, Rgba([1, 2, 3, 4])).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), Rgba([1, 2, 3, 4]));

        assert!(matches!(
            grid.get(3, 0),
            Err(BadgeError::OutOfBounds { x: 3, y: 0, width: 3, height: 2 })
        ));
        assert!(matches!(
            grid.set(0, 2, Rgba([0, 0, 0, 0])),
            Err(BadgeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn apply_mask_clears_flagged_pixels() {
        let mut grid = PixelGrid::from(RgbaImage::from_pixel(2, 1, Rgba([9, 9, 9, 255])));
        let mut mask = BackgroundMask::new(2, 1);
        mask.mark(1, 0);

        grid.apply_mask(&mask).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Rgba([9, 9, 9, 255]));
        assert_eq!(grid.get(1, 0).unwrap(), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn apply_mask_rejects_mismatched_size() {
        let mut grid = PixelGrid::from(RgbaImage::new(2, 2));
        assert!(grid.apply_mask(&BackgroundMask::new(3, 2)).is_err());
    }
}
