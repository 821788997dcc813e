// badgetrim/src/processors/classifier.rs
use crate::core::PixelGrid;
use image::Rgba;

/// Decides whether a single pixel belongs to the removable background.
pub trait BackgroundClassifier {
    fn is_background(&self, pixel: &Rgba<u8>) -> bool;
}

impl<F> BackgroundClassifier for F
where
    F: Fn(&Rgba<u8>) -> bool,
{
    fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        self(pixel)
    }
}

/// Fully transparent pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transparent;

impl BackgroundClassifier for Transparent {
    fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        pixel[3] == 0
    }
}

/// Median RGB of the four corner pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceColor(pub [u8; 3]);

impl ReferenceColor {
    pub fn from_corners(grid: &PixelGrid) -> Option<Self> {
        let (w, h) = grid.dimensions();
        if w == 0 || h == 0 {
            return None;
        }

        let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
        let mut samples = [[0u8; 4]; 3];
        for (i, (x, y)) in corners.into_iter().enumerate() {
            let pixel = grid.get(x, y).ok()?;
            for c in 0..3 {
                samples[c][i] = pixel[c];
            }
        }

        let mut rgb = [0u8; 3];
        for (c, channel) in samples.iter_mut().enumerate() {
            channel.sort_unstable();
            // Even count: mean of the middle pair, truncated.
            rgb[c] = ((u16::from(channel[1]) + u16::from(channel[2])) / 2) as u8;
        }

        Some(Self(rgb))
    }
}

/// Opaque-ish pixels within `tolerance` of `reference` on every RGB channel.
#[derive(Debug, Clone, Copy)]
pub struct ColorTolerance {
    pub reference: ReferenceColor,
    pub tolerance: u8,
}

impl ColorTolerance {
    pub fn new(reference: ReferenceColor, tolerance: u8) -> Self {
        Self {
            reference,
            tolerance,
        }
    }
}

impl BackgroundClassifier for ColorTolerance {
    fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        if pixel[3] == 0 {
            return false;
        }

        self.reference
            .0
            .iter()
            .zip(pixel.0.iter())
            .all(|(&r, &p)| r.abs_diff(p) <= self.tolerance)
    }
}

/// Non-transparent pixels whose RGB channels are all at least `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct NearWhite {
    pub threshold: u8,
}

impl NearWhite {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl BackgroundClassifier for NearWhite {
    fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        pixel[3] != 0 && pixel.0[..3].iter().all(|&c| c >= self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn reference_is_median_of_corners() {
        let mut image = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 0, Rgba([250, 10, 100, 255]));
        image.put_pixel(3, 0, Rgba([252, 20, 100, 255]));
        image.put_pixel(0, 2, Rgba([255, 30, 101, 255]));
        image.put_pixel(3, 2, Rgba([0, 40, 200, 255]));

        let reference = ReferenceColor::from_corners(&PixelGrid::from(image)).unwrap();
        assert_eq!(reference, ReferenceColor([251, 25, 100]));
    }

    #[test]
    fn reference_of_empty_grid_is_none() {
        let grid = PixelGrid::from(RgbaImage::new(0, 0));
        assert!(ReferenceColor::from_corners(&grid).is_none());
    }

    #[test]
    fn tolerance_is_inclusive_per_channel() {
        let classifier = ColorTolerance::new(ReferenceColor([100, 100, 100]), 24);
        assert!(classifier.is_background(&Rgba([124, 76, 100, 255])));
        assert!(!classifier.is_background(&Rgba([125, 100, 100, 255])));
        assert!(!classifier.is_background(&Rgba([100, 100, 75, 255])));
    }

    #[test]
    fn transparent_pixels_are_never_color_background() {
        let tolerance = ColorTolerance::new(ReferenceColor([255, 255, 255]), 24);
        let white = NearWhite::new(252);
        let clear_white = Rgba([255, 255, 255, 0]);

        assert!(!tolerance.is_background(&clear_white));
        assert!(!white.is_background(&clear_white));
        assert!(Transparent.is_background(&clear_white));
    }

    #[test]
    fn swapping_in_tolerance_channels_keeps_classification() {
        let classifier = ColorTolerance::new(ReferenceColor([120, 120, 40]), 10);
        let pixel = Rgba([115, 128, 200, 255]);
        let swapped = Rgba([128, 115, 200, 255]);
        assert_eq!(
            classifier.is_background(&pixel),
            classifier.is_background(&swapped)
        );

        let near = Rgba([115, 128, 45, 255]);
        let near_swapped = Rgba([128, 115, 45, 255]);
        assert!(classifier.is_background(&near));
        assert!(classifier.is_background(&near_swapped));
    }

    #[test]
    fn near_white_requires_every_channel() {
        let classifier = NearWhite::new(252);
        assert!(classifier.is_background(&Rgba([252, 255, 253, 10])));
        assert!(!classifier.is_background(&Rgba([251, 255, 255, 255])));
    }

    #[test]
    fn closures_are_classifiers() {
        let dark = |p: &Rgba<u8>| p[0] < 10;
        assert!(dark.is_background(&Rgba([0, 200, 200, 255])));
        assert!(!dark.is_background(&Rgba([50, 0, 0, 255])));
    }
}
