// badgetrim/src/processors/compositor.rs
use super::bbox::BoundingBox;
use super::resizer::Resizer;
use crate::core::{PixelGrid, ResizeAlgorithm};
use image::{imageops, Rgba, RgbaImage};

/// Crops `grid` to `bbox` grown by `padding`, clamped to the image edges.
pub fn trim_with_padding(grid: &PixelGrid, bbox: BoundingBox, padding: u32) -> RgbaImage {
    let (width, height) = grid.dimensions();
    let region = bbox.pad(padding, width, height);

    log::debug!(
        "Trimming {}x{} to {:?} ({}x{})",
        width,
        height,
        region,
        region.width(),
        region.height()
    );

    imageops::crop_imm(
        grid.as_image(),
        region.left,
        region.top,
        region.width(),
        region.height(),
    )
    .to_image()
}

pub struct Compositor {
    resizer: Resizer,
}

impl Compositor {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self {
            resizer: Resizer::new(algorithm),
        }
    }

    /// Scales `source` to fit `target` without distortion and centers it on a
    /// transparent canvas of exactly `target`.
    pub fn resize_and_center(&self, source: &RgbaImage, target: (u32, u32)) -> RgbaImage {
        let (target_w, target_h) = target;
        let (new_w, new_h) = Resizer::fit_dimensions(source.dimensions(), target);
        let resized = self.resizer.resize_exact(source, new_w, new_h);

        let mut canvas = RgbaImage::from_pixel(target_w, target_h, Rgba([0, 0, 0, 0]));
        let offset_x = (target_w - new_w) / 2;
        let offset_y = (target_h - new_h) / 2;

        // Alpha-composited so transparent source pixels leave the canvas clear.
        imageops::overlay(&mut canvas, &resized, i64::from(offset_x), i64::from(offset_y));
        canvas
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3)
    }
}
