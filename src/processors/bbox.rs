// badgetrim/src/processors/bbox.rs
use super::classifier::{ColorTolerance, ReferenceColor};
use super::fill::border_connected;
use crate::core::{BadgeError, PixelGrid, Result, DEFAULT_TOLERANCE};
use std::path::{Path, PathBuf};

/// Pixel rectangle with exclusive `right`/`bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn covers(&self, width: u32, height: u32) -> bool {
        *self == Self::new(0, 0, width, height)
    }

    /// Grows the box by `padding` on every side, clamped to the image.
    pub fn pad(&self, padding: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(padding),
            top: self.top.saturating_sub(padding),
            right: self.right.saturating_add(padding).min(width),
            bottom: self.bottom.saturating_add(padding).min(height),
        }
    }
}

/// Tight box around every pixel with non-zero alpha.
pub fn alpha_bbox(grid: &PixelGrid) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for (x, y, pixel) in grid.as_image().enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }

        bounds = Some(match bounds {
            None => BoundingBox::new(x, y, x + 1, y + 1),
            Some(b) => BoundingBox::new(
                b.left.min(x),
                b.top.min(y),
                b.right.max(x + 1),
                b.bottom.max(y + 1),
            ),
        });
    }

    bounds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// The image already carried usable transparency.
    Alpha,
    /// Opaque image; background was removed by corner-color flood fill.
    ColorFill,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub bbox: BoundingBox,
    pub pass: Pass,
    /// Image the box refers to; background-cleared after a color fill.
    pub grid: PixelGrid,
}

#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxExtractor {
    tolerance: u8,
}

impl BoundingBoxExtractor {
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    /// Finds the content box of `grid`.
    ///
    /// An alpha box smaller than the canvas is taken as-is. A missing or
    /// full-canvas alpha box means there is no transparency to trim by, so
    /// the border-connected region matching the corner color is cleared and
    /// the alpha box recomputed. `source` only labels the empty-image error.
    pub fn extract(&self, grid: PixelGrid, source: Option<&Path>) -> Result<Extraction> {
        let (width, height) = grid.dimensions();

        if let Some(bbox) = alpha_bbox(&grid) {
            if !bbox.covers(width, height) {
                log::debug!("Alpha bounding box {:?} within {}x{}", bbox, width, height);
                return Ok(Extraction {
                    bbox,
                    pass: Pass::Alpha,
                    grid,
                });
            }
        }

        let empty = || {
            BadgeError::EmptyForeground(source.map(PathBuf::from).unwrap_or_default())
        };

        let reference = ReferenceColor::from_corners(&grid).ok_or_else(empty)?;
        log::debug!(
            "Opaque canvas, clearing background near {:?} (tolerance {})",
            reference.0,
            self.tolerance
        );

        let mask = border_connected(&grid, &ColorTolerance::new(reference, self.tolerance));
        let mut cleared = grid;
        cleared.apply_mask(&mask)?;

        let bbox = alpha_bbox(&cleared).ok_or_else(empty)?;
        Ok(Extraction {
            bbox,
            pass: Pass::ColorFill,
            grid: cleared,
        })
    }
}

impl Default for BoundingBoxExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
