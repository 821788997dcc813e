// badgetrim/src/processors/resizer.rs
use crate::core::ResizeAlgorithm;
use image::{imageops, imageops::FilterType, Rgba, Rgba32FImage, RgbaImage};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn resize_exact(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        let premultiplied = premultiply(image);
        let resized = imageops::resize(&premultiplied, width, height, self.filter_type());
        unpremultiply(&resized)
    }

    /// Largest size with the source aspect ratio that fits inside the target.
    ///
    /// Uses a single scale `min(tw/sw, th/sh)`; the bound axis lands exactly on
    /// the target and the other is floored. Neither side drops below 1.
    pub fn fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
        let (sw, sh) = (u64::from(source.0.max(1)), u64::from(source.1.max(1)));
        let (tw, th) = (u64::from(target.0), u64::from(target.1));

        let (w, h) = if tw * sh <= th * sw {
            (tw, sh * tw / sw)
        } else {
            (sw * th / sh, th)
        };

        (clamp_dimension(w), clamp_dimension(h))
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3)
    }
}

// Filtering straight RGBA bleeds the color of clear pixels into edges.
fn premultiply(image: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        Rgba([
            f32::from(r) / 255.0 * alpha,
            f32::from(g) / 255.0 * alpha,
            f32::from(b) / 255.0 * alpha,
            alpha,
        ])
    })
}

fn unpremultiply(image: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = to_channel(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_channel(r / a), to_channel(g / a), to_channel(b / a), alpha])
    })
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn clamp_dimension(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX).max(1)
}
