// badgetrim/src/core/processor.rs
use super::{BadgeError, FileOutcome, Result, TrimConfig, VariantOutcome};
use crate::processors::{trim_with_padding, BoundingBoxExtractor, Compositor, Compressor, Loader};
use crate::utils::variant_output_path;
use image::RgbaImage;
use std::path::Path;

/// Runs one `<base>@full.png` through trim and variant rendering.
pub struct ImageProcessor {
    config: TrimConfig,
    loader: Loader,
    extractor: BoundingBoxExtractor,
    compositor: Compositor,
    compressor: Compressor,
}

impl ImageProcessor {
    pub fn new(config: TrimConfig) -> Self {
        let extractor = BoundingBoxExtractor::new(config.tolerance);
        let compositor = Compositor::new(config.algorithm);
        let compressor = Compressor::new().with_png_optimization(config.optimize_png);

        Self {
            config,
            loader: Loader::new(),
            extractor,
            compositor,
            compressor,
        }
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    pub fn process(&self, input_path: &Path) -> Result<FileOutcome> {
        let trimmed = match self.trim(input_path) {
            Ok(trimmed) => trimmed,
            Err(BadgeError::EmptyForeground(_)) => {
                log::info!("Skipped (empty): {}", input_path.display());
                return Ok(FileOutcome::SkippedEmpty);
            }
            Err(e) => return Err(e),
        };

        let output_dir = match &self.config.output_dir {
            Some(dir) => dir.as_path(),
            None => input_path.parent().unwrap_or_else(|| Path::new(".")),
        };

        let mut outcomes = Vec::with_capacity(self.config.variants.len());
        for variant in &self.config.variants {
            let out_path = variant_output_path(input_path, output_dir, &variant.suffix)?;

            if out_path.exists() {
                log::info!("Skip exists: {}", out_path.display());
                outcomes.push(VariantOutcome::SkippedExists { path: out_path });
                continue;
            }

            let rendered = self
                .compositor
                .resize_and_center(&trimmed, (variant.width, variant.height));

            if self.compressor.save_new(&rendered, &out_path)? {
                log::info!(
                    "Saved: {} ({}x{})",
                    out_path.display(),
                    variant.width,
                    variant.height
                );
                outcomes.push(VariantOutcome::Saved {
                    path: out_path,
                    width: variant.width,
                    height: variant.height,
                });
            } else {
                log::info!("Skip exists: {}", out_path.display());
                outcomes.push(VariantOutcome::SkippedExists { path: out_path });
            }
        }

        Ok(FileOutcome::Processed(outcomes))
    }

    /// Loads `input_path` and returns its background-free content plus padding.
    pub fn trim(&self, input_path: &Path) -> Result<RgbaImage> {
        let grid = self.loader.load(input_path)?;
        let extraction = self.extractor.extract(grid, Some(input_path))?;

        log::debug!(
            "{}: content {:?} via {:?} pass",
            input_path.display(),
            extraction.bbox,
            extraction.pass
        );

        Ok(trim_with_padding(
            &extraction.grid,
            extraction.bbox,
            self.config.padding,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variant;
    use image::Rgba;

    fn write_badge(dir: &Path, name: &str) -> std::path::PathBuf {
        let mut image = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        for y in 8..12 {
            for x in 10..30 {
                image.put_pixel(x, y, Rgba([0, 0, 160, 255]));
            }
        }
        let path = dir.join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn trim_wraps_content_with_padding() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_badge(dir.path(), "bar@full.png");

        let processor = ImageProcessor::new(TrimConfig {
            padding: 2,
            ..Default::default()
        });
        let trimmed = processor.trim(&path).unwrap();

        assert_eq!(trimmed.dimensions(), (24, 8));
        assert_eq!(trimmed.get_pixel(0, 0)[3], 0);
        assert_eq!(*trimmed.get_pixel(2, 2), Rgba([0, 0, 160, 255]));
    }

    #[test]
    fn writes_into_configured_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let path = write_badge(dir.path(), "bar@full.png");

        let processor = ImageProcessor::new(TrimConfig {
            variants: vec![Variant::new("@small", 20, 10)],
            output_dir: Some(out.path().to_path_buf()),
            ..Default::default()
        });

        let outcome = processor.process(&path).unwrap();
        let expected = out.path().join("bar@small.png");
        assert_eq!(
            outcome,
            FileOutcome::Processed(vec![VariantOutcome::Saved {
                path: expected.clone(),
                width: 20,
                height: 10,
            }])
        );
        assert_eq!(image::open(&expected).unwrap().to_rgba8().dimensions(), (20, 10));
    }
}
