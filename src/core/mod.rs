// badgetrim/src/core/mod.rs
mod grid;
pub mod processor;

pub use grid::{BackgroundMask, PixelGrid};

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Suffix carried by source images; no variant may reuse it.
pub const SOURCE_SUFFIX: &str = "@full";

pub const DEFAULT_FULL_SIZE: (u32, u32) = (400, 80);
pub const DEFAULT_PADDING: u32 = 4;
pub const DEFAULT_TOLERANCE: u8 = 24;
pub const DEFAULT_WHITE_THRESHOLD: u8 = 252;

const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// One named output size: `<base><suffix>.png` rendered at `width` x `height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub suffix: String,
    pub width: u32,
    pub height: u32,
}

impl Variant {
    pub fn new(suffix: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            suffix: suffix.into(),
            width,
            height,
        }
    }

    /// Parses `SUFFIX=WxH`, e.g. `@2x=400x80` or `=200x40` for the bare name.
    pub fn parse(value: &str) -> Result<Self> {
        let (suffix, size) = value.split_once('=').ok_or_else(|| {
            BadgeError::InvalidParameter(format!(
                "Variant must look like SUFFIX=WxH, got '{}'",
                value
            ))
        })?;
        let (width, height) = crate::utils::parse_size(size)?;
        Ok(Self::new(suffix.trim(), width, height))
    }
}

#[derive(Debug, Clone)]
pub struct TrimConfig {
    pub padding: u32,
    pub tolerance: u8,
    pub variants: Vec<Variant>,
    pub algorithm: ResizeAlgorithm,
    pub optimize_png: bool,
    pub recursive: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            tolerance: DEFAULT_TOLERANCE,
            variants: Self::default_variants(DEFAULT_FULL_SIZE),
            algorithm: ResizeAlgorithm::Lanczos3,
            optimize_png: false,
            recursive: false,
            output_dir: None,
        }
    }
}

impl TrimConfig {
    /// Full, half and quarter renditions of `full`, truncating odd sizes.
    pub fn default_variants(full: (u32, u32)) -> Vec<Variant> {
        let (w, h) = full;
        vec![
            Variant::new("@2x", w, h),
            Variant::new("", w / 2, h / 2),
            Variant::new("@icon", w / 4, h / 4),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.variants.is_empty() {
            return Err(BadgeError::InvalidParameter(
                "At least one output variant is required".to_string(),
            ));
        }

        // Sources sharing a base name in different folders would collide.
        if self.recursive && self.output_dir.is_some() {
            return Err(BadgeError::InvalidParameter(
                "An output directory cannot be combined with recursive discovery".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if variant.width == 0 || variant.height == 0 {
                return Err(BadgeError::InvalidParameter(format!(
                    "Variant '{}' has a zero dimension ({}x{})",
                    variant.suffix, variant.width, variant.height
                )));
            }

            if variant.width > MAX_DIMENSION || variant.height > MAX_DIMENSION {
                return Err(BadgeError::InvalidParameter(
                    "Dimensions too large (max 100,000 pixels)".to_string(),
                ));
            }

            if variant.suffix == SOURCE_SUFFIX {
                return Err(BadgeError::InvalidParameter(format!(
                    "Variant suffix '{}' would overwrite the source image",
                    SOURCE_SUFFIX
                )));
            }

            if !seen.insert(variant.suffix.as_str()) {
                return Err(BadgeError::InvalidParameter(format!(
                    "Duplicate variant suffix '{}'",
                    variant.suffix
                )));
            }
        }

        Ok(())
    }
}

/// Result of rendering a single variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOutcome {
    Saved {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    SkippedExists {
        path: PathBuf,
    },
}

/// Result of running one source image through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Processed(Vec<VariantOutcome>),
    SkippedEmpty,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub skipped_empty: usize,
    pub variants_saved: usize,
    pub variants_skipped: usize,
    pub errors: Vec<(String, String)>,
}

impl ProcessingStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed(variants) => {
                self.processed_count += 1;
                for variant in variants {
                    match variant {
                        VariantOutcome::Saved { .. } => self.variants_saved += 1,
                        VariantOutcome::SkippedExists { .. } => self.variants_skipped += 1,
                    }
                }
            }
            FileOutcome::SkippedEmpty => self.skipped_empty += 1,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No foreground found in {}", .0.display())]
    EmptyForeground(PathBuf),

    #[error("Pixel ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),
}

pub type Result<T> = std::result::Result<T, BadgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variants_are_full_half_quarter() {
        let variants = TrimConfig::default_variants((400, 80));
        assert_eq!(
            variants,
            vec![
                Variant::new("@2x", 400, 80),
                Variant::new("", 200, 40),
                Variant::new("@icon", 100, 20),
            ]
        );
    }

    #[test]
    fn default_config_validates() {
        assert!(TrimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_source_suffix_and_duplicates() {
        let mut config = TrimConfig::default();
        config.variants.push(Variant::new("@full", 10, 10));
        assert!(config.validate().is_err());

        let mut config = TrimConfig::default();
        config.variants.push(Variant::new("@icon", 10, 10));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_sized_variant() {
        let config = TrimConfig {
            variants: vec![Variant::new("@2x", 0, 80)],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_output_dir_when_recursive() {
        let config = TrimConfig {
            recursive: true,
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TrimConfig {
            recursive: true,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_variant_strings() {
        assert_eq!(Variant::parse("@2x=400x80").unwrap(), Variant::new("@2x", 400, 80));
        assert_eq!(Variant::parse("=200x40").unwrap(), Variant::new("", 200, 40));
        assert!(Variant::parse("@2x").is_err());
        assert!(Variant::parse("@2x=400").is_err());
    }

    #[test]
    fn stats_count_outcomes() {
        let mut stats = ProcessingStats::default();
        stats.record(&FileOutcome::Processed(vec![
            VariantOutcome::Saved {
                path: PathBuf::from("a@2x.png"),
                width: 400,
                height: 80,
            },
            VariantOutcome::SkippedExists {
                path: PathBuf::from("a.png"),
            },
        ]));
        stats.record(&FileOutcome::SkippedEmpty);

        assert_eq!(stats.processed_count, 1);
        assert_eq!(stats.skipped_empty, 1);
        assert_eq!(stats.variants_saved, 1);
        assert_eq!(stats.variants_skipped, 1);
        assert!(!stats.has_errors());
    }
}
