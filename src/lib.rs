//! Background trimming and fixed-size variant rendering for badge art.
//!
//! A `<base>@full.png` source is cleared of its border-connected background,
//! cropped to its content plus a margin, and rendered centered onto
//! transparent canvases for each configured variant (`<base>@2x.png`,
//! `<base>.png`, `<base>@icon.png` by default). Existing outputs are never
//! rewritten.

mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli, Commands, TrimArgs};
pub use crate::core::{
    processor::ImageProcessor, BackgroundMask, BadgeError, FileOutcome, PixelGrid,
    ProcessingStats, ResizeAlgorithm, Result, TrimConfig, Variant, VariantOutcome,
    DEFAULT_FULL_SIZE, DEFAULT_PADDING, DEFAULT_TOLERANCE, DEFAULT_WHITE_THRESHOLD, SOURCE_SUFFIX,
};
pub use processors::{
    alpha_bbox, border_connected, flood_fill, trim_with_padding, BackgroundClassifier,
    BatchProcessor, BoundingBox, BoundingBoxExtractor, ColorTolerance, Compositor, Compressor,
    Extraction, Loader, NearWhite, Pass, ReferenceColor, Resizer, StripStats, Transparent,
    WhiteStripper,
};
pub use utils::{is_source_image, parse_size, source_base_name, variant_output_path};

pub mod prelude {
    pub use crate::{
        BackgroundClassifier, BatchProcessor, BoundingBoxExtractor, Compositor, ImageProcessor,
        PixelGrid, TrimConfig, Variant, WhiteStripper,
    };
}
