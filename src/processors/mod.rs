// badgetrim/src/processors/mod.rs
mod batch;
mod bbox;
mod classifier;
mod compositor;
mod compressor;
mod fill;
mod loader;
mod resizer;
mod white;

pub use batch::BatchProcessor;
pub use bbox::{alpha_bbox, BoundingBox, BoundingBoxExtractor, Extraction, Pass};
pub use classifier::{BackgroundClassifier, ColorTolerance, NearWhite, ReferenceColor, Transparent};
pub use compositor::{trim_with_padding, Compositor};
pub use compressor::Compressor;
pub use fill::{border_connected, flood_fill};
pub use loader::Loader;
pub use resizer::Resizer;
pub use white::{StripStats, WhiteStripper};
