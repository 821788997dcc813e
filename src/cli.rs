// badgetrim/src/cli.rs
use crate::core::{
    ResizeAlgorithm, TrimConfig, Variant, DEFAULT_PADDING, DEFAULT_TOLERANCE, DEFAULT_WHITE_THRESHOLD,
};
use crate::utils::parse_size;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "badgetrim", version, about = "Trim badge art and render fixed-size PNG variants")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trim every <base>@full.png in a directory and write its variants
    Batch {
        /// Directory holding the @full.png sources
        #[arg(default_value = ".")]
        input: PathBuf,

        /// Number of worker threads (0 = one per CPU)
        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Trim a single <base>@full.png and write its variants
    Trim {
        input: PathBuf,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Clear border-connected near-white background from PNGs in place
    StripWhite {
        #[arg(default_value = ".")]
        input: PathBuf,

        /// Minimum value of every RGB channel for a pixel to count as white
        #[arg(short, long, default_value_t = DEFAULT_WHITE_THRESHOLD)]
        threshold: u8,

        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,

        #[arg(short, long)]
        recursive: bool,

        /// Recompress written PNGs with oxipng
        #[arg(long)]
        optimize: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TrimArgs {
    /// Full-size variant as WxH; half and quarter sizes derive from it
    #[arg(short, long, default_value = "400x80", value_parser = parse_size_arg)]
    pub size: (u32, u32),

    /// Explicit variant SUFFIX=WxH (repeatable); replaces the derived set
    #[arg(long = "variant", value_parser = parse_variant_arg)]
    pub variants: Vec<Variant>,

    /// Transparent margin kept around the content, in pixels
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    pub padding: u32,

    /// Per-channel distance from the corner color still treated as background
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u8,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Recompress written PNGs with oxipng
    #[arg(long)]
    pub optimize: bool,

    /// Write variants here instead of next to each source (not with --recursive)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TrimArgs {
    pub fn to_config(&self, recursive: bool) -> TrimConfig {
        let variants = if self.variants.is_empty() {
            TrimConfig::default_variants(self.size)
        } else {
            self.variants.clone()
        };

        TrimConfig {
            padding: self.padding,
            tolerance: self.tolerance,
            variants,
            algorithm: self.algorithm.into(),
            optimize_png: self.optimize,
            recursive,
            output_dir: self.output.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

fn parse_size_arg(value: &str) -> Result<(u32, u32), String> {
    parse_size(value).map_err(|e| e.to_string())
}

fn parse_variant_arg(value: &str) -> Result<Variant, String> {
    Variant::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn batch_defaults_match_badge_layout() {
        let cli = Cli::parse_from(["badgetrim", "batch", "art"]);
        let Commands::Batch { input, trim, .. } = cli.command else {
            panic!("expected batch");
        };

        assert_eq!(input, PathBuf::from("art"));
        let config = trim.to_config(false);
        assert_eq!(config.variants, TrimConfig::default().variants);
        assert_eq!(config.padding, 4);
        assert_eq!(config.tolerance, 24);
    }

    #[test]
    fn explicit_variants_replace_derived_set() {
        let cli = Cli::parse_from([
            "badgetrim",
            "trim",
            "gold@full.png",
            "--variant",
            "@2x=256x256",
            "--variant",
            "=128x128",
            "-p",
            "0",
        ]);
        let Commands::Trim { trim, .. } = cli.command else {
            panic!("expected trim");
        };

        let config = trim.to_config(false);
        assert_eq!(
            config.variants,
            vec![Variant::new("@2x", 256, 256), Variant::new("", 128, 128)]
        );
        assert_eq!(config.padding, 0);
    }

    #[test]
    fn rejects_malformed_size() {
        assert!(Cli::try_parse_from(["badgetrim", "batch", "--size", "400"]).is_err());
    }
}
