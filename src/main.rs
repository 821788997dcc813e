use anyhow::{bail, Context, Result};
use badgetrim::{
    BatchProcessor, Cli, Commands, ImageProcessor, ProcessingStats, TrimArgs, WhiteStripper,
};
use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Batch {
            input,
            threads,
            recursive,
            no_progress,
            trim,
        } => process_batch(&input, threads, recursive, !no_progress, &trim),
        Commands::Trim { input, trim } => process_single(input, &trim),
        Commands::StripWhite {
            input,
            threshold,
            threads,
            recursive,
            optimize,
        } => process_strip_white(&input, threshold, threads, recursive, optimize),
    }
}

fn process_batch(
    input: &Path,
    threads: usize,
    recursive: bool,
    show_progress: bool,
    trim: &TrimArgs,
) -> Result<()> {
    let config = trim.to_config(recursive);
    let processor = BatchProcessor::new(config, threads)
        .context("Invalid batch configuration")?
        .with_progress(show_progress);

    let stats = processor
        .process_directory(input)
        .with_context(|| format!("Batch over {} failed", input.display()))?;

    print_summary(&stats);
    if stats.has_errors() {
        bail!("{} file(s) failed", stats.errors.len());
    }

    Ok(())
}

fn process_single(input: PathBuf, trim: &TrimArgs) -> Result<()> {
    let config = trim.to_config(false);
    config.validate().context("Invalid trim configuration")?;

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", dir.display()))?;
    }

    let processor = ImageProcessor::new(config);
    let outcome = processor
        .process(&input)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let mut stats = ProcessingStats::default();
    stats.record(&outcome);
    print_summary(&stats);
    Ok(())
}

fn process_strip_white(
    input: &Path,
    threshold: u8,
    threads: usize,
    recursive: bool,
    optimize: bool,
) -> Result<()> {
    let stripper = WhiteStripper::new(threshold, threads)?
        .recursive(recursive)
        .with_png_optimization(optimize);

    let stats = stripper
        .strip_directory(input)
        .with_context(|| format!("Stripping {} failed", input.display()))?;

    println!("done: {} file(s)", stats.overwritten);
    if !stats.errors.is_empty() {
        for (path, error) in &stats.errors {
            eprintln!("  {}: {}", path, error);
        }
        bail!("{} file(s) failed", stats.errors.len());
    }

    Ok(())
}

fn print_summary(stats: &ProcessingStats) {
    println!(
        "Trimmed {} image(s): {} variant(s) saved, {} already present, {} empty, {} failed",
        stats.processed_count,
        stats.variants_saved,
        stats.variants_skipped,
        stats.skipped_empty,
        stats.errors.len()
    );

    for (path, error) in &stats.errors {
        eprintln!("  {}: {}", path, error);
    }
}
