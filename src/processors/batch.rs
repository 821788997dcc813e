// badgetrim/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{BadgeError, ProcessingStats, Result, TrimConfig};
use crate::utils::is_source_image;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Processes every `*@full.png` in a directory on a rayon pool.
pub struct BatchProcessor {
    processor: ImageProcessor,
    thread_pool: Option<rayon::ThreadPool>,
    show_progress: bool,
}

impl BatchProcessor {
    /// `max_threads == 0` uses the global pool (one worker per CPU).
    pub fn new(config: TrimConfig, max_threads: usize) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            processor: ImageProcessor::new(config),
            thread_pool: build_thread_pool(max_threads)?,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn process_directory(&self, input_dir: &Path) -> Result<ProcessingStats> {
        let config = self.processor.config();
        self.validate_paths(input_dir, config.output_dir.as_deref())?;

        let source_paths = collect_paths(input_dir, config.recursive, is_source_image);
        if source_paths.is_empty() {
            log::warn!("No *@full.png images found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Processing {} images from {}",
            source_paths.len(),
            input_dir.display()
        );

        if let Some(dir) = &config.output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let pb = create_progress_bar(source_paths.len(), self.show_progress);
        let results = run_on_pool(self.thread_pool.as_ref(), || {
            source_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|path| (path, self.processor.process(path)))
                .collect::<Vec<_>>()
        });

        let mut stats = ProcessingStats::default();
        for (path, result) in results {
            match result {
                Ok(outcome) => stats.record(&outcome),
                Err(e) => {
                    log::warn!("Failed: {}: {}", path.display(), e);
                    stats.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!(
            "{} trimmed, {} empty, {} failed",
            stats.processed_count,
            stats.skipped_empty,
            stats.errors.len()
        ));

        Ok(stats)
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<()> {
        validate_input_dir(input_dir)?;

        if let Some(output_dir) = output_dir {
            if output_dir.exists() && !output_dir.is_dir() {
                return Err(BadgeError::InvalidParameter(format!(
                    "Output path exists but is not a directory: {}",
                    output_dir.display()
                )));
            }
        }

        Ok(())
    }
}

pub(crate) fn validate_input_dir(input_dir: &Path) -> Result<()> {
    if !input_dir.exists() {
        return Err(BadgeError::InvalidParameter(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    if !input_dir.is_dir() {
        return Err(BadgeError::InvalidParameter(format!(
            "Input path is not a directory: {}",
            input_dir.display()
        )));
    }

    Ok(())
}

pub(crate) fn build_thread_pool(max_threads: usize) -> Result<Option<rayon::ThreadPool>> {
    if max_threads == 0 {
        return Ok(None);
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(max_threads)
        .build()
        .map(Some)
        .map_err(|e| BadgeError::ProcessingError(format!("Failed to create thread pool: {}", e)))
}

pub(crate) fn run_on_pool<R, F>(pool: Option<&rayon::ThreadPool>, op: F) -> R
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Sorted regular files under `dir` accepted by `filter`.
pub(crate) fn collect_paths(dir: &Path, recursive: bool, filter: fn(&Path) -> bool) -> Vec<PathBuf> {
    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let mut paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| filter(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    paths
}

pub(crate) fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
