// badgetrim/src/processors/white.rs
use super::batch::{build_thread_pool, collect_paths, create_progress_bar, run_on_pool, validate_input_dir};
use super::classifier::NearWhite;
use super::compressor::Compressor;
use super::fill::border_connected;
use super::loader::Loader;
use crate::core::{Result, DEFAULT_WHITE_THRESHOLD};
use crate::utils::is_png;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::path::Path;

#[derive(Debug, Default)]
pub struct StripStats {
    pub overwritten: usize,
    pub errors: Vec<(String, String)>,
}

/// Clears border-connected near-white background from PNGs, in place.
///
/// Interior white (eyes, highlights, lettering) survives because only pixels
/// reachable from the edge through near-white pixels are cleared.
pub struct WhiteStripper {
    threshold: u8,
    recursive: bool,
    loader: Loader,
    compressor: Compressor,
    thread_pool: Option<rayon::ThreadPool>,
    show_progress: bool,
}

impl WhiteStripper {
    pub fn new(threshold: u8, max_threads: usize) -> Result<Self> {
        Ok(Self {
            threshold,
            recursive: false,
            loader: Loader::new(),
            compressor: Compressor::new(),
            thread_pool: build_thread_pool(max_threads)?,
            show_progress: true,
        })
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.compressor = self.compressor.with_png_optimization(optimize);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Rewrites one file; returns how many pixels were cleared.
    pub fn strip_file(&self, path: &Path) -> Result<usize> {
        let mut grid = self.loader.load(path)?;
        let mask = border_connected(&grid, &NearWhite::new(self.threshold));
        grid.apply_mask(&mask)?;

        self.compressor.save_replacing(grid.as_image(), path)?;
        Ok(mask.count())
    }

    pub fn strip_directory(&self, dir: &Path) -> Result<StripStats> {
        validate_input_dir(dir)?;

        let paths = collect_paths(dir, self.recursive, is_png);
        log::info!(
            "Stripping near-white (>= {}) from {} PNGs in {}",
            self.threshold,
            paths.len(),
            dir.display()
        );

        let pb = create_progress_bar(paths.len(), self.show_progress);
        let results = run_on_pool(self.thread_pool.as_ref(), || {
            paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|path| (path, self.strip_file(path)))
                .collect::<Vec<_>>()
        });

        let mut stats = StripStats::default();
        for (path, result) in results {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match result {
                Ok(cleared) => {
                    log::info!("overwritten: {} ({} pixels cleared)", name, cleared);
                    stats.overwritten += 1;
                }
                Err(e) => {
                    log::warn!("Failed: {}: {}", path.display(), e);
                    stats.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_and_clear();
        log::info!("done: {} file(s)", stats.overwritten);
        Ok(stats)
    }
}

impl Default for WhiteStripper {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_WHITE_THRESHOLD,
            recursive: false,
            loader: Loader::new(),
            compressor: Compressor::new(),
            thread_pool: None,
            show_progress: true,
        }
    }
}
