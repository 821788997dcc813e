// badgetrim/src/processors/compressor.rs
use crate::core::{BadgeError, Result};
use image::{ImageFormat, RgbaImage};
use oxipng::{optimize_from_memory, Options};
use std::fs::{self, OpenOptions};
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// PNG encoder with optional lossless recompression through oxipng.
pub struct Compressor {
    optimize_png: bool,
}

impl Compressor {
    pub fn new() -> Self {
        Self {
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Writes `image` to `path` only if nothing exists there yet.
    ///
    /// Returns `false` when the file was already present; existing files are
    /// never opened for writing.
    pub fn save_new(&self, image: &RgbaImage, path: &Path) -> Result<bool> {
        let data = self.compress_to_bytes(image)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("{} appeared before write, leaving it", path.display());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(&data)?;
        file.flush()?;
        self.log_save_result(path, data.len());
        Ok(true)
    }

    /// Replaces `path` through a sibling `.tmp` file and a rename.
    pub fn save_replacing(&self, image: &RgbaImage, path: &Path) -> Result<()> {
        let data = self.compress_to_bytes(image)?;
        let tmp = tmp_path(path);

        fs::write(&tmp, &data)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        self.log_save_result(path, data.len());
        Ok(())
    }

    pub fn compress_to_bytes(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;

        if self.optimize_png {
            return self.optimize_png_bytes(&buffer.into_inner());
        }

        Ok(buffer.into_inner())
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| BadgeError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }

    fn log_save_result(&self, path: &Path, bytes: usize) {
        log::debug!("Wrote {} ({} bytes)", path.display(), bytes);
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
