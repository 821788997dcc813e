// badgetrim/src/utils/mod.rs
use crate::core::{BadgeError, Result, SOURCE_SUFFIX};
use std::path::{Path, PathBuf};

const PNG_EXTENSION: &str = "png";

/// `badge@full.png` -> `Some("badge")`; anything else -> `None`.
pub fn source_base_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".png")?;
    stem.strip_suffix(SOURCE_SUFFIX)
}

pub fn is_source_image(path: &Path) -> bool {
    source_base_name(path).is_some()
}

pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(PNG_EXTENSION))
        .unwrap_or(false)
}

/// `<output_dir>/<base><suffix>.png` for a `<base>@full.png` source.
pub fn variant_output_path(source: &Path, output_dir: &Path, suffix: &str) -> Result<PathBuf> {
    let base = source_base_name(source).ok_or_else(|| {
        BadgeError::InvalidParameter(format!(
            "Not a {}.png source: {}",
            SOURCE_SUFFIX,
            source.display()
        ))
    })?;

    Ok(output_dir.join(format!("{}{}.{}", base, suffix, PNG_EXTENSION)))
}

/// Parses `WxH` (case-insensitive `x`).
pub fn parse_size(value: &str) -> Result<(u32, u32)> {
    let invalid = || BadgeError::InvalidParameter(format!("Size must look like WxH, got '{}'", value));

    let (w, h) = value
        .trim()
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(BadgeError::InvalidParameter(format!(
            "Size must be non-zero, got '{}'",
            value
        )));
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_base_name() {
        assert_eq!(source_base_name(Path::new("dir/gold@full.png")), Some("gold"));
        assert_eq!(source_base_name(Path::new("@full.png")), Some(""));
        assert_eq!(source_base_name(Path::new("gold@2x.png")), None);
        assert_eq!(source_base_name(Path::new("gold@full.jpg")), None);
    }

    #[test]
    fn builds_variant_paths() {
        let source = Path::new("art/gold@full.png");
        let out = Path::new("art");
        assert_eq!(
            variant_output_path(source, out, "@2x").unwrap(),
            PathBuf::from("art/gold@2x.png")
        );
        assert_eq!(
            variant_output_path(source, out, "").unwrap(),
            PathBuf::from("art/gold.png")
        );
        assert_eq!(
            variant_output_path(source, out, "@icon").unwrap(),
            PathBuf::from("art/gold@icon.png")
        );
        assert!(variant_output_path(Path::new("gold.png"), out, "@2x").is_err());
    }

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("400x80").unwrap(), (400, 80));
        assert_eq!(parse_size(" 64X64 ").unwrap(), (64, 64));
        assert!(parse_size("400").is_err());
        assert!(parse_size("0x80").is_err());
        assert!(parse_size("ax80").is_err());
    }

    #[test]
    fn detects_png_extension() {
        assert!(is_png(Path::new("a.PNG")));
        assert!(!is_png(Path::new("a.png.tmp")));
    }
}
