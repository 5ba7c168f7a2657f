//! Locating, loading and measuring the monospace rendering font
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Pixel size the font is measured and rendered at
pub const DEFAULT_FONT_PX: f32 = 12.0;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Could not find a monospace font for this platform.")]
    NoPlatformFont,
    #[error("Font file {0:?} is missing or not a usable font.")]
    FontUnavailable(PathBuf),
}

/// Fixed pixel size of one glyph cell on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u32,
    pub height: u32,
}

impl CellMetrics {
    /// Height over width, the factor the sampler stretches its cells by
    pub fn aspect_correction(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Load the user's font when given, falling back to a platform font
pub fn load_font(user_font: Option<&Path>) -> Result<FontVec, FontError> {
    if let Some(path) = user_font {
        if path.exists() {
            return read_font(path);
        }
        warn!(path = %path.display(), "user font not found, falling back to a platform font");
    }
    let path = platform_candidates()
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .ok_or(FontError::NoPlatformFont)?;
    read_font(path)
}

/// Common monospace install locations per platform
fn platform_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["c:/windows/fonts/consola.ttf", "c:/windows/fonts/cour.ttf"]
    } else if cfg!(target_os = "macos") {
        &[
            "/System/Library/Fonts/Monaco.ttf",
            "/System/Library/Fonts/Menlo.ttc",
        ]
    } else {
        &[
            "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
            "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/usr/share/fonts/gnu-free/FreeMono.otf",
        ]
    }
}

fn read_font(path: &Path) -> Result<FontVec, FontError> {
    let data =
        std::fs::read(path).map_err(|_| FontError::FontUnavailable(path.to_path_buf()))?;
    FontVec::try_from_vec(data).map_err(|_| FontError::FontUnavailable(path.to_path_buf()))
}

/// Measure the glyph cell from the font's `M` advance and line height.
/// Monospace fonts advance every glyph by the same amount, so the `M`
/// advance is the cell width.
pub fn measure_cell<F: Font>(font: &F, px_height: f32) -> CellMetrics {
    let scaled = font.as_scaled(PxScale::from(px_height));
    let width = scaled.h_advance(font.glyph_id('M')).ceil().max(1.0) as u32;
    let height = scaled.height().ceil().max(1.0) as u32;
    CellMetrics { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_font_falls_back() {
        let missing = Path::new("/definitely/not/a/font.ttf");
        match load_font(Some(missing)) {
            // Fallback went to the platform list, not the missing path
            Ok(_) | Err(FontError::NoPlatformFont) => {}
            Err(FontError::FontUnavailable(path)) => assert_ne!(path, missing),
        }
    }

    #[test]
    fn test_garbage_font_file_rejected() {
        let path = std::env::temp_dir().join(format!("ascii_art_bad_font_{}.ttf", std::process::id()));
        std::fs::write(&path, b"not a font at all").unwrap();
        let result = load_font(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(FontError::FontUnavailable(p)) if p == path));
    }

    #[test]
    fn test_measured_cell_is_taller_than_wide() {
        let Ok(font) = load_font(None) else {
            // No font installed on this machine, nothing to measure
            return;
        };
        let metrics = measure_cell(&font, DEFAULT_FONT_PX);
        assert!(metrics.width > 0);
        assert!(metrics.height > metrics.width);
        assert!(metrics.aspect_correction() > 1.0);
    }
}
