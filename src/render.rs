//! Drawing a glyph grid onto a raster canvas with fixed cell metrics
//!
//! Every glyph lands in an identical pixel cell, so line spacing never
//! depends on a viewer's text layout engine.
use ab_glyph::{point, Font, Point, PxScale};
use image::{GrayImage, Luma};
use thiserror::Error;

use crate::font::CellMetrics;
use crate::grid::GlyphGrid;
use crate::ramp::Background;

/// Coverage above which a canvas pixel counts as inked.
/// Thresholding keeps the output binary, like rendering with
/// anti-aliasing switched off.
const INK_THRESHOLD: f32 = 0.5;
/// Baseline position as a fraction of the cell height
const BASELINE_FACTOR: f32 = 0.8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Cannot render an empty glyph grid.")]
    EmptyGrid,
    #[error("Glyph cells must be at least one pixel in each dimension.")]
    ZeroCellSize,
}

/// Draw the grid onto a fresh canvas of exactly
/// `columns * cell.width` by `rows * cell.height` pixels.
pub fn render<F: Font>(
    grid: &GlyphGrid,
    font: &F,
    cell: CellMetrics,
    background: Background,
) -> Result<GrayImage, RenderError> {
    if grid.rows() == 0 || grid.columns() == 0 {
        return Err(RenderError::EmptyGrid);
    }
    if cell.width == 0 || cell.height == 0 {
        return Err(RenderError::ZeroCellSize);
    }

    let (paper, ink) = match background {
        Background::Light => (255u8, 0u8),
        Background::Dark => (0u8, 255u8),
    };
    let width = grid.columns() as u32 * cell.width;
    let height = grid.rows() as u32 * cell.height;
    let mut canvas = GrayImage::from_pixel(width, height, Luma([paper]));

    let scale = PxScale::from(cell.height as f32);
    let baseline = cell.height as f32 * BASELINE_FACTOR;
    for (row, line) in grid.iter_rows().enumerate() {
        for (col, &symbol) in line.iter().enumerate() {
            let origin = point(
                (col as u32 * cell.width) as f32,
                (row as u32 * cell.height) as f32 + baseline,
            );
            draw_glyph(&mut canvas, font, scale, symbol, origin, ink);
        }
    }
    Ok(canvas)
}

/// Draw one glyph with its baseline anchored at `origin`
fn draw_glyph<F: Font>(
    canvas: &mut GrayImage,
    font: &F,
    scale: PxScale,
    symbol: char,
    origin: Point,
    ink: u8,
) {
    let glyph = font
        .glyph_id(symbol)
        .with_scale_and_position(scale, origin);
    // Whitespace has no outline and stays paper-colored
    let Some(outlined) = font.outline_glyph(glyph) else {
        return;
    };
    let bounds = outlined.px_bounds();
    let (canvas_width, canvas_height) = canvas.dimensions();
    outlined.draw(|x, y, coverage| {
        if coverage < INK_THRESHOLD {
            return;
        }
        let px = x + bounds.min.x as u32;
        let py = y + bounds.min.y as u32;
        if px < canvas_width && py < canvas_height {
            canvas.put_pixel(px, py, Luma([ink]));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{load_font, measure_cell, DEFAULT_FONT_PX};

    fn cell() -> CellMetrics {
        CellMetrics {
            width: 8,
            height: 16,
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(3, vec![]);
        let err = render(&grid, &font, cell(), Background::Light).unwrap_err();
        assert_eq!(err, RenderError::EmptyGrid);
    }

    #[test]
    fn test_zero_cell_rejected() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(1, vec!['#']);
        let degenerate = CellMetrics {
            width: 0,
            height: 16,
        };
        let err = render(&grid, &font, degenerate, Background::Light).unwrap_err();
        assert_eq!(err, RenderError::ZeroCellSize);
    }

    #[test]
    fn test_canvas_has_exact_dimensions() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(5, vec!['@'; 15]);
        let canvas = render(&grid, &font, cell(), Background::Light).unwrap();
        assert_eq!(canvas.dimensions(), (5 * 8, 3 * 16));
    }

    #[test]
    fn test_all_space_grid_renders_blank() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(10, vec![' '; 50]);
        let canvas = render(&grid, &font, cell(), Background::Light).unwrap();
        assert!(canvas.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_dark_background_inverts_paper() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(2, vec![' ', ' ']);
        let canvas = render(&grid, &font, cell(), Background::Dark).unwrap();
        assert!(canvas.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_dense_glyph_leaves_ink() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let metrics = measure_cell(&font, DEFAULT_FONT_PX);
        let grid = GlyphGrid::new(1, vec!['@']);
        let canvas = render(&grid, &font, metrics, Background::Light).unwrap();
        assert!(canvas.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let Ok(font) = load_font(None) else {
            return;
        };
        let grid = GlyphGrid::new(4, vec!['#', '.', ' ', '@', '%', ':', '7', '$']);
        let first = render(&grid, &font, cell(), Background::Light).unwrap();
        let second = render(&grid, &font, cell(), Background::Light).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_canvas_keeps_source_aspect() {
        let Ok(font) = load_font(None) else {
            return;
        };
        // A 200x100 source sampled with the cell's own aspect correction
        // should come back out at roughly 2:1
        let metrics = measure_cell(&font, DEFAULT_FONT_PX);
        let config =
            crate::config::Config::with_metrics(40, crate::ramp::GlyphRamp::default(), metrics);
        let source = image::GrayImage::from_pixel(200, 100, Luma([90]));
        let grid = crate::sample::sample(&source, &config).unwrap();
        let canvas = render(&grid, &font, metrics, Background::Light).unwrap();

        let source_ratio = 200.0 / 100.0;
        let canvas_ratio = canvas.width() as f64 / canvas.height() as f64;
        assert!((canvas_ratio - source_ratio).abs() / source_ratio < 0.05);
    }
}
