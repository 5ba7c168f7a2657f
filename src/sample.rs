//! Resampling a pixel grid into a coarser grid of glyphs
use crate::config::Config;
use crate::grid::GlyphGrid;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("Invalid sampling configuration: {0}.")]
    InvalidConfiguration(&'static str),
}

/// Narrow decode capability, so the sampler never sees a codec.
/// Implementors convert color to grayscale themselves.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Grayscale intensity in `0..=255` at `(x, y)`
    fn intensity(&self, x: u32, y: u32) -> u8;
}

impl PixelSource for image::GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }
    fn height(&self) -> u32 {
        self.dimensions().1
    }
    fn intensity(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[0]
    }
}

/// Rectangular patch of the source that averages into one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Quantize a pixel source into a glyph grid.
///
/// Cells are `aspect_correction` times taller than wide in source pixels,
/// so the grid rendered with glyphs of that aspect keeps the source
/// proportions. Same source and config always give the same grid.
pub fn sample<S: PixelSource>(source: &S, config: &Config) -> Result<GlyphGrid, SampleError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(SampleError::InvalidConfiguration(
            "source image must have at least one pixel",
        ));
    }
    if config.target_columns == 0 {
        return Err(SampleError::InvalidConfiguration(
            "target columns must be positive",
        ));
    }
    if !(config.aspect_correction > 0.0) {
        return Err(SampleError::InvalidConfiguration(
            "aspect correction must be positive",
        ));
    }

    let columns = config.target_columns;
    let cell_width = source.width() as f64 / columns as f64;
    let cell_height = cell_width * config.aspect_correction as f64;
    let rows = (source.height() as f64 / cell_height).round() as u32;
    if rows == 0 {
        return Err(SampleError::InvalidConfiguration(
            "image too small for the requested column count",
        ));
    }

    let mut cells = Vec::with_capacity(rows as usize * columns as usize);
    for row in 0..rows {
        for col in 0..columns {
            let cell = cell_bounds(source, cell_width, cell_height, row, col, rows, columns);
            let mean = mean_intensity(source, cell);
            cells.push(config.ramp.glyph_for_intensity(mean));
        }
    }
    Ok(GlyphGrid::new(columns as usize, cells))
}

/// Pixel bounds of one grid cell.
/// The last row and column absorb the rounding remainder, and every cell
/// keeps at least one pixel even when the grid outnumbers the source.
fn cell_bounds<S: PixelSource>(
    source: &S,
    cell_width: f64,
    cell_height: f64,
    row: u32,
    col: u32,
    rows: u32,
    columns: u32,
) -> Cell {
    let x0 = ((col as f64 * cell_width) as u32).min(source.width() - 1);
    let y0 = ((row as f64 * cell_height) as u32).min(source.height() - 1);
    let x1 = if col + 1 == columns {
        source.width()
    } else {
        (((col + 1) as f64 * cell_width) as u32).clamp(x0 + 1, source.width())
    };
    let y1 = if row + 1 == rows {
        source.height()
    } else {
        (((row + 1) as f64 * cell_height) as u32).clamp(y0 + 1, source.height())
    };
    Cell {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}

/// Equal-weight average over the cell, no gamma correction
fn mean_intensity<S: PixelSource>(source: &S, cell: Cell) -> u8 {
    let mut sum: u64 = 0;
    for y in cell.y..cell.y + cell.height {
        for x in cell.x..cell.x + cell.width {
            sum += source.intensity(x, y) as u64;
        }
    }
    (sum / (cell.width as u64 * cell.height as u64)) as u8
}
