//! Immutable per-run configuration shared by the sampler and renderer
use crate::font::CellMetrics;
use crate::ramp::GlyphRamp;

/// Everything one conversion run needs, fixed before the pipeline starts
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Character width of the glyph grid
    pub target_columns: u32,
    pub ramp: GlyphRamp,
    /// How much taller than wide a glyph cell is; sampler cells are
    /// stretched vertically by the same factor to compensate
    pub aspect_correction: f32,
    /// Pixel size of one glyph cell on the rendered canvas
    pub cell: CellMetrics,
}

impl Config {
    /// Configuration derived from measured font metrics
    pub fn with_metrics(target_columns: u32, ramp: GlyphRamp, cell: CellMetrics) -> Config {
        Config {
            target_columns,
            ramp,
            aspect_correction: cell.aspect_correction(),
            cell,
        }
    }
}
