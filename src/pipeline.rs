//! Wiring the sampler and renderer between decode and persistence
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::font::{self, FontError};
use crate::ramp::GlyphRamp;
use crate::render::{render, RenderError};
use crate::sample::{sample, SampleError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not decode image {path:?}")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("Could not write output file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not encode output image {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Where the finished artifacts ended up
#[derive(Debug)]
pub struct Outputs {
    pub text_path: PathBuf,
    pub image_path: PathBuf,
}

/// Convert one image into its text and raster ASCII art renditions.
///
/// `requested_columns` defaults to one glyph column per source pixel.
/// The aspect correction comes from the measured font cell, so the
/// rendered canvas keeps the source proportions.
pub fn run(
    input: &Path,
    output_stem: &str,
    user_font: Option<&Path>,
    requested_columns: Option<u32>,
) -> Result<Outputs, PipelineError> {
    let decoded = image::open(input).map_err(|source| PipelineError::UnreadableImage {
        path: input.to_path_buf(),
        source,
    })?;
    let gray = decoded.to_luma8();
    info!(
        width = gray.width(),
        height = gray.height(),
        "decoded source image"
    );

    let font = font::load_font(user_font)?;
    let metrics = font::measure_cell(&font, font::DEFAULT_FONT_PX);
    let columns = requested_columns.unwrap_or_else(|| gray.width());
    let config = Config::with_metrics(columns, GlyphRamp::default(), metrics);

    let grid = sample(&gray, &config)?;
    info!(
        rows = grid.rows(),
        columns = grid.columns(),
        "sampled glyph grid"
    );

    let text = grid.to_text();
    let canvas = render(&grid, &font, config.cell, config.ramp.background())?;
    info!(
        width = canvas.width(),
        height = canvas.height(),
        "rendered glyph canvas"
    );

    let text_path = PathBuf::from(format!("{output_stem}.txt"));
    let image_path = PathBuf::from(format!("{output_stem}.png"));
    write_outputs(&text, &canvas, &text_path, &image_path)?;
    Ok(Outputs {
        text_path,
        image_path,
    })
}

/// Persist both artifacts, or neither.
/// Everything is staged as `.tmp` siblings first; the renames are the
/// commit point, so a failure never leaves the final paths half-written.
fn write_outputs(
    text: &str,
    canvas: &GrayImage,
    text_path: &Path,
    image_path: &Path,
) -> Result<(), PipelineError> {
    let text_tmp = tmp_sibling(text_path);
    let image_tmp = tmp_sibling(image_path);
    let result = commit_outputs(text, canvas, &text_tmp, &image_tmp, text_path, image_path);
    if result.is_err() {
        let _ = fs::remove_file(&text_tmp);
        let _ = fs::remove_file(&image_tmp);
    }
    result
}

fn commit_outputs(
    text: &str,
    canvas: &GrayImage,
    text_tmp: &Path,
    image_tmp: &Path,
    text_path: &Path,
    image_path: &Path,
) -> Result<(), PipelineError> {
    fs::write(text_tmp, text).map_err(|source| PipelineError::Io {
        path: text_tmp.to_path_buf(),
        source,
    })?;
    canvas
        .save_with_format(image_tmp, ImageFormat::Png)
        .map_err(|source| PipelineError::Encode {
            path: image_tmp.to_path_buf(),
            source,
        })?;
    fs::rename(text_tmp, text_path).map_err(|source| PipelineError::Io {
        path: text_path.to_path_buf(),
        source,
    })?;
    fs::rename(image_tmp, image_path).map_err(|source| PipelineError::Io {
        path: image_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
