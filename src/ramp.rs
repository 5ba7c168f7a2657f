//! Mapping averaged intensities onto an ordered ramp of glyphs
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RampError {
    #[error("Glyph ramp must contain at least one character.")]
    Empty,
    #[error("Glyph ramp must not contain control characters.")]
    ControlCharacter,
}

/// Which end of the intensity range counts as background.
///
/// Under `Light` (white paper, dark ink) bright pixels map toward the sparse
/// end of the ramp and dark pixels toward the dense end. Under `Dark` the
/// mapping is inverted, so dark pixels stay sparse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    #[default]
    Light,
    Dark,
}

/// Ordered glyphs from sparsest to densest perceived ink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
    background: Background,
}

impl GlyphRamp {
    pub fn new(glyphs: Vec<char>, background: Background) -> Result<GlyphRamp, RampError> {
        if glyphs.is_empty() {
            return Err(RampError::Empty);
        }
        if glyphs.iter().any(|c| c.is_control()) {
            return Err(RampError::ControlCharacter);
        }
        Ok(GlyphRamp { glyphs, background })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn sparsest(&self) -> char {
        self.glyphs[0]
    }

    pub fn densest(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    /// Pick the glyph for an averaged intensity in `0..=255`
    pub fn glyph_for_intensity(&self, intensity: u8) -> char {
        self.glyphs[self.index_for_intensity(intensity)]
    }

    /// Linear quantization of intensity onto the ramp.
    /// `255 * len / 256 < len`, so the index never leaves the ramp.
    fn index_for_intensity(&self, intensity: u8) -> usize {
        let effective = match self.background {
            Background::Dark => intensity,
            Background::Light => 255 - intensity,
        };
        effective as usize * self.glyphs.len() / 256
    }
}

impl Default for GlyphRamp {
    /// Sixteen-step ramp of the classic converter, white paper convention
    fn default() -> Self {
        GlyphRamp::new(" .,-:+;*?79$8#%@".chars().collect(), Background::Light).unwrap()
    }
}
