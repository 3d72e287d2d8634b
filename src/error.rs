//! Error types.
//!
//! Shaping failures are scoped to a single word and the layout skips that word;
//! everything in `CloudError` aborts the whole render.

use std::path::PathBuf;

use thiserror::Error;

/// A word could not be turned into an image.
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("failed to load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    #[error("font {path:?} has no GSUB table, cannot shape {text:?}")]
    MissingShapingTables { path: PathBuf, text: String },

    #[error("shaping {text:?} produced no usable glyphs")]
    NoGlyphs { text: String },

    #[error("no visible glyphs in shaped run")]
    NoInk,

    #[error("failed to rasterize glyph {glyph_id}: {reason}")]
    Raster { glyph_id: u32, reason: String },
}

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("unsupported word input: expected text, a list of words or a word-to-weight mapping, got {0}")]
    UnsupportedInputType(String),

    #[error("weight for {word:?} must be a positive finite number, got {weight}")]
    InvalidWeight { word: String, weight: f64 },

    #[error("no font files available")]
    NoFonts,

    #[error("no default fonts known for platform {0:?}")]
    UnsupportedPlatform(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("layout did not converge after {attempts} attempts (last canvas {width}x{height})")]
    AttemptBudgetExceeded {
        attempts: usize,
        width: u32,
        height: u32,
    },
}

pub type Result<T, E = CloudError> = std::result::Result<T, E>;
