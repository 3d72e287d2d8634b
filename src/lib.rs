//! Word clouds for complex scripts.
//!
//! Brahmic scripts such as Odia or Devanagari cannot be drawn one codepoint at a
//! time: a consonant followed by a virama and another consonant is usually drawn
//! as a single conjunct glyph, vowel signs may be drawn before the consonant they
//! follow in memory, and marks stack above and below the base. This crate runs
//! every word through HarfBuzz so that the font's own shaping program decides
//! which glyphs appear and where, then rasterizes those glyphs with font-kit and
//! packs the resulting word images onto a canvas.
//!
//! The pipeline, leaf first:
//!
//!  - *shaping* ([`shape_word`]) turns a word into a [`GlyphRun`], the glyph ids
//!    and advances in visual order.
//!  - *rasterizing* ([`rasterize_glyph`]) turns one glyph id into an 8-bit coverage
//!    bitmap with its bearings.
//!  - *assembly* ([`build_word_image`], [`rotate`]) composites a run onto a single
//!    transparent image with a shared baseline, tinted in one color, then
//!    optionally rotates it.
//!  - *placement* ([`find_slot`]) searches outward from the canvas center, ring by
//!    ring, for the first spot that does not overlap anything already placed.
//!  - *layout* ([`render_cloud`]) styles each word, heaviest first, and restarts
//!    on a bigger canvas whenever a word does not fit.
//!
//! Some terms used throughout:
//!
//!  - *conjunct* - a single glyph drawn for a cluster of consonants joined by a
//!    virama, e.g. "ଷ୍ଟ" or "न्द".
//!  - *cluster* - the glyphs the shaper produced for one run of source codepoints,
//!    which are drawn together.
//!  - *coverage* - how much of a pixel a glyph outline covers, 0 to 255. Used
//!    directly as the alpha channel of the tinted word.
//!  - *bearing* - offset from the pen position on the baseline to the top-left of
//!    a glyph's bitmap.
//!
//! All randomness (font, color and orientation per word, and weights for
//! unweighted input) comes from an `Rng` passed in by the caller, so a seeded
//! generator reproduces a cloud exactly.

#[macro_use]
extern crate log;

use std::path::PathBuf;

use font_kit::loaders::default::Font;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod cloud;
mod collection;
mod error;
mod hb_layout;
mod input;
mod placement;
pub mod platform;
mod raster;
mod render;
mod word_image;

pub use crate::cloud::{
    render_cloud, CloudConfig, ColorMode, PlacedWord, WordCloud, WordRenderer, WordStyle,
};
pub use crate::collection::{FontCollection, FontRef};
pub use crate::error::{CloudError, Result, ShapingError};
pub use crate::hb_layout::{shape_word, GlyphRun, PositionedGlyph};
pub use crate::input::{RandomWeights, WeightedWords, WordEntry, WordInput};
pub use crate::placement::{find_slot, PlacedBox, Placement, RadialSearch};
pub use crate::platform::PlatformMetrics;
pub use crate::raster::{rasterize_glyph, tint_coverage, RasterGlyph, MAX_RASTER_SIDE};
pub use crate::render::FontRenderer;
pub use crate::word_image::{build_word_image, rotate};

#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Pixels per em.
    pub size: f32,
}

impl TextStyle {
    pub fn from_size(size: f32) -> Self {
        TextStyle { size }
    }
}

/// Resolve `input`, load fonts and render a cloud in one call.
///
/// With `font_paths` of `None` the platform's installed Odia fonts are used. The
/// generator is seeded from `config.seed` when set, otherwise from the OS.
pub fn make_word_cloud(
    input: WordInput,
    font_paths: Option<&[PathBuf]>,
    config: &CloudConfig,
) -> Result<WordCloud> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    let words = input.resolve(&config.random_weights, &mut rng)?;
    let renderer = match font_paths {
        Some(paths) => FontRenderer::from_paths(paths)?,
        None => FontRenderer::from_paths(&platform::installed_fonts(platform::current_os())?)?,
    };
    render_cloud(&words, &renderer, config, &mut rng)
}
