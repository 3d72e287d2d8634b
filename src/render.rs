//! The font-backed word renderer.

use std::path::Path;

use image::RgbaImage;

use crate::cloud::{WordRenderer, WordStyle};
use crate::error::{CloudError, ShapingError};
use crate::hb_layout::shape_word;
use crate::platform::PlatformMetrics;
use crate::raster::rasterize_glyph;
use crate::word_image::build_word_image;
use crate::{FontCollection, TextStyle};

/// Shapes with HarfBuzz and rasterizes with font-kit.
pub struct FontRenderer {
    fonts: FontCollection,
    metrics: PlatformMetrics,
}

impl FontRenderer {
    pub fn new(fonts: FontCollection, metrics: PlatformMetrics) -> FontRenderer {
        FontRenderer { fonts, metrics }
    }

    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<FontRenderer, CloudError> {
        let fonts = FontCollection::from_paths(paths)?;
        Ok(FontRenderer::new(fonts, PlatformMetrics::current()))
    }

    pub fn fonts(&self) -> &FontCollection {
        &self.fonts
    }

    pub fn metrics(&self) -> PlatformMetrics {
        self.metrics
    }
}

impl WordRenderer for FontRenderer {
    fn font_count(&self) -> usize {
        self.fonts.len()
    }

    fn render_word(&self, text: &str, style: &WordStyle) -> Result<RgbaImage, ShapingError> {
        let font = self.fonts.get(style.font_index)?;
        let text_style = TextStyle::from_size(self.pixel_size(style));
        let run = shape_word(&text_style, font, text)?;
        build_word_image(
            &run,
            |glyph_id| rasterize_glyph(font, glyph_id, text_style.size),
            style.color,
            self.metrics.extra_padding,
        )
    }

    fn pixel_size(&self, style: &WordStyle) -> f32 {
        style.font_size * self.metrics.size_scale
    }
}
