//! Glyph rasterization into coverage bitmaps.

use font_kit::canvas::{Canvas, Format, RasterizationOptions};
use font_kit::hinting::HintingOptions;
use image::{Rgb, Rgba, RgbaImage};
use pathfinder_geometry::transform2d::Transform2F;

use crate::error::ShapingError;
use crate::FontRef;

/// Largest bitmap side `rasterize_glyph` will allocate.
pub const MAX_RASTER_SIDE: i32 = 1 << 15;

/// An 8-bit coverage bitmap and its placement relative to the glyph origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGlyph {
    pub coverage: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Distance from the baseline up to the top row.
    pub top: i32,
    /// Horizontal bearing.
    pub left: i32,
}

impl RasterGlyph {
    pub fn empty() -> RasterGlyph {
        RasterGlyph::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rows below the baseline.
    pub fn bottom(&self) -> i32 {
        self.height as i32 - self.top
    }

    pub fn tint(&self, color: Rgb<u8>) -> RgbaImage {
        tint_coverage(&self.coverage, self.width, self.height, color)
    }
}

/// Turn a coverage buffer into a solid-color image whose alpha is the coverage.
pub fn tint_coverage(coverage: &[u8], width: u32, height: u32, color: Rgb<u8>) -> RgbaImage {
    let Rgb([r, g, b]) = color;
    let mut image = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0]));
    image
        .chunks_exact_mut(4)
        .zip(coverage)
        .for_each(|(px, &alpha)| px[3] = alpha);
    image
}

pub fn rasterize_glyph(font: &FontRef, glyph_id: u32, size: f32) -> Result<RasterGlyph, ShapingError> {
    let raster_err = |reason: String| ShapingError::Raster { glyph_id, reason };
    let bounds = font
        .font
        .raster_bounds(
            glyph_id,
            size,
            Transform2F::default(),
            HintingOptions::None,
            RasterizationOptions::GrayscaleAa,
        )
        .map_err(|e| raster_err(e.to_string()))?;
    trace!("glyph {}, bounds {:?}", glyph_id, bounds);
    if bounds.width() <= 0 || bounds.height() <= 0 {
        return Ok(RasterGlyph::empty());
    }
    if bounds.width() > MAX_RASTER_SIDE || bounds.height() > MAX_RASTER_SIDE {
        return Err(raster_err(format!(
            "{}x{} bitmap at {}px exceeds {}px per side",
            bounds.width(),
            bounds.height(),
            size,
            MAX_RASTER_SIDE
        )));
    }

    let mut canvas = Canvas::new(bounds.size(), Format::A8);
    let neg_origin = -bounds.origin().to_f32();
    font.font
        .rasterize_glyph(
            &mut canvas,
            glyph_id,
            size,
            Transform2F::from_translation(neg_origin),
            HintingOptions::None,
            RasterizationOptions::GrayscaleAa,
        )
        .map_err(|e| raster_err(e.to_string()))?;

    // Canvas rows may be padded past the glyph width.
    let (width, height) = (bounds.width() as usize, bounds.height() as usize);
    let coverage = canvas
        .pixels
        .chunks(canvas.stride)
        .take(height)
        .flat_map(|row| &row[..width])
        .copied()
        .collect();
    Ok(RasterGlyph {
        coverage,
        width: width as u32,
        height: height as u32,
        top: -bounds.origin_y(),
        left: bounds.origin_x(),
    })
}
