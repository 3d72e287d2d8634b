//! Assembly of shaped glyphs into a single tinted word image.

use image::imageops;
use image::{Rgb, Rgba, RgbaImage};
use pathfinder_geometry::transform2d::Transform2F;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use crate::error::ShapingError;
use crate::hb_layout::GlyphRun;
use crate::raster::RasterGlyph;

pub const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

struct PendingGlyph {
    x: i32,
    rise: i32,
    raster: RasterGlyph,
}

/// Composite a shaped run onto a transparent image, all glyphs sharing one baseline.
///
/// `rasterize` is called once per glyph in run order. The image is as wide as the
/// summed advances plus `extra_padding`, and tall enough for the highest ascent
/// and deepest descent of any painted glyph.
pub fn build_word_image<F>(
    run: &GlyphRun,
    mut rasterize: F,
    color: Rgb<u8>,
    extra_padding: u32,
) -> Result<RgbaImage, ShapingError>
where
    F: FnMut(u32) -> Result<RasterGlyph, ShapingError>,
{
    let mut pen_x = 0;
    let mut max_top = 0;
    let mut max_bottom = 0;
    let mut pending = Vec::with_capacity(run.len());
    for glyph in &run.glyphs {
        let raster = rasterize(glyph.glyph_id)?;
        let (dx, dy) = run.offset_px(glyph);
        if !raster.is_empty() {
            max_top = max_top.max(raster.top + dy);
            max_bottom = max_bottom.max(raster.bottom() - dy);
            pending.push(PendingGlyph {
                x: pen_x + dx + raster.left,
                rise: dy + raster.top,
                raster,
            });
        }
        pen_x += run.advance_px(glyph);
    }

    let height = max_top + max_bottom;
    if pending.is_empty() || height <= 0 {
        return Err(ShapingError::NoInk);
    }
    let width = pen_x.max(0) as u32 + extra_padding;
    let mut image = RgbaImage::from_pixel(width, height as u32, TRANSPARENT);
    let baseline = max_top;
    for glyph in pending {
        let tinted = glyph.raster.tint(color);
        imageops::overlay(
            &mut image,
            &tinted,
            glyph.x as i64,
            (baseline - glyph.rise) as i64,
        );
    }
    Ok(image)
}

/// Rotate counter-clockwise by `degrees`, growing the image to fit.
///
/// Exposed corners are fully transparent. Multiples of 90° are exact.
pub fn rotate(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 {
        return image.clone();
    }
    if turn == 90.0 {
        return imageops::rotate270(image);
    }
    if turn == 180.0 {
        return imageops::rotate180(image);
    }
    if turn == 270.0 {
        return imageops::rotate90(image);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    // Image space is y-down, so a visual counter-clockwise turn is a negative angle.
    let rotation = Transform2F::from_rotation(-turn.to_radians());
    let half = vec2f(w, h) * 0.5;
    let corners = [
        rotation * vec2f(-half.x(), -half.y()),
        rotation * vec2f(half.x(), -half.y()),
        rotation * vec2f(-half.x(), half.y()),
        rotation * vec2f(half.x(), half.y()),
    ];
    let (min, max) = corners.iter().fold(
        (corners[0], corners[0]),
        |(min, max): (Vector2F, Vector2F), &c| (min.min(c), max.max(c)),
    );
    // Tolerate float noise so an exact fit does not gain a pixel.
    let extent = max - min;
    let new_w = (extent.x() - 1e-3).ceil().max(1.0) as u32;
    let new_h = (extent.y() - 1e-3).ceil().max(1.0) as u32;

    let new_half = vec2f(new_w as f32, new_h as f32) * 0.5;
    let to_source = (Transform2F::from_translation(new_half)
        * rotation
        * Transform2F::from_translation(-half))
    .inverse();
    RgbaImage::from_fn(new_w, new_h, |x, y| {
        let src = to_source * vec2f(x as f32 + 0.5, y as f32 + 0.5);
        let (sx, sy) = (src.x().floor(), src.y().floor());
        if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
            *image.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
