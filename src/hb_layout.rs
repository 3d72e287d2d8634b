//! A HarfBuzz shaping back-end.

use std::sync::Arc;

use harfbuzz::sys::{
    hb_buffer_get_glyph_infos, hb_buffer_get_glyph_positions, hb_face_create, hb_face_destroy,
    hb_face_reference, hb_face_t, hb_font_create, hb_font_destroy, hb_script_t, hb_shape,
};
use harfbuzz::sys::{
    HB_SCRIPT_BENGALI, HB_SCRIPT_DEVANAGARI, HB_SCRIPT_GUJARATI, HB_SCRIPT_GURMUKHI,
    HB_SCRIPT_KANNADA, HB_SCRIPT_MALAYALAM, HB_SCRIPT_ORIYA, HB_SCRIPT_SINHALA, HB_SCRIPT_TAMIL,
    HB_SCRIPT_TELUGU,
};
use harfbuzz::{Blob, Buffer};
use harfbuzz_sys::hb_font_set_scale;

use crate::error::ShapingError;
use crate::{FontRef, TextStyle};

/// Scripts whose conjuncts only render correctly through the font's GSUB program.
const INDIC_SCRIPTS: [hb_script_t; 10] = [
    HB_SCRIPT_DEVANAGARI,
    HB_SCRIPT_BENGALI,
    HB_SCRIPT_GURMUKHI,
    HB_SCRIPT_GUJARATI,
    HB_SCRIPT_ORIYA,
    HB_SCRIPT_TAMIL,
    HB_SCRIPT_TELUGU,
    HB_SCRIPT_KANNADA,
    HB_SCRIPT_MALAYALAM,
    HB_SCRIPT_SINHALA,
];

pub(crate) struct HbFace {
    hb_face: *mut hb_face_t,
}

impl HbFace {
    pub(crate) fn new(data: Arc<Vec<u8>>) -> HbFace {
        let blob = Blob::new_from_arc_vec(data);
        unsafe {
            let hb_face = hb_face_create(blob.as_raw(), 0);
            HbFace { hb_face }
        }
    }
}

impl Clone for HbFace {
    fn clone(&self) -> HbFace {
        unsafe {
            HbFace {
                hb_face: hb_face_reference(self.hb_face),
            }
        }
    }
}

impl Drop for HbFace {
    fn drop(&mut self) {
        unsafe {
            hb_face_destroy(self.hb_face);
        }
    }
}

/// One shaped glyph. All quantities are in font units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionedGlyph {
    pub glyph_id: u32,
    pub cluster: u32,
    pub x_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// The glyphs of one word in visual order, as produced by the shaper.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub size: f32,
    pub units_per_em: u32,
    pub glyphs: Vec<PositionedGlyph>,
}

impl GlyphRun {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Sum of advances, in font units.
    pub fn total_advance(&self) -> i32 {
        self.glyphs.iter().map(|g| g.x_advance).sum()
    }

    fn scale(&self) -> f32 {
        self.size / self.units_per_em.max(1) as f32
    }

    pub fn advance_px(&self, glyph: &PositionedGlyph) -> i32 {
        (glyph.x_advance as f32 * self.scale()).round() as i32
    }

    /// Offset of the glyph from the pen position; y grows upwards.
    pub fn offset_px(&self, glyph: &PositionedGlyph) -> (i32, i32) {
        let scale = self.scale();
        (
            (glyph.x_offset as f32 * scale).round() as i32,
            (glyph.y_offset as f32 * scale).round() as i32,
        )
    }
}

/// Shape a single word. Script, direction and language are guessed from the text.
pub fn shape_word(style: &TextStyle, font: &FontRef, text: &str) -> Result<GlyphRun, ShapingError> {
    let mut b = Buffer::new();
    b.add_str(text);
    b.guess_segment_properties();
    let script = b.get_script();
    if INDIC_SCRIPTS.contains(&script) && !font.has_table(*b"GSUB") {
        return Err(ShapingError::MissingShapingTables {
            path: font.path().to_owned(),
            text: text.to_owned(),
        });
    }
    let units_per_em = font.units_per_em();
    let mut glyphs = Vec::new();
    unsafe {
        let hb_font = hb_font_create(font.hb_face.hb_face);
        hb_font_set_scale(hb_font, units_per_em as i32, units_per_em as i32);
        hb_shape(hb_font, b.as_ptr(), std::ptr::null(), 0);
        hb_font_destroy(hb_font);
        let mut n_glyph = 0;
        let glyph_infos = hb_buffer_get_glyph_infos(b.as_ptr(), &mut n_glyph);
        trace!("number of glyphs: {}", n_glyph);
        let glyph_infos = std::slice::from_raw_parts(glyph_infos, n_glyph as usize);
        let mut n_glyph_pos = 0;
        let glyph_positions = hb_buffer_get_glyph_positions(b.as_ptr(), &mut n_glyph_pos);
        let glyph_positions = std::slice::from_raw_parts(glyph_positions, n_glyph_pos as usize);
        for (info, pos) in glyph_infos.iter().zip(glyph_positions.iter()) {
            trace!(
                "{:?} {:?} {}",
                info.codepoint,
                (pos.x_offset, pos.y_offset),
                info.cluster
            );
            glyphs.push(PositionedGlyph {
                glyph_id: info.codepoint,
                cluster: info.cluster,
                x_advance: pos.x_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
            });
        }
    }

    // Glyph 0 is .notdef: the font has nothing for this text.
    if glyphs.iter().all(|g| g.glyph_id == 0) {
        return Err(ShapingError::NoGlyphs {
            text: text.to_owned(),
        });
    }
    debug!(
        "shaped {:?}: {} codepoints -> {} glyphs",
        text,
        text.chars().count(),
        glyphs.len()
    );
    Ok(GlyphRun {
        size: style.size,
        units_per_em,
        glyphs,
    })
}
