//! The font collection type.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CloudError, ShapingError};
use crate::hb_layout::HbFace;
use crate::Font;

/// The fonts a cloud may draw from, in configuration order.
///
/// A font that fails to load keeps its slot so that the random font choice stays
/// uniform over the configured list; words that land on it are skipped.
pub struct FontCollection {
    slots: Vec<FontSlot>,
}

enum FontSlot {
    Loaded(FontRef),
    Failed { path: PathBuf, reason: String },
}

/// A loaded font together with its HarfBuzz face.
#[derive(Clone)]
pub struct FontRef {
    pub(crate) font: Arc<Font>,
    pub(crate) hb_face: HbFace,
    path: PathBuf,
}

impl FontRef {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FontRef, ShapingError> {
        let path = path.as_ref();
        let load_err = |reason: String| ShapingError::FontLoad {
            path: path.to_owned(),
            reason,
        };
        let font = Font::from_path(path, 0).map_err(|e| load_err(e.to_string()))?;
        let data = font
            .copy_font_data()
            .ok_or_else(|| load_err("font data unavailable".into()))?;
        Ok(FontRef {
            font: Arc::new(font),
            hb_face: HbFace::new(data),
            path: path.to_owned(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn units_per_em(&self) -> u32 {
        self.font.metrics().units_per_em
    }

    pub fn has_table(&self, tag: [u8; 4]) -> bool {
        self.font.load_font_table(u32::from_be_bytes(tag)).is_some()
    }
}

impl FontCollection {
    /// Load every path. Fails only if the list is empty.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<FontCollection, CloudError> {
        if paths.is_empty() {
            return Err(CloudError::NoFonts);
        }
        let slots = paths
            .iter()
            .map(|p| match FontRef::from_path(p) {
                Ok(font) => {
                    debug!("loaded font {:?}", font.path());
                    FontSlot::Loaded(font)
                }
                Err(e) => {
                    warn!("{}", e);
                    FontSlot::Failed {
                        path: p.as_ref().to_owned(),
                        reason: e.to_string(),
                    }
                }
            })
            .collect();
        Ok(FontCollection { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&FontRef, ShapingError> {
        match &self.slots[index] {
            FontSlot::Loaded(font) => Ok(font),
            FontSlot::Failed { path, reason } => Err(ShapingError::FontLoad {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }
}
