//! A font source paired with its kerning memo.

use std::sync::Arc;

use crate::kerning::KerningCache;
use crate::sized::SizedFont;
use crate::source::FontSource;
use crate::ttf::{FontError, TtfFontSource};

/// One font source plus the pairwise kerning cache that lives alongside it.
///
/// Shared across all pixel sizes derived from the same outline data; the
/// kerning cache stores font units, so every [`SizedFont`] reuses the same
/// entries.
pub struct FontFace {
    source: Arc<dyn FontSource>,
    kernings: KerningCache,
}

impl FontFace {
    /// Parses TTF/OTF data into a face backed by [`TtfFontSource`].
    pub fn from_bytes(data: &[u8]) -> Result<Arc<Self>, FontError> {
        Ok(Self::from_source(Arc::new(TtfFontSource::from_bytes(data)?)))
    }

    /// Wraps any font source capability.
    ///
    /// The implementation is chosen here, at construction time; everything
    /// downstream goes through the trait object.
    pub fn from_source(source: Arc<dyn FontSource>) -> Arc<Self> {
        Arc::new(Self {
            source,
            kernings: KerningCache::new(),
        })
    }

    pub fn source(&self) -> &Arc<dyn FontSource> {
        &self.source
    }

    pub fn kernings(&self) -> &KerningCache {
        &self.kernings
    }

    /// Kerning between two glyphs in pixels at the given size, memoized in
    /// font units.
    pub(crate) fn kern_pixels(&self, left: u16, right: u16, font_size: f32) -> i32 {
        let scale = font_size / self.source.units_per_em();
        self.kernings
            .lookup(left, right, scale, || self.source.kern_advance(left, right))
    }

    /// Derives a sized font, resolving line metrics for `font_size` once.
    ///
    /// `T` is the atlas texture handle of the renderer this font will be
    /// drawn with.
    pub fn sized<T: Clone>(self: &Arc<Self>, font_size: f32) -> SizedFont<T> {
        SizedFont::new(Arc::clone(self), font_size)
    }
}
