//! `fontdue`-backed [`FontSource`] implementation.

use parking_lot::RwLock;

use crate::source::{FontSource, GlyphMetrics, LineMetrics};

/// Error raised when a font cannot be constructed from its raw data.
///
/// Construction failures are fatal: no `TtfFontSource` value exists
/// afterward, so a partially-parsed font can never be used.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to parse font data: {0}")]
    Parse(&'static str),
}

/// Shared slot holding a value until it is explicitly released.
///
/// Release is idempotent: the first [`Self::dispose`] empties the slot,
/// later calls find it already empty. Accessing an emptied slot panics.
struct DisposeSlot<T> {
    value: RwLock<Option<T>>,
}

impl<T> DisposeSlot<T> {
    fn new(value: T) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    /// Empties the slot. Returns whether this call did the emptying.
    fn dispose(&self) -> bool {
        self.value.write().take().is_some()
    }

    fn is_disposed(&self) -> bool {
        self.value.read().is_none()
    }

    /// Whether the slot still holds its value; needs `&mut`, lock-free.
    fn holds(&mut self) -> bool {
        self.value.get_mut().is_some()
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.value.read().as_ref() {
            Some(value) => f(value),
            None => panic!("ttf font source used after dispose"),
        }
    }
}

/// A TrueType/OpenType font source backed by `fontdue`.
///
/// The parsed font is held behind an [`RwLock`] so the handle can be released
/// explicitly while shared; see [`Self::dispose`].
pub struct TtfFontSource {
    font: DisposeSlot<fontdue::Font>,
    units_per_em: f32,
}

impl TtfFontSource {
    /// Parses a font from raw TTF/OTF data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(FontError::Parse)?;
        Ok(Self {
            units_per_em: font.units_per_em(),
            font: DisposeSlot::new(font),
        })
    }

    /// Wraps an already-parsed `fontdue` font.
    pub fn from_font(font: fontdue::Font) -> Self {
        Self {
            units_per_em: font.units_per_em(),
            font: DisposeSlot::new(font),
        }
    }

    /// Releases the parsed font data.
    ///
    /// Idempotent: disposing an already-disposed source is a no-op. Any
    /// metric or rasterization call after disposal panics.
    pub fn dispose(&self) {
        if self.font.dispose() {
            log::trace!("ttf font source released");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.font.is_disposed()
    }

    fn with_font<R>(&self, f: impl FnOnce(&fontdue::Font) -> R) -> R {
        self.font.with(f)
    }
}

impl Drop for TtfFontSource {
    fn drop(&mut self) {
        if self.font.holds() {
            log::trace!("ttf font source dropped without explicit dispose");
        }
    }
}

impl FontSource for TtfFontSource {
    fn metrics_for_size(&self, font_size: f32) -> LineMetrics {
        self.with_font(|font| match font.horizontal_line_metrics(font_size) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                descent: metrics.descent,
                line_height: metrics.new_line_size,
            },
            None => {
                log::warn!("font provides no horizontal line metrics");
                LineMetrics::default()
            }
        })
    }

    fn glyph_id_for(&self, codepoint: u32) -> Option<u16> {
        let ch = char::from_u32(codepoint)?;
        self.with_font(|font| {
            let index = font.lookup_glyph_index(ch);
            // fontdue reports the .notdef glyph as index 0
            (index != 0).then_some(index)
        })
    }

    fn glyph_metrics(&self, id: u16, font_size: f32) -> GlyphMetrics {
        self.with_font(|font| {
            let metrics = font.metrics_indexed(id, font_size);
            GlyphMetrics {
                advance: metrics.advance_width,
                x_min: metrics.xmin,
                y_min: metrics.ymin,
                width: metrics.width,
                height: metrics.height,
            }
        })
    }

    fn kern_advance(&self, left: u16, right: u16) -> i32 {
        // querying at px == units_per_em makes fontdue's scale factor 1,
        // which yields the kerning in raw font units
        self.with_font(|font| {
            font.horizontal_kern_indexed(left, right, self.units_per_em)
                .unwrap_or(0.0)
                .round() as i32
        })
    }

    fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    fn rasterize(&self, id: u16, font_size: f32, dest: &mut [u8], stride: usize) {
        self.with_font(|font| {
            let (metrics, coverage) = font.rasterize_indexed(id, font_size);
            for row in 0..metrics.height {
                let src = &coverage[row * metrics.width..(row + 1) * metrics.width];
                dest[row * stride..row * stride + metrics.width].copy_from_slice(src);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_data_fails_at_construction() {
        let result = TtfFontSource::from_bytes(&[0u8; 16]);
        assert!(matches!(result, Err(FontError::Parse(_))));
    }

    #[test]
    fn slot_access_yields_the_held_value() {
        let slot = DisposeSlot::new(7u32);
        assert!(!slot.is_disposed());
        assert_eq!(slot.with(|v| *v), 7);
    }

    #[test]
    fn dispose_is_idempotent() {
        let slot = DisposeSlot::new(7u32);

        assert!(slot.dispose());
        assert!(slot.is_disposed());

        // second release finds the slot already empty
        assert!(!slot.dispose());
        assert!(slot.is_disposed());
    }

    #[test]
    #[should_panic(expected = "used after dispose")]
    fn access_after_dispose_panics() {
        let slot = DisposeSlot::new(7u32);
        slot.dispose();
        slot.with(|v| *v);
    }

    #[test]
    fn drop_detects_an_undisposed_slot() {
        let mut live = DisposeSlot::new(7u32);
        assert!(live.holds());

        let mut released = DisposeSlot::new(7u32);
        released.dispose();
        assert!(!released.holds());
    }
}
