//! Font source capability consumed by the metrics and layout code.

/// Vertical metrics of a font at a specific pixel size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of a line to the baseline. Positive, y-down.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of a line. Typically negative.
    pub descent: f32,
    /// Vertical distance between the baselines of successive lines.
    pub line_height: f32,
}

/// Raw per-glyph metrics at a specific pixel size, before any filter margin
/// is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal cursor advance in pixels.
    pub advance: f32,
    /// Left bearing of the bitmap box relative to the cursor.
    pub x_min: i32,
    /// Bottom of the bitmap box relative to the baseline, y-up as reported by
    /// the rasterizer.
    pub y_min: i32,
    /// Bitmap width in pixels.
    pub width: usize,
    /// Bitmap height in pixels.
    pub height: usize,
}

/// Capability interface over a font's native outline data.
///
/// One implementation exists per font variant and is selected at
/// construction time; the layout core never branches on the backing
/// rasterizer. [`crate::ttf::TtfFontSource`] is the built-in implementation.
pub trait FontSource: Send + Sync {
    /// Line metrics scaled for the given pixel size.
    fn metrics_for_size(&self, font_size: f32) -> LineMetrics;

    /// Looks up the font-internal glyph index for a codepoint.
    ///
    /// Returns `None` when the font has no glyph for the codepoint; this is
    /// not an error and layout skips such codepoints.
    fn glyph_id_for(&self, codepoint: u32) -> Option<u16>;

    /// Advance and bitmap bounding box for a glyph at the given pixel size.
    fn glyph_metrics(&self, id: u16, font_size: f32) -> GlyphMetrics;

    /// Unscaled kerning between two adjacent glyphs, in font units.
    ///
    /// Callers scale the result by `font_size / units_per_em()`; results are
    /// memoized per glyph pair by [`crate::kerning::KerningCache`].
    fn kern_advance(&self, left: u16, right: u16) -> i32;

    /// Font units per em square, the divisor for pixel-space scaling.
    fn units_per_em(&self) -> f32;

    /// Rasterizes a glyph's coverage bitmap into `dest`.
    ///
    /// Rows are written at `stride`-byte intervals starting at `dest[0]`, so
    /// the caller can place the bitmap at an interior offset of a larger
    /// buffer. Idempotent; invoked only when an atlas needs the bitmap.
    fn rasterize(&self, id: u16, font_size: f32, dest: &mut [u8], stride: usize);
}
