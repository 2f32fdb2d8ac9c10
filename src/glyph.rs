//! Per-size glyph records.

use euclid::default::Rect;

/// Metrics and atlas placement for one glyph at one font size.
///
/// Created on first request for a (face, size, codepoint) triple and cached
/// by [`crate::sized::SizedFont`]; the metric fields never change afterward.
/// `T` is the opaque atlas texture handle of the hosting backend; it stays
/// `None` until a draw pass rasterizes the glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph<T> {
    /// Unicode scalar value this glyph was resolved from.
    pub codepoint: u32,
    /// Font-internal glyph index, distinct from the codepoint.
    pub id: u16,
    /// Horizontal cursor advance in pixels.
    pub x_advance: f32,
    /// Horizontal bearing from the cursor to the quad's left edge.
    pub x_offset: f32,
    /// Vertical bearing from the baseline to the quad's top edge, y-down.
    pub y_offset: f32,
    /// Atlas region in pixel space, widened by the filter margin. The origin
    /// is assigned when the glyph is first rasterized.
    pub bounds: Rect<i32>,
    /// Backing atlas texture, populated lazily on the draw path.
    pub texture: Option<T>,
}

impl<T> Glyph<T> {
    /// Whether the glyph has a zero-area bitmap box (e.g. a space).
    ///
    /// Empty glyphs still advance the cursor but are never rasterized or
    /// drawn.
    pub fn is_empty(&self) -> bool {
        self.bounds.size.width == 0 || self.bounds.size.height == 0
    }
}
