//! Quad geometry for a single positioned glyph.

use euclid::default::{Point2D, Rect, Size2D, Vector2D};

use crate::glyph::Glyph;

/// The four-corner geometric and texture-coordinate description of one
/// glyph's drawable rectangle.
///
/// Ephemeral: recomputed per glyph per layout pass and never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphQuad {
    /// Layout-space corners, `(x0, y0)` top-left through `(x1, y1)`.
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Texture-space rectangle, copied from the glyph's atlas bounds.
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
    /// Render offset used to re-center rotation/origin math; equals
    /// `(x0, y0)`.
    pub offset: Vector2D<f32>,
}

impl GlyphQuad {
    /// Places a glyph's cached metrics at the current cursor position.
    ///
    /// Pure function: no side effects, no cursor mutation. Kerning is folded
    /// into the cursor by the layout engine before this is called.
    pub fn place<T>(glyph: &Glyph<T>, cursor_x: f32, cursor_y: f32) -> Self {
        let rx = cursor_x + glyph.x_offset;
        let ry = cursor_y + glyph.y_offset;
        Self {
            x0: rx,
            y0: ry,
            x1: rx + glyph.bounds.size.width as f32,
            y1: ry + glyph.bounds.size.height as f32,
            s0: glyph.bounds.origin.x as f32,
            t0: glyph.bounds.origin.y as f32,
            s1: glyph.bounds.max_x() as f32,
            t1: glyph.bounds.max_y() as f32,
            offset: Vector2D::new(rx, ry),
        }
    }

    /// Atlas source rectangle, truncated to integer pixels.
    pub fn source_rect(&self) -> Rect<i32> {
        Rect::new(
            Point2D::new(self.s0 as i32, self.t0 as i32),
            Size2D::new((self.s1 - self.s0) as i32, (self.t1 - self.t0) as i32),
        )
    }

    /// Layout-space rectangle, truncated to integer pixels.
    pub fn layout_rect(&self) -> Rect<i32> {
        Rect::new(
            Point2D::new(self.x0 as i32, self.y0 as i32),
            Size2D::new((self.x1 - self.x0) as i32, (self.y1 - self.y0) as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph() -> Glyph<()> {
        Glyph {
            codepoint: u32::from('A'),
            id: 1,
            x_advance: 10.0,
            x_offset: 1.0,
            y_offset: -6.0,
            bounds: Rect::new(Point2D::new(64, 32), Size2D::new(8, 9)),
            texture: None,
        }
    }

    #[test]
    fn corners_follow_cursor_and_bearings() {
        let q = GlyphQuad::place(&glyph(), 100.0, 50.0);
        assert_eq!((q.x0, q.y0), (101.0, 44.0));
        assert_eq!((q.x1, q.y1), (109.0, 53.0));
        assert_eq!(q.offset, Vector2D::new(101.0, 44.0));
    }

    #[test]
    fn texture_rect_copies_atlas_bounds() {
        let q = GlyphQuad::place(&glyph(), 0.0, 0.0);
        assert_eq!((q.s0, q.t0, q.s1, q.t1), (64.0, 32.0, 72.0, 41.0));
        let src = q.source_rect();
        assert_eq!(src.origin, Point2D::new(64, 32));
        assert_eq!(src.size, Size2D::new(8, 9));
    }
}
