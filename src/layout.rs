//! Line layout engine and the text operations built on it.
//!
//! One engine drives every consumer: drawing, bounds measurement, and
//! hit-rectangle queries all observe the identical cursor trajectory for the
//! same input, so measuring and drawing can never disagree on geometry.

use euclid::default::{Point2D, Rect, Size2D, Vector2D};

use crate::bounds::{Bounds, BoundsAccumulator};
use crate::codepoint::{Codepoints, TextBuffer};
use crate::glyph::Glyph;
use crate::quad::GlyphQuad;
use crate::renderer::{Color, TextRenderer, TextStyle};
use crate::sized::{GlyphResolver, SizedFont};

const LINE_FEED: u32 = '\n' as u32;

/// 2D layout cursor, scoped to a single pass.
///
/// Starts at `(start.x, start.y + ascent)`; a line feed resets x to the line
/// start and advances y by exactly one line height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    line_start: f32,
    line_height: f32,
}

impl Cursor {
    fn new(start: Point2D<f32>, ascent: f32, line_height: f32) -> Self {
        Self {
            x: start.x,
            y: start.y + ascent,
            line_start: start.x,
            line_height,
        }
    }

    fn newline(&mut self) {
        self.x = self.line_start;
        self.y += self.line_height;
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Consumer seam of the layout engine.
///
/// `resolve` and `kern` feed the engine; `on_glyph` observes each placed
/// glyph with its quad and the post-advance cursor.
pub(crate) trait LayoutSink<T> {
    fn resolve(&mut self, codepoint: u32) -> Option<Glyph<T>>;
    fn kern(&mut self, left: u16, right: u16) -> i32;
    fn on_glyph(&mut self, pos: usize, glyph: &Glyph<T>, quad: &GlyphQuad, cursor: &Cursor);
}

/// Drives the decoder across the text, threading kerning context between
/// adjacent glyphs.
///
/// `pos` passed to the sink counts every decoded codepoint — line feeds and
/// unresolved codepoints included — so positional per-glyph arrays supplied
/// by callers stay aligned. Kerning between the previous and current glyph
/// is added to the cursor before the current glyph is placed; a line feed
/// clears the previous glyph, so kerning never crosses a line break.
pub(crate) fn layout_pass<B, T, S>(
    text: &B,
    start: Point2D<f32>,
    ascent: f32,
    line_height: f32,
    sink: &mut S,
) where
    B: TextBuffer + ?Sized,
    S: LayoutSink<T>,
{
    let mut cursor = Cursor::new(start, ascent, line_height);
    let mut prev: Option<Glyph<T>> = None;

    for (pos, (codepoint, _width)) in Codepoints::new(text).enumerate() {
        if codepoint == LINE_FEED {
            cursor.newline();
            prev = None;
            continue;
        }

        let Some(glyph) = sink.resolve(codepoint) else {
            // no glyph in the font: skip without moving the cursor, but the
            // positional index above still advanced
            continue;
        };

        if let Some(prev) = &prev {
            cursor.x += sink.kern(prev.id, glyph.id) as f32;
        }

        let quad = GlyphQuad::place(&glyph, cursor.x, cursor.y);
        cursor.x += glyph.x_advance;
        sink.on_glyph(pos, &glyph, &quad, &cursor);
        prev = Some(glyph);
    }
}

#[derive(Clone, Copy)]
enum ColorSource<'a> {
    Uniform(Color),
    PerGlyph(&'a [Color]),
}

struct DrawSink<'a, R: TextRenderer> {
    resolver: GlyphResolver<'a, R::Texture>,
    renderer: &'a mut R,
    position: Point2D<f32>,
    colors: ColorSource<'a>,
    rotation: f32,
    origin: Vector2D<f32>,
    scale: Vector2D<f32>,
    layer_depth: f32,
    origin_factor: f32,
}

impl<R: TextRenderer> LayoutSink<R::Texture> for DrawSink<'_, R> {
    fn resolve(&mut self, codepoint: u32) -> Option<Glyph<R::Texture>> {
        self.resolver.rendered(self.renderer.atlas(), codepoint)
    }

    fn kern(&mut self, left: u16, right: u16) -> i32 {
        self.resolver.kern(left, right)
    }

    fn on_glyph(
        &mut self,
        pos: usize,
        glyph: &Glyph<R::Texture>,
        quad: &GlyphQuad,
        _cursor: &Cursor,
    ) {
        if glyph.is_empty() {
            return;
        }
        let Some(texture) = &glyph.texture else {
            return;
        };
        let color = match self.colors {
            ColorSource::Uniform(color) => color,
            // positional array: the caller guarantees coverage for every
            // index that reaches a visible glyph
            ColorSource::PerGlyph(colors) => colors[pos],
        };
        self.renderer.draw(
            texture,
            self.position,
            quad.source_rect(),
            color,
            self.rotation,
            self.origin * self.origin_factor - quad.offset,
            self.scale,
            self.layer_depth,
        );
    }
}

struct BoundsSink<'a, T> {
    resolver: GlyphResolver<'a, T>,
    acc: BoundsAccumulator,
}

impl<T: Clone> LayoutSink<T> for BoundsSink<'_, T> {
    fn resolve(&mut self, codepoint: u32) -> Option<Glyph<T>> {
        self.resolver.metrics(codepoint)
    }

    fn kern(&mut self, left: u16, right: u16) -> i32 {
        self.resolver.kern(left, right)
    }

    fn on_glyph(&mut self, _pos: usize, glyph: &Glyph<T>, quad: &GlyphQuad, cursor: &Cursor) {
        // empty glyphs contribute advance but no box, so leading whitespace
        // never seeds the rectangle
        if !glyph.is_empty() {
            self.acc.add_quad(quad);
        }
        // advance may exceed the visible box (e.g. space)
        self.acc.extend_right(cursor.x);
    }
}

struct RectsSink<'a, T> {
    resolver: GlyphResolver<'a, T>,
    scale: Vector2D<f32>,
    rects: Vec<Rect<i32>>,
}

impl<T: Clone> LayoutSink<T> for RectsSink<'_, T> {
    fn resolve(&mut self, codepoint: u32) -> Option<Glyph<T>> {
        self.resolver.metrics(codepoint)
    }

    fn kern(&mut self, left: u16, right: u16) -> i32 {
        self.resolver.kern(left, right)
    }

    fn on_glyph(&mut self, _pos: usize, _glyph: &Glyph<T>, quad: &GlyphQuad, _cursor: &Cursor) {
        self.rects.push(scale_rect(quad.layout_rect(), self.scale));
    }
}

struct CallbackSink<'a, T, F> {
    resolver: GlyphResolver<'a, T>,
    on_glyph: F,
}

impl<T: Clone, F> LayoutSink<T> for CallbackSink<'_, T, F>
where
    F: FnMut(usize, &Glyph<T>, &GlyphQuad, &Cursor),
{
    fn resolve(&mut self, codepoint: u32) -> Option<Glyph<T>> {
        self.resolver.metrics(codepoint)
    }

    fn kern(&mut self, left: u16, right: u16) -> i32 {
        self.resolver.kern(left, right)
    }

    fn on_glyph(&mut self, pos: usize, glyph: &Glyph<T>, quad: &GlyphQuad, cursor: &Cursor) {
        (self.on_glyph)(pos, glyph, quad, cursor)
    }
}

fn scale_rect(rect: Rect<i32>, scale: Vector2D<f32>) -> Rect<i32> {
    Rect::new(
        Point2D::new(
            (rect.origin.x as f32 * scale.x) as i32,
            (rect.origin.y as f32 * scale.y) as i32,
        ),
        Size2D::new(
            (rect.size.width as f32 * scale.x) as i32,
            (rect.size.height as f32 * scale.y) as i32,
        ),
    )
}

/// Text operations.
///
/// All of these run the same layout pass; they differ only in the sink that
/// consumes placed glyphs. Empty text is a no-op that touches no external
/// capability.
impl<T: Clone> SizedFont<T> {
    /// Draws text with one color mask for every glyph.
    ///
    /// Returns the x coordinate of the draw position. Missing glyph bitmaps
    /// are rasterized into the renderer's atlas on the way.
    pub fn draw_text<B, R>(
        &mut self,
        renderer: &mut R,
        text: &B,
        position: Point2D<f32>,
        color: Color,
        style: &TextStyle,
    ) -> f32
    where
        B: TextBuffer + ?Sized,
        R: TextRenderer<Texture = T>,
    {
        self.draw_with(renderer, text, position, ColorSource::Uniform(color), style)
    }

    /// Draws text with a positional per-glyph color array.
    ///
    /// The array is indexed by decoded codepoint position: line feeds and
    /// codepoints the font cannot resolve each consume one slot even though
    /// nothing is drawn for them. It must have an entry for every position
    /// that reaches a visible glyph; a shorter array panics on access.
    pub fn draw_text_colored<B, R>(
        &mut self,
        renderer: &mut R,
        text: &B,
        position: Point2D<f32>,
        colors: &[Color],
        style: &TextStyle,
    ) -> f32
    where
        B: TextBuffer + ?Sized,
        R: TextRenderer<Texture = T>,
    {
        self.draw_with(renderer, text, position, ColorSource::PerGlyph(colors), style)
    }

    fn draw_with<B, R>(
        &mut self,
        renderer: &mut R,
        text: &B,
        position: Point2D<f32>,
        colors: ColorSource<'_>,
        style: &TextStyle,
    ) -> f32
    where
        B: TextBuffer + ?Sized,
        R: TextRenderer<Texture = T>,
    {
        if text.is_empty() {
            return 0.0;
        }

        let metrics = self.line_metrics();
        let factor = self.resolution_factor();
        let mut sink = DrawSink {
            resolver: self.resolver(),
            renderer,
            position,
            colors,
            rotation: style.rotation,
            origin: style.origin,
            scale: style.scale / factor,
            layer_depth: style.layer_depth,
            origin_factor: factor,
        };
        // the cursor runs in text-local space; `position` is forwarded to
        // the renderer with each draw command
        layout_pass(
            text,
            Point2D::zero(),
            metrics.ascent,
            metrics.line_height,
            &mut sink,
        );
        position.x
    }

    /// Bounding rectangle of the laid-out text, scaled as a final step.
    pub fn text_bounds<B>(
        &mut self,
        text: &B,
        position: Point2D<f32>,
        scale: Vector2D<f32>,
    ) -> Bounds
    where
        B: TextBuffer + ?Sized,
    {
        let factor = self.resolution_factor();
        let mut bounds = self.raw_bounds(text, position);
        bounds.apply_scale(scale / factor);
        bounds
    }

    /// Measures the size of the laid-out text at the origin.
    pub fn measure<B>(&mut self, text: &B) -> Vector2D<f32>
    where
        B: TextBuffer + ?Sized,
    {
        let bounds = self.text_bounds(text, Point2D::zero(), Vector2D::new(1.0, 1.0));
        Vector2D::new(bounds.x2, bounds.y2)
    }

    /// One hit-testing rectangle per resolved glyph, empty glyphs included.
    pub fn glyph_rects<B>(
        &mut self,
        text: &B,
        position: Point2D<f32>,
        scale: Vector2D<f32>,
    ) -> Vec<Rect<i32>>
    where
        B: TextBuffer + ?Sized,
    {
        if text.is_empty() {
            return Vec::new();
        }

        let metrics = self.line_metrics();
        let scale = scale / self.resolution_factor();
        let mut sink = RectsSink {
            resolver: self.resolver(),
            scale,
            rects: Vec::new(),
        };
        layout_pass(text, position, metrics.ascent, metrics.line_height, &mut sink);
        sink.rects
    }

    /// Runs a metrics-only layout pass, invoking `on_glyph` once per
    /// resolved, non-newline glyph with its positional index, quad, and the
    /// post-advance cursor.
    pub fn layout<B, F>(&mut self, text: &B, on_glyph: F)
    where
        B: TextBuffer + ?Sized,
        F: FnMut(usize, &Glyph<T>, &GlyphQuad, &Cursor),
    {
        if text.is_empty() {
            return;
        }

        let metrics = self.line_metrics();
        let mut sink = CallbackSink {
            resolver: self.resolver(),
            on_glyph,
        };
        layout_pass(
            text,
            Point2D::zero(),
            metrics.ascent,
            metrics.line_height,
            &mut sink,
        );
    }

    fn raw_bounds<B>(&mut self, text: &B, position: Point2D<f32>) -> Bounds
    where
        B: TextBuffer + ?Sized,
    {
        if text.is_empty() {
            return Bounds::default();
        }

        let metrics = self.line_metrics();
        let mut sink = BoundsSink {
            resolver: self.resolver(),
            acc: BoundsAccumulator::new(),
        };
        layout_pass(text, position, metrics.ascent, metrics.line_height, &mut sink);
        sink.acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_on_the_baseline() {
        let cursor = Cursor::new(Point2D::new(3.0, 4.0), 24.0, 36.0);
        assert_eq!(cursor.x, 3.0);
        assert_eq!(cursor.y, 28.0);
    }

    #[test]
    fn newline_resets_x_and_advances_y() {
        let mut cursor = Cursor::new(Point2D::new(3.0, 0.0), 24.0, 36.0);
        cursor.x = 100.0;
        cursor.newline();
        assert_eq!(cursor.x, 3.0);
        assert_eq!(cursor.y, 60.0);
        cursor.newline();
        assert_eq!(cursor.y, 96.0);
    }

    #[test]
    fn rect_scaling_truncates_like_integer_pixels() {
        let rect = Rect::new(Point2D::new(3, 5), Size2D::new(7, 9));
        let scaled = scale_rect(rect, Vector2D::new(0.5, 2.0));
        assert_eq!(scaled.origin, Point2D::new(1, 10));
        assert_eq!(scaled.size, Size2D::new(3, 18));
    }
}
