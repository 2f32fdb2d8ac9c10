//! Per-size glyph metrics derivation and the rasterization bridge.

use std::collections::HashMap;
use std::sync::Arc;

use euclid::default::{Point2D, Rect, Size2D};

use crate::face::FontFace;
use crate::glyph::Glyph;
use crate::renderer::TextureManager;
use crate::source::LineMetrics;

/// A font face fixed at one pixel size.
///
/// Owns the per-size glyph table: metrics are computed on first request for a
/// codepoint and are immutable afterward. Unresolvable codepoints are cached
/// as `None` so repeated misses never re-query the source. Bitmaps are never
/// cached here; the atlas texture handle recorded per glyph is the only
/// rasterization state.
pub struct SizedFont<T> {
    face: Arc<FontFace>,
    font_size: f32,
    line: LineMetrics,
    /// Extra border reserved around each bitmap box for post-processing
    /// filters (blur, stroke) applied during rasterization.
    filter_margin: Size2D<i32>,
    /// Render-scale multiplier; caller scale vectors are divided by this and
    /// rotation origins multiplied by it.
    resolution_factor: f32,
    glyphs: HashMap<u32, Option<Glyph<T>>, fxhash::FxBuildHasher>,
}

impl<T: Clone> SizedFont<T> {
    pub(crate) fn new(face: Arc<FontFace>, font_size: f32) -> Self {
        let line = face.source().metrics_for_size(font_size);
        Self {
            face,
            font_size,
            line,
            filter_margin: Size2D::zero(),
            resolution_factor: 1.0,
            glyphs: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Sets the horizontal/vertical filter margin in pixels.
    ///
    /// Clears the glyph table, since cached boxes already include the old
    /// margin.
    pub fn set_filter_margin(&mut self, margin: Size2D<i32>) {
        if margin != self.filter_margin {
            self.filter_margin = margin;
            self.glyphs.clear();
        }
    }

    pub fn set_resolution_factor(&mut self, factor: f32) {
        self.resolution_factor = factor;
    }

    pub fn face(&self) -> &Arc<FontFace> {
        &self.face
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_metrics(&self) -> LineMetrics {
        self.line
    }

    pub fn ascent(&self) -> f32 {
        self.line.ascent
    }

    pub fn line_height(&self) -> f32 {
        self.line.line_height
    }

    pub fn resolution_factor(&self) -> f32 {
        self.resolution_factor
    }

    /// Resolves metrics for a codepoint without touching any atlas.
    ///
    /// Returns `None` when the font has no glyph for the codepoint.
    pub fn glyph(&mut self, codepoint: u32) -> Option<Glyph<T>> {
        self.resolver().metrics(codepoint)
    }

    /// Drops all cached glyph records, including their atlas references.
    pub fn clear_cache(&mut self) {
        self.glyphs.clear();
    }

    pub(crate) fn resolver(&mut self) -> GlyphResolver<'_, T> {
        GlyphResolver {
            face: &self.face,
            font_size: self.font_size,
            filter_margin: self.filter_margin,
            glyphs: &mut self.glyphs,
        }
    }
}

/// Borrowed view of a [`SizedFont`] used by one layout pass.
///
/// Splitting the borrow this way lets the draw path hold the renderer
/// mutably while glyphs resolve through the same table.
pub(crate) struct GlyphResolver<'a, T> {
    face: &'a Arc<FontFace>,
    font_size: f32,
    filter_margin: Size2D<i32>,
    glyphs: &'a mut HashMap<u32, Option<Glyph<T>>, fxhash::FxBuildHasher>,
}

impl<T: Clone> GlyphResolver<'_, T> {
    /// Metrics-only resolution; never invokes the texture manager.
    pub(crate) fn metrics(&mut self, codepoint: u32) -> Option<Glyph<T>> {
        if let Some(cached) = self.glyphs.get(&codepoint) {
            return cached.clone();
        }
        let built = self.build(codepoint);
        self.glyphs.insert(codepoint, built.clone());
        built
    }

    /// Resolution for the draw path: ensures non-empty glyphs have an atlas
    /// region and a rasterized bitmap behind them.
    pub(crate) fn rendered<M>(&mut self, atlas: &mut M, codepoint: u32) -> Option<Glyph<T>>
    where
        M: TextureManager<Texture = T>,
    {
        let mut glyph = self.metrics(codepoint)?;
        if glyph.texture.is_none() && !glyph.is_empty() {
            self.upload(atlas, &mut glyph);
            self.glyphs.insert(codepoint, Some(glyph.clone()));
        }
        Some(glyph)
    }

    pub(crate) fn kern(&self, left: u16, right: u16) -> i32 {
        self.face.kern_pixels(left, right, self.font_size)
    }

    fn build(&self, codepoint: u32) -> Option<Glyph<T>> {
        let source = self.face.source();
        let id = source.glyph_id_for(codepoint)?;
        let metrics = source.glyph_metrics(id, self.font_size);
        let margin = self.filter_margin;
        Some(Glyph {
            codepoint,
            id,
            x_advance: metrics.advance,
            x_offset: (metrics.x_min - margin.width) as f32,
            // the rasterizer reports the box y-up from the baseline; layout
            // runs y-down with the cursor on the baseline
            y_offset: -((metrics.y_min + metrics.height as i32) as f32) - margin.height as f32,
            bounds: Rect::new(
                Point2D::zero(),
                Size2D::new(
                    metrics.width as i32 + margin.width * 2,
                    metrics.height as i32 + margin.height * 2,
                ),
            ),
            texture: None,
        })
    }

    fn upload<M>(&self, atlas: &mut M, glyph: &mut Glyph<T>)
    where
        M: TextureManager<Texture = T>,
    {
        let width = glyph.bounds.size.width as usize;
        let height = glyph.bounds.size.height as usize;
        let (texture, corner) = atlas.allocate(width as u32, height as u32);
        glyph.bounds.origin = corner;

        // rasterize into the interior, leaving the filter margin blank
        let mut pixels = vec![0u8; width * height];
        let margin_x = self.filter_margin.width as usize;
        let margin_y = self.filter_margin.height as usize;
        self.face.source().rasterize(
            glyph.id,
            self.font_size,
            &mut pixels[margin_y * width + margin_x..],
            width,
        );

        atlas.upload(&texture, &glyph.bounds, &pixels);
        glyph.texture = Some(texture);
    }
}
