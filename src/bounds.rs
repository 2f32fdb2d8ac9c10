//! Axis-aligned bounds accumulation over glyph quads.

use euclid::default::Vector2D;

use crate::quad::GlyphQuad;

/// Axis-aligned rectangle in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.x2 - self.x
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y
    }

    /// Scales all four fields by a 2D factor.
    ///
    /// Layout always runs in unscaled font-pixel space; this is applied as a
    /// final separate step.
    pub fn apply_scale(&mut self, scale: Vector2D<f32>) {
        self.x *= scale.x;
        self.y *= scale.y;
        self.x2 *= scale.x;
        self.y2 *= scale.y;
    }
}

/// Folds glyph quads into a running min/max rectangle.
///
/// Seeded by the first glyph's own quad rather than the cursor start, so
/// leading whitespace before any glyph does not bias the bounds. The
/// accumulated `x2` also tracks the post-advance cursor so trailing advance
/// (e.g. a space) counts toward whole-string width.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsAccumulator {
    bounds: Option<Bounds>,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_quad(&mut self, quad: &GlyphQuad) {
        match &mut self.bounds {
            Some(bounds) => {
                bounds.x = bounds.x.min(quad.x0);
                bounds.y = bounds.y.min(quad.y0);
                bounds.x2 = bounds.x2.max(quad.x1);
                bounds.y2 = bounds.y2.max(quad.y1);
            }
            None => {
                self.bounds = Some(Bounds {
                    x: quad.x0,
                    y: quad.y0,
                    x2: quad.x1,
                    y2: quad.y1,
                });
            }
        }
    }

    /// Extends the right edge to the cursor position after an advance.
    pub fn extend_right(&mut self, cursor_x: f32) {
        if let Some(bounds) = &mut self.bounds {
            bounds.x2 = bounds.x2.max(cursor_x);
        }
    }

    /// Final rectangle; `(0, 0, 0, 0)` when nothing was accumulated.
    pub fn finish(self) -> Bounds {
        self.bounds.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32) -> GlyphQuad {
        GlyphQuad {
            x0,
            y0,
            x1,
            y1,
            ..GlyphQuad::default()
        }
    }

    #[test]
    fn first_quad_seeds_the_rectangle() {
        let mut acc = BoundsAccumulator::new();
        acc.add_quad(&quad(5.0, 2.0, 9.0, 8.0));
        assert_eq!(
            acc.finish(),
            Bounds {
                x: 5.0,
                y: 2.0,
                x2: 9.0,
                y2: 8.0
            }
        );
    }

    #[test]
    fn quads_fold_component_wise() {
        let mut acc = BoundsAccumulator::new();
        acc.add_quad(&quad(5.0, 2.0, 9.0, 8.0));
        acc.add_quad(&quad(-1.0, 4.0, 6.0, 12.0));
        let bounds = acc.finish();
        assert_eq!(bounds, Bounds { x: -1.0, y: 2.0, x2: 9.0, y2: 12.0 });
    }

    #[test]
    fn cursor_extends_width_beyond_last_quad() {
        let mut acc = BoundsAccumulator::new();
        acc.add_quad(&quad(0.0, 0.0, 8.0, 8.0));
        acc.extend_right(10.0);
        assert_eq!(acc.finish().x2, 10.0);
    }

    #[test]
    fn cursor_alone_never_seeds_bounds() {
        let mut acc = BoundsAccumulator::new();
        acc.extend_right(42.0);
        assert_eq!(acc.finish(), Bounds::default());
    }

    #[test]
    fn scale_applies_to_all_fields() {
        let mut bounds = Bounds {
            x: 1.0,
            y: 2.0,
            x2: 3.0,
            y2: 4.0,
        };
        bounds.apply_scale(Vector2D::new(2.0, 0.5));
        assert_eq!(
            bounds,
            Bounds {
                x: 2.0,
                y: 1.0,
                x2: 6.0,
                y2: 2.0
            }
        );
    }
}
