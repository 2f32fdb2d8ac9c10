//! Drawing and texture-manager capabilities consumed by the draw path.
//!
//! The layout core is backend-agnostic: the hosting renderer implements these
//! traits and the native texture handle is resolved through the associated
//! type at construction time, never through compile-time branching.

use euclid::default::{Point2D, Rect, Vector2D};

/// RGBA color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// Transform parameters for a draw pass.
///
/// These replace the reference defaults (unit scale, zero origin) with
/// explicit values at the API boundary; there is no shared mutable default
/// state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Scaling applied by the renderer around `origin`.
    pub scale: Vector2D<f32>,
    /// Rotation in radians.
    pub rotation: f32,
    /// Center of rotation, in unscaled text-local pixels.
    pub origin: Vector2D<f32>,
    /// Layer depth forwarded to the drawing capability.
    pub layer_depth: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            scale: Vector2D::new(1.0, 1.0),
            rotation: 0.0,
            origin: Vector2D::zero(),
            layer_depth: 0.0,
        }
    }
}

/// Device/texture-manager capability.
///
/// Opaque to the layout core: atlas packing and eviction live entirely on
/// the other side of this interface. The core only asks for a region big
/// enough for one glyph bitmap and uploads coverage data into it.
pub trait TextureManager {
    type Texture: Clone;

    /// Reserves an atlas region for a bitmap of the given size.
    ///
    /// Returns the backing texture and the region's top-left corner in
    /// texture pixels.
    fn allocate(&mut self, width: u32, height: u32) -> (Self::Texture, Point2D<i32>);

    /// Uploads single-channel coverage data into a previously allocated
    /// region. `data` is `region.width * region.height` bytes, row-major.
    fn upload(&mut self, texture: &Self::Texture, region: &Rect<i32>, data: &[u8]);
}

/// Drawing capability receiving one command per visible glyph.
pub trait TextRenderer {
    type Texture: Clone;
    type Atlas: TextureManager<Texture = Self::Texture>;

    /// Texture manager used to resolve atlas storage for new glyphs.
    fn atlas(&mut self) -> &mut Self::Atlas;

    /// Draws one glyph quad.
    ///
    /// `origin` is already adjusted per glyph so that rotation and scaling
    /// pivot around the text origin supplied by the caller.
    fn draw(
        &mut self,
        texture: &Self::Texture,
        position: Point2D<f32>,
        source: Rect<i32>,
        color: Color,
        rotation: f32,
        origin: Vector2D<f32>,
        scale: Vector2D<f32>,
        layer_depth: f32,
    );
}
