//! # quadstash
//!
//! A text layout and glyph quad generation library for Rust.
//!
//! ## Overview
//!
//! `quadstash` turns a UTF-16 text buffer into a positioned sequence of glyph
//! quads for rendering, measurement, and hit-testing. It owns codepoint
//! decoding, multi-line cursor layout with kerning, per-size glyph metrics,
//! and bounds accumulation; atlas management and draw submission stay on the
//! caller's side behind narrow capability traits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quadstash::{FontError, FontFace, Utf16Buffer};
//!
//! # fn font_bytes() -> Vec<u8> { Vec::new() }
//! # fn run() -> Result<(), FontError> {
//! // 1. Parse a font face (fontdue-backed)
//! let face = FontFace::from_bytes(&font_bytes())?;
//!
//! // 2. Fix it at a pixel size; the texture handle type comes from your
//! //    renderer's `TextRenderer` implementation
//! let mut font = face.sized::<u32>(32.0);
//!
//! // 3. Measure and draw
//! let text = Utf16Buffer::from("Hello, world!");
//! let size = font.measure(&text);
//! // font.draw_text(&mut renderer, &text, position, color, &style);
//! # let _ = size;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! *   **Backend-agnostic**: drawing and atlas storage are capability traits
//!     with the native texture handle as an associated type.
//! *   **Correct cursor semantics**: drawing and measuring run the identical
//!     layout pass, so geometry always agrees.
//! *   **Kerning memoization**: pairwise adjustments are cached in font
//!     units per face and scaled per size on retrieval.

pub mod bounds;
pub mod codepoint;
pub mod face;
pub mod glyph;
pub mod kerning;
pub mod layout;
pub mod quad;
pub mod renderer;
pub mod sized;
pub mod source;
pub mod ttf;

// common re-exports
pub use bounds::{Bounds, BoundsAccumulator};
pub use codepoint::{Codepoints, TextBuffer, Utf16Buffer};
pub use face::FontFace;
pub use glyph::Glyph;
pub use kerning::KerningCache;
pub use layout::Cursor;
pub use quad::GlyphQuad;
pub use renderer::{Color, TextRenderer, TextStyle, TextureManager};
pub use sized::SizedFont;
pub use source::{FontSource, GlyphMetrics, LineMetrics};
pub use ttf::{FontError, TtfFontSource};

// re-export dependencies
pub use euclid;
pub use fontdue;
pub use parking_lot;
