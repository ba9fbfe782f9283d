//! Font metrics consumed by the batcher's text emitter.
//!
//! Glyph rasterization and atlas packing happen elsewhere; this module only
//! describes where each glyph's quad goes and which texture region it samples.

mod align;
mod font;

pub use align::TextAlign;
pub use font::{FontMetrics, Glyph, SpriteFont};
