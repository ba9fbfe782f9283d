//! Paint model shared between the batcher and devices.
//!
//! Scope:
//! - vertex color representation (premultiplied RGBA8)
//! - per-draw-call blend state
//! - color modes and the per-vertex fill weights they select
//!
//! Geometry types remain in `coords`.

pub mod blend;
pub mod color;
pub mod color_mode;

pub use blend::{BlendFactor, BlendMode, BlendOp, ColorMask};
pub use color::Color;
pub use color_mode::{ColorMode, FillWeights};
