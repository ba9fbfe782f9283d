//! Coordinate and geometry types shared by the batcher and its devices.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Devices convert to clip space using the matrix uniform the batch binds per draw call.

mod corners;
mod mat3x2;
mod mat4x4;
mod rect;
mod vec2;

pub use corners::{Corner, Corners};
pub use mat3x2::Mat3x2;
pub use mat4x4::Mat4x4;
pub use rect::Rect;
pub use vec2::Vec2;
