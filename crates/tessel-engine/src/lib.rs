//! Tessel: a deferred 2D geometry batcher.
//!
//! Shapes, sprites and text are appended to a [`Batch`](batch::Batch) as
//! triangles. Consecutive draws that share render state coalesce into one
//! draw call; `render` uploads the mesh once and draws every batch, sorted
//! by layer, through a [`GraphicsDevice`](render::GraphicsDevice).

pub mod batch;
pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod resource;
pub mod text;
