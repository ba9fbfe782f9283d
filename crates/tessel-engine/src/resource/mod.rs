//! Shared graphics resource handles.
//!
//! Textures, shaders, and materials are reference-counted descriptors owned by
//! external caches. The batcher holds clones of the handles for as long as a
//! draw batch refers to them and compares them by identity; devices map them
//! to their own GPU objects.

mod material;
mod shader;
mod subtexture;
mod texture;

pub use material::{Material, MaterialId, MaterialRef};
pub use shader::{Shader, ShaderId, ShaderRef, UniformInfo, UniformKind, BATCH_SHADER_WGSL};
pub use subtexture::Subtexture;
pub use texture::{Texture, TextureId, TextureRef};
