use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::ShaderRef;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

static NEXT_MATERIAL_ID: AtomicU64 = AtomicU64::new(1);

/// Shader binding used by a draw call.
///
/// Materials are compared by handle identity when building batches: two
/// materials wrapping the same shader still produce separate draw batches.
#[derive(Debug)]
pub struct Material {
    id: MaterialId,
    shader: ShaderRef,
    label: Option<String>,
}

pub type MaterialRef = Arc<Material>;

impl Material {
    pub fn new(shader: ShaderRef) -> MaterialRef {
        Self::with_label(shader, None)
    }

    pub fn with_label(shader: ShaderRef, label: Option<&str>) -> MaterialRef {
        Arc::new(Self {
            id: MaterialId(NEXT_MATERIAL_ID.fetch_add(1, Ordering::Relaxed)),
            shader,
            label: label.map(str::to_owned),
        })
    }

    #[inline]
    pub fn id(&self) -> MaterialId {
        self.id
    }

    #[inline]
    pub fn shader(&self) -> &ShaderRef {
        &self.shader
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
