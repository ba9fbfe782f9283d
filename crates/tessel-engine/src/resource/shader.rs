use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Kind of value a shader uniform slot accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UniformKind {
    /// `mat4x4<f32>` in a uniform buffer.
    Mat4x4,
    /// `texture_2d<f32>`; its filtering sampler sits at `binding + 1`.
    Texture2D,
}

/// A named uniform slot exposed by a shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformInfo {
    pub name: String,
    pub kind: UniformKind,
    pub group: u32,
    pub binding: u32,
}

impl UniformInfo {
    pub fn new(name: &str, kind: UniformKind, group: u32, binding: u32) -> Self {
        Self { name: name.to_owned(), kind, group, binding }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(u64);

static NEXT_SHADER_ID: AtomicU64 = AtomicU64::new(1);

/// WGSL source plus the uniform slots it declares.
///
/// Entry points are `vs_main` / `fs_main`. Vertex inputs must match
/// [`Vertex::layout`](crate::batch::Vertex::layout).
#[derive(Debug)]
pub struct Shader {
    id: ShaderId,
    label: String,
    source: String,
    uniforms: Vec<UniformInfo>,
}

pub type ShaderRef = Arc<Shader>;

/// Source of the built-in batch shader.
pub const BATCH_SHADER_WGSL: &str = include_str!("shaders/batch.wgsl");

impl Shader {
    pub fn new(label: &str, source: impl Into<String>, uniforms: Vec<UniformInfo>) -> ShaderRef {
        Arc::new(Self {
            id: ShaderId(NEXT_SHADER_ID.fetch_add(1, Ordering::Relaxed)),
            label: label.to_owned(),
            source: source.into(),
            uniforms,
        })
    }

    /// The built-in shader used by every batch's default material.
    ///
    /// Declares `u_matrix` (group 0) and `u_texture` (group 1, sampler at binding 1).
    pub fn batch_default() -> ShaderRef {
        static DEFAULT: OnceLock<ShaderRef> = OnceLock::new();
        DEFAULT
            .get_or_init(|| {
                Shader::new(
                    "tessel batch shader",
                    BATCH_SHADER_WGSL,
                    vec![
                        UniformInfo::new("u_matrix", UniformKind::Mat4x4, 0, 0),
                        UniformInfo::new("u_texture", UniformKind::Texture2D, 1, 0),
                    ],
                )
            })
            .clone()
    }

    #[inline]
    pub fn id(&self) -> ShaderId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn uniforms(&self) -> &[UniformInfo] {
        &self.uniforms
    }

    /// Looks up a uniform slot by name.
    pub fn uniform(&self, name: &str) -> Option<&UniformInfo> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// True if a slot called `name` of the given kind exists.
    pub fn has_uniform(&self, name: &str, kind: UniformKind) -> bool {
        self.uniform(name).is_some_and(|u| u.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shader_declares_batch_uniforms() {
        let s = Shader::batch_default();
        assert!(s.has_uniform("u_matrix", UniformKind::Mat4x4));
        assert!(s.has_uniform("u_texture", UniformKind::Texture2D));
        assert!(!s.has_uniform("u_texture", UniformKind::Mat4x4));
        assert!(s.source().contains("fn vs_main"));
    }

    #[test]
    fn default_shader_is_shared() {
        assert_eq!(Shader::batch_default().id(), Shader::batch_default().id());
    }
}
