use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::coords::Vec2;

/// Identity of a texture as seen by devices.
///
/// Devices map ids to their own GPU objects. [`TextureId::WHITE`] is reserved
/// for the implicit 1×1 white texture, which every device must provide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u64);

impl TextureId {
    pub const WHITE: TextureId = TextureId(0);

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Texture descriptor shared between external caches, batches, and devices.
///
/// The batch never owns or mutates textures; it only compares identities to
/// build draw batches and hands the handle to the device.
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    label: Option<String>,
}

/// Shared, reference-counted texture handle.
pub type TextureRef = Arc<Texture>;

impl Texture {
    /// Allocates a new texture identity of the given size.
    pub fn new(width: u32, height: u32) -> TextureRef {
        Self::with_label(width, height, None)
    }

    pub fn with_label(width: u32, height: u32, label: Option<&str>) -> TextureRef {
        let id = TextureId(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed));
        Arc::new(Self { id, width, height, label: label.map(str::to_owned) })
    }

    /// The implicit solid white 1×1 texture used when no texture is bound.
    pub fn white() -> TextureRef {
        static WHITE: OnceLock<TextureRef> = OnceLock::new();
        WHITE
            .get_or_init(|| {
                Arc::new(Self {
                    id: TextureId::WHITE,
                    width: 1,
                    height: 1,
                    label: Some("white".to_owned()),
                })
            })
            .clone()
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn is_white(&self) -> bool {
        self.id == TextureId::WHITE
    }
}
