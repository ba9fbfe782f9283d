use super::Vertex;

/// Append-only vertex and index arrays, reused across frames.
///
/// `clear()` drops the contents but keeps the allocations, so a frame that
/// draws the same amount of geometry as the previous one does not allocate.
#[derive(Debug, Default)]
pub(crate) struct GeometryBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl GeometryBuffer {
    pub(crate) fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub(crate) fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub(crate) fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index the next pushed vertex will get.
    #[inline]
    pub(crate) fn next_vertex(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    pub(crate) fn index_len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub(crate) fn reserve(&mut self, vertices: usize, indices: usize) {
        self.vertices.reserve(vertices);
        self.indices.reserve(indices);
    }

    #[inline]
    pub(crate) fn push_vertex(&mut self, v: Vertex) {
        self.vertices.push(v);
    }

    #[inline]
    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub(crate) fn capacity(&self) -> (usize, usize) {
        (self.vertices.capacity(), self.indices.capacity())
    }
}
