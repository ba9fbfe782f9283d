use crate::batch::Vertex;

/// Growable vertex/index buffer pair backing one batch mesh.
#[derive(Default)]
pub(super) struct WgpuMesh {
    pub vbo: Option<wgpu::Buffer>,
    pub ibo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    index_capacity: usize,
    pub index_count: u32,
}

impl WgpuMesh {
    /// Uploads `vertices` and `indices`, reallocating only when they outgrow
    /// the current buffers.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex], indices: &[u32]) {
        self.ensure_capacity(device, vertices.len(), indices.len());

        if let Some(vbo) = self.vbo.as_ref() {
            queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        }
        if let Some(ibo) = self.ibo.as_ref() {
            queue.write_buffer(ibo, 0, bytemuck::cast_slice(indices));
        }
        self.index_count = indices.len() as u32;
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity || self.vbo.is_none() {
            let cap = vertices.next_power_of_two().max(64);
            self.vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tessel batch vbo"),
                size: (cap * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            log::debug!("WgpuMesh: vertex buffer grown to {cap} vertices");
            self.vertex_capacity = cap;
        }

        if indices > self.index_capacity || self.ibo.is_none() {
            let cap = indices.next_power_of_two().max(64);
            self.ibo = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tessel batch ibo"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            log::debug!("WgpuMesh: index buffer grown to {cap} indices");
            self.index_capacity = cap;
        }
    }
}
