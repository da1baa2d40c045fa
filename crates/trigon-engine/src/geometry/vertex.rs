use bytemuck::{Pod, Zeroable};

/// A point in normalized device space.
///
/// Layout is three tightly packed `f32`s (stride 12, offset 0) so a slice of
/// vertices can be uploaded to a vertex buffer without conversion.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Byte distance between consecutive vertices in a buffer.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Exactly three vertices, drawn as one triangle primitive.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Vertices issued per draw call.
    pub const VERTEX_COUNT: u32 = 3;

    #[inline]
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Builds a triangle in the z = 0 plane from three `(x, y)` pairs.
    #[inline]
    pub const fn flat(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> Self {
        Self::new(
            Vertex::new(a[0], a[1], 0.0),
            Vertex::new(b[0], b[1], 0.0),
            Vertex::new(c[0], c[1], 0.0),
        )
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }
}
