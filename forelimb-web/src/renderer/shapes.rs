//! Shape primitives - triangles for discs, thick lines and outlines

/// Clip-space vertex with a premultiplied RGBA colour
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Filled disc as a triangle fan, appended to `out`
pub fn push_disc(out: &mut Vec<Vertex>, center: [f32; 2], radius: f32, color: [f32; 4], segments: u32) {
    let [cx, cy] = center;
    let step = std::f32::consts::TAU / segments as f32;
    for i in 0..segments {
        let (s1, c1) = (i as f32 * step).sin_cos();
        let (s2, c2) = ((i + 1) as f32 * step).sin_cos();
        out.push(Vertex { position: [cx, cy], color });
        out.push(Vertex { position: [cx + radius * c1, cy + radius * s1], color });
        out.push(Vertex { position: [cx + radius * c2, cy + radius * s2], color });
    }
}

/// Line segment as a quad of total thickness `2 × half_width`
pub fn push_line(out: &mut Vec<Vertex>, from: [f32; 2], to: [f32; 2], half_width: f32, color: [f32; 4]) {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-4 {
        return;
    }

    let px = -dy / len * half_width;
    let py = dx / len * half_width;
    let a = [from[0] - px, from[1] - py];
    let b = [from[0] + px, from[1] + py];
    let c = [to[0] + px, to[1] + py];
    let d = [to[0] - px, to[1] - py];

    for position in [a, b, c, a, c, d] {
        out.push(Vertex { position, color });
    }
}

/// Closed polyline through `corners`
pub fn push_outline(out: &mut Vec<Vertex>, corners: &[[f32; 2]], half_width: f32, color: [f32; 4]) {
    for (i, &from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        push_line(out, from, to, half_width, color);
    }
}
