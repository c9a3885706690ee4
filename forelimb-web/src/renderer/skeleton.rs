//! Wireframe rendering - hand bones, joints and outline for species without
//! a loaded model. Loaded models are drawn by the host page.

use super::state::{GPU_STATE, MAX_VERTICES};
use super::shapes::{push_disc, push_line, push_outline, Vertex};
use crate::bridge;
use crate::overlay::{WireframeGeometry, BONE_WIDTH};

/// Colours for the wireframe, premultiplied by alpha
mod colors {
    /// Bounding outline (#00d4ff, 80%)
    pub const OUTLINE: [f32; 4] = [0.0, 0.665, 0.8, 0.8];
    /// Bone segments (#00d4ff, 70%)
    pub const BONE: [f32; 4] = [0.0, 0.582, 0.7, 0.7];
    /// Joint dots (#00ffff, 90%)
    pub const JOINT: [f32; 4] = [0.0, 0.9, 0.9, 0.9];
    /// Fully transparent so the video shows through
    pub const CLEAR: wgpu::Color = wgpu::Color::TRANSPARENT;
}

const OUTLINE_HALF_WIDTH: f32 = 0.003;
const JOINT_SEGMENTS: u32 = 12;

fn build_vertices(geometry: &WireframeGeometry) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    push_outline(&mut vertices, &geometry.outline.corners(), OUTLINE_HALF_WIDTH, colors::OUTLINE);
    for bone in &geometry.bones {
        push_line(&mut vertices, bone.from, bone.to, BONE_WIDTH, colors::BONE);
    }
    for joint in &geometry.joints {
        push_disc(&mut vertices, joint.center, joint.radius, colors::JOINT, JOINT_SEGMENTS);
    }

    if vertices.len() > MAX_VERTICES {
        log::warn!("Wireframe needs {} vertices, truncating to {}", vertices.len(), MAX_VERTICES);
        vertices.truncate(MAX_VERTICES - MAX_VERTICES % 3);
    }
    vertices
}

/// Render one frame from the last overlay output
pub fn render_frame() {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };

        let vertices = bridge::current_wireframe()
            .map(|geometry| build_vertices(&geometry))
            .unwrap_or_default();

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                log::debug!("Skipping frame: {:?}", err);
                return;
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Overlay Encoder") }
        );

        if !vertices.is_empty() {
            state.queue.write_buffer(
                &state.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wireframe Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
