//! GPU State management - WebGPU device, queue and the overlay canvas surface

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use super::shapes::Vertex;

/// Vertex capacity of the overlay buffer
pub(crate) const MAX_VERTICES: usize = 4096;

/// Used when the canvas has no layout size yet
const FALLBACK_SIZE: (u32, u32) = (800, 600);

/// Errors that can occur during GPU initialization
#[derive(Debug)]
pub enum GpuStateError {
    NoWindow,
    NoDocument,
    NoCanvas(String),
    SurfaceCreationFailed(String),
    NoAdapter,
    DeviceCreationFailed(String),
}

impl From<GpuStateError> for JsValue {
    fn from(err: GpuStateError) -> Self {
        match err {
            GpuStateError::NoWindow => JsValue::from_str("No window found"),
            GpuStateError::NoDocument => JsValue::from_str("No document found"),
            GpuStateError::NoCanvas(id) => JsValue::from_str(&format!("No canvas with id '{}' found", id)),
            GpuStateError::SurfaceCreationFailed(e) => JsValue::from_str(&format!("Surface creation failed: {}", e)),
            GpuStateError::NoAdapter => JsValue::from_str("Failed to find a suitable GPU adapter"),
            GpuStateError::DeviceCreationFailed(e) => JsValue::from_str(&format!("Device creation failed: {}", e)),
        }
    }
}

/// Holds all WebGPU state for the overlay
pub(crate) struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
}

// Thread-local storage for GPU state (WASM is single-threaded)
thread_local! {
    pub(crate) static GPU_STATE: RefCell<Option<GpuState>> = RefCell::new(None);
}

/// Canvas layout size in device pixels
fn canvas_size(window: &web_sys::Window, canvas: &web_sys::HtmlCanvasElement) -> (u32, u32) {
    let ratio = window.device_pixel_ratio();
    let width = (canvas.client_width() as f64 * ratio) as u32;
    let height = (canvas.client_height() as f64 * ratio) as u32;
    if width == 0 || height == 0 {
        FALLBACK_SIZE
    } else {
        (width, height)
    }
}

/// Pick an sRGB format and a see-through alpha mode; the overlay sits on
/// top of the video
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, GpuStateError> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| GpuStateError::SurfaceCreationFailed("no supported surface format".into()))?;

    let alpha_mode = [wgpu::CompositeAlphaMode::PreMultiplied, wgpu::CompositeAlphaMode::Auto]
        .into_iter()
        .find(|mode| caps.alpha_modes.contains(mode))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// Flat-coloured triangles with premultiplied blending
fn create_wireframe_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Wireframe Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Wireframe Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });
    let target = wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Wireframe Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(target)],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

/// Initialize WebGPU on the overlay canvas: adapter, device, surface, pipeline
pub async fn initialize_gpu(canvas_id: &str) -> Result<(), GpuStateError> {
    let window = web_sys::window().ok_or(GpuStateError::NoWindow)?;
    let document = window.document().ok_or(GpuStateError::NoDocument)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| GpuStateError::NoCanvas(canvas_id.to_string()))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| GpuStateError::NoCanvas(canvas_id.to_string()))?;

    let (width, height) = canvas_size(&window, &canvas);
    canvas.set_width(width);
    canvas.set_height(height);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| GpuStateError::SurfaceCreationFailed(format!("{:?}", e)))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(GpuStateError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Forelimb Overlay Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| GpuStateError::DeviceCreationFailed(format!("{:?}", e)))?;

    let config = surface_config(&surface.get_capabilities(&adapter), width, height)?;
    surface.configure(&device, &config);
    let render_pipeline = create_wireframe_pipeline(&device, config.format);

    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Wireframe Vertex Buffer"),
        size: (MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GPU_STATE.with(|state| {
        *state.borrow_mut() = Some(GpuState {
            device,
            queue,
            surface,
            config,
            render_pipeline,
            vertex_buffer,
        });
    });

    log::info!("WebGPU overlay ready ({}x{})", width, height);
    Ok(())
}

/// Reconfigure the surface after a viewport change
pub fn resize_surface(width: u32, height: u32) {
    if width == 0 || height == 0 {
        return;
    }
    GPU_STATE.with(|state_cell| {
        if let Some(state) = state_cell.borrow_mut().as_mut() {
            state.config.width = width;
            state.config.height = height;
            state.surface.configure(&state.device, &state.config);
            log::debug!("Overlay surface resized to {}x{}", width, height);
        }
    });
}

/// Drop the device and surface
pub fn release_gpu() {
    GPU_STATE.with(|state| {
        if state.borrow_mut().take().is_some() {
            log::debug!("WebGPU overlay released");
        }
    });
}
