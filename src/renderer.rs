use std::marker::PhantomData;

use wgpu::util::DeviceExt;

use crate::{camera::Camera, scene::Scene};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Corner of a unit quad, used for the overlay panels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[rustfmt::skip]
pub const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

pub const QUAD_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

/// Per-frame data for the lit sphere, laid out as `SceneUniform` in `sphere.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    view_projection: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    eye: [f32; 4],
    /// Linear rgb, roughness in `w`.
    base_color: [f32; 4],
    /// Position, range in `w`.
    light_position: [f32; 4],
    /// Linear rgb, intensity in `w`.
    light_color: [f32; 4],
}

impl SceneUniform {
    pub fn new(camera: &Camera, scene: &Scene) -> Self {
        let material = &scene.sphere.material;
        let light = &scene.light;
        Self {
            view_projection: camera.view_projection_matrix().to_cols_array_2d(),
            model: scene.sphere.model_matrix().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            base_color: material.color.to_linear().extend(material.roughness).to_array(),
            light_position: light.position.extend(light.distance).to_array(),
            light_color: light.color.to_linear().extend(light.intensity).to_array(),
        }
    }
}

/// Overlay panel placement, laid out as `OverlayUniform` in `overlay.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayUniform {
    /// Nav bar rectangle in NDC: min x, min y, max x, max y.
    nav_rect: [f32; 4],
    nav_color: [f32; 4],
    title_rect: [f32; 4],
    title_color: [f32; 4],
}

impl OverlayUniform {
    const NAV_HEIGHT: f32 = 0.12;
    const NAV_COLOR: [f32; 3] = [0.02, 0.02, 0.02];
    const TITLE_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

    pub fn new(scene: &Scene) -> Self {
        let overlay = &scene.overlay;
        let nav_top = 1.0 - overlay.nav_offset * Self::NAV_HEIGHT;
        let [nr, ng, nb] = Self::NAV_COLOR;
        let [tr, tg, tb] = Self::TITLE_COLOR;
        Self {
            nav_rect: [-1.0, nav_top - Self::NAV_HEIGHT, 1.0, nav_top],
            nav_color: [nr, ng, nb, 0.85],
            title_rect: [-0.35, -0.8, 0.35, -0.68],
            title_color: [tr, tg, tb, overlay.title_opacity.clamp(0.0, 1.0)],
        }
    }

    pub fn nav_rect(&self) -> [f32; 4] {
        self.nav_rect
    }

    pub fn title_alpha(&self) -> f32 {
        self.title_color[3]
    }
}

pub struct VertexBuffer(wgpu::Buffer);

impl VertexBuffer {
    pub fn init_immediate<'label>(
        device: &wgpu::Device,
        content: &[u8],
        label: Option<&'label str>,
    ) -> Self {
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label,
            contents: content,
            usage: wgpu::BufferUsages::VERTEX,
        };
        let buffer = device.create_buffer_init(&init_descriptor);
        Self(buffer)
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    format: wgpu::IndexFormat,
}

macro_rules! index_buffer_init_immediate {
    ($device:expr, $content:expr, $label:expr, $ty:ident) => {{
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label: $label,
            contents: bytemuck::cast_slice($content),
            usage: wgpu::BufferUsages::INDEX,
        };
        let buffer = $device.create_buffer_init(&init_descriptor);
        IndexBuffer {
            buffer,
            format: wgpu::IndexFormat::$ty,
        }
    }};
}

impl IndexBuffer {
    pub fn init_immediate_u16<'label>(
        device: &wgpu::Device,
        content: &[u16],
        label: Option<&'label str>,
    ) -> Self {
        index_buffer_init_immediate!(device, content, label, Uint16)
    }

    pub fn init_immediate_u32<'label>(
        device: &wgpu::Device,
        content: &[u32],
        label: Option<&'label str>,
    ) -> Self {
        index_buffer_init_immediate!(device, content, label, Uint32)
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        self.format
    }

    /// Number of indices in the buffer. A `u16` buffer may carry alignment padding.
    pub fn count(&self) -> u32 {
        (self.buffer.size() / Self::format_size(self.format) as u64) as u32
    }

    /// Return the index byte size from the index format
    #[inline(always)]
    pub fn format_size(format: wgpu::IndexFormat) -> u8 {
        match format {
            wgpu::IndexFormat::Uint16 => 2,
            wgpu::IndexFormat::Uint32 => 4,
        }
    }
}

/// Uniform buffer holding one `T`, with the bind group exposing it at binding 0.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    pub fn init_immediate<'label>(
        device: &wgpu::Device,
        value: &T,
        visibility: wgpu::ShaderStages,
        label: Option<&'label str>,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label,
        });

        Self {
            buffer,
            layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Depth buffer plus, when multisampling, the color target resolved into the surface.
pub struct FrameTargets {
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    sample_count: u32,
}

impl FrameTargets {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, sample_count: u32) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let msaa_view = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("Multisample Texture"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        Self {
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
            msaa_view,
            sample_count,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Attachment view and resolve target for drawing into `surface_view`.
    pub fn color_views<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(surface_view)),
            None => (surface_view, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DemoConfig, Variant};

    fn scene() -> Scene {
        Scene::new(&DemoConfig::for_variant(Variant::Timeline))
    }

    #[test]
    fn uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 2 * 64 + 4 * 16);
        assert_eq!(std::mem::size_of::<OverlayUniform>(), 4 * 16);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn scene_uniform_packs_material_and_light() {
        let config = DemoConfig::for_variant(Variant::Timeline);
        let scene = scene();
        let camera = Camera::new(&config.camera, 1.5);
        let uniform = SceneUniform::new(&camera, &scene);

        assert_eq!(uniform.base_color[3], 0.5);
        assert_eq!(uniform.light_position, [0.0, 10.0, 10.0, 100.0]);
        assert!(uniform.light_color[..3].iter().all(|c| (c - 1.0).abs() < 1e-6));
        assert_eq!(uniform.light_color[3], 1.25);
        assert_eq!(uniform.eye, [0.0, 0.0, 20.0, 1.0]);
    }

    #[test]
    fn hidden_nav_sits_above_the_viewport() {
        let mut scene = scene();
        scene.overlay.nav_offset = -1.0;
        assert!((OverlayUniform::new(&scene).nav_rect()[1] - 1.0).abs() < 1e-6);

        scene.overlay.nav_offset = 0.0;
        let rect = OverlayUniform::new(&scene).nav_rect();
        assert_eq!(rect[3], 1.0);
        assert!(rect[1] < 1.0);
    }

    #[test]
    fn title_alpha_follows_opacity() {
        let mut scene = scene();
        scene.overlay.title_opacity = 0.25;
        assert_eq!(OverlayUniform::new(&scene).title_alpha(), 0.25);
    }
}
