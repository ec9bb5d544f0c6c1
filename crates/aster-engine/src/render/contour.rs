use bytemuck::{Pod, Zeroable};

use crate::contour::ContourStore;
use crate::coords::{ColorRgba, ViewProjection};

use super::{RenderCtx, RenderTarget};

/// Stroke appearance for contour lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContourStyle {
    pub color: ColorRgba,
    /// Stroke thickness in logical pixels.
    pub thickness: f32,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            color: ColorRgba::default(),
            thickness: 1.5,
        }
    }
}

/// Draws every uploaded chunk of a [`ContourStore`] in insertion order.
///
/// Pipeline and uniform buffer are created lazily on first use and recreated
/// when the surface format changes. Chunks whose buffers are missing are
/// skipped (the store logs them); each chunk is drawn as one triangle strip
/// per polyline, with ranges derived from the chunk's retained offsets.
#[derive(Default)]
pub struct ContourRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
}

impl ContourRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `store`'s chunks into `target` under the given projection.
    ///
    /// Pending chunks are uploaded first, so data that arrived before the
    /// GPU context becomes drawable here.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        store: &mut ContourStore,
        view: &ViewProjection,
        style: &ContourStyle,
    ) {
        store.ensure_uploaded(&ctx.gpu());

        if !store.has_chunks() || !view.is_valid() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.write_uniform(ctx, view, style);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("aster contour pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);

        for index in 0..store.chunk_count() {
            let Some(buffer) = store.chunk_buffer(index) else {
                continue;
            };

            rpass.set_vertex_buffer(0, buffer.slice(..));
            for range in store.chunk_draw_ranges(index) {
                rpass.draw(range, 0..1);
            }
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/contour.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("aster contour shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("aster contour bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(contour_ubo_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("aster contour pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("aster contour pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ContourVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("aster contour ubo"),
            size: contour_ubo_size().get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("aster contour bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_uniform(&mut self, ctx: &RenderCtx<'_>, view: &ViewProjection, style: &ContourStyle) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };

        let u = ContourUniform {
            bounds_min: [view.bounds.x_min as f32, view.bounds.y_min as f32],
            view_scale: [
                (view.surface.width as f64 / view.bounds.width()) as f32,
                (view.surface.height as f64 / view.bounds.height()) as f32,
            ],
            surface: [view.surface.width.max(1.0), view.surface.height.max(1.0)],
            thickness: [style.thickness, 0.0],
            color: [style.color.r, style.color.g, style.color.b, style.color.a],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ContourUniform {
    bounds_min: [f32; 2],
    view_scale: [f32; 2],
    surface: [f32; 2],
    thickness: [f32; 2], // x = stroke thickness px, y = padding
    color: [f32; 4],
}

/// Expanded contour vertex: image-space position + extrusion normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ContourVertex {
    pos: [f32; 2],
    normal: [f32; 2],
}

impl ContourVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // normal
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ContourVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn contour_ubo_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ContourUniform>() as u64)
        .expect("ContourUniform has non-zero size by construction")
}
