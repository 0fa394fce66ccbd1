use std::sync::Arc;

use glam::UVec2;
use tracing::debug;
use vulkano::buffer::{Buffer, BufferCreateInfo, BufferUsage, Subbuffer};
use vulkano::command_buffer::{allocator::CommandBufferAllocator, AutoCommandBufferBuilder, PrimaryAutoCommandBuffer};
use vulkano::device::Device;
use vulkano::memory::allocator::{AllocationCreateInfo, MemoryTypeFilter, StandardMemoryAllocator};
use vulkano::pipeline::graphics::color_blend::{ColorBlendAttachmentState, ColorBlendState};
use vulkano::pipeline::graphics::input_assembly::{InputAssemblyState, PrimitiveTopology};
use vulkano::pipeline::graphics::multisample::MultisampleState;
use vulkano::pipeline::graphics::rasterization::RasterizationState;
use vulkano::pipeline::graphics::vertex_input::{Vertex, VertexDefinition};
use vulkano::pipeline::graphics::viewport::{Viewport, ViewportState};
use vulkano::pipeline::graphics::GraphicsPipelineCreateInfo;
use vulkano::pipeline::layout::PipelineDescriptorSetLayoutCreateInfo;
use vulkano::pipeline::{GraphicsPipeline, PipelineLayout, PipelineShaderStageCreateInfo};
use vulkano::render_pass::{RenderPass, Subpass};
use vulkano::shader::ShaderModule;

use vecplane::SceneDescriptor;

use crate::types::LineVertex;

pub mod vs {
    vulkano_shaders::shader! {
        ty: "vertex",
        src: r"
            #version 460

            layout(location = 0) in vec2 position;
            layout(location = 1) in vec4 color;

            layout(location = 0) out vec4 o_color;

            void main() {
                o_color = color;
                gl_Position = vec4(position, 0.0, 1.0);
            }
            ",
    }
}

pub mod fs {
    vulkano_shaders::shader! {
        ty: "fragment",
        src: r"
            #version 460

            layout(location = 0) in vec4 color;

            layout(location = 0) out vec4 f_color;

            void main() {
                f_color = color;
            }
        ",
    }
}

/// Draws the line commands of a scene as a single `LineList`.
pub struct LineRenderer {
    device : Arc<Device>,
    memory_allocator : Arc<StandardMemoryAllocator>,
    vs : Arc<ShaderModule>,
    fs : Arc<ShaderModule>,
    vertex_buffer : Option<Subbuffer<[LineVertex]>>,
    pipeline : Option<Arc<GraphicsPipeline>>,
}

impl LineRenderer {
    pub fn new(device : Arc<Device>, memory_allocator : Arc<StandardMemoryAllocator>) -> Self {
        let vs = vs::load(device.clone()).expect("failed to load vertex shader");
        let fs = fs::load(device.clone()).expect("failed to load fragment shader");

        Self {
            device,
            memory_allocator,
            vs,
            fs,
            vertex_buffer : None,
            pipeline : None,
        }
    }

    /// Replaces the vertex data with the scene's lines. Labels are not
    /// rasterized here.
    pub fn upload(&mut self, scene : &SceneDescriptor, window_size : UVec2) -> &mut Self {
        let vertices : Vec<LineVertex> = scene
            .lines()
            .flat_map(|line| LineVertex::segment(line, window_size))
            .collect();

        debug!(vertices = vertices.len(), "uploading scene lines");

        // zero sized buffers are invalid
        if vertices.is_empty() {
            self.vertex_buffer = None;
            return self;
        }

        let vertex_buffer = Buffer::from_iter(
            self.memory_allocator.clone(),
            BufferCreateInfo {
                usage: BufferUsage::VERTEX_BUFFER,
                ..Default::default()
            },
            AllocationCreateInfo {
                memory_type_filter: MemoryTypeFilter::PREFER_DEVICE
                    | MemoryTypeFilter::HOST_SEQUENTIAL_WRITE,
                ..Default::default()
            },
            vertices,
        )
        .expect("failed to create vertex buffer");

        self.vertex_buffer = Some(vertex_buffer);
        self
    }

    pub fn build_pipeline(&mut self, render_pass : Arc<RenderPass>, viewport : Viewport) -> &mut Self {
        let vs = self.vs.entry_point("main").expect("vertex shader has no main");
        let fs = self.fs.entry_point("main").expect("fragment shader has no main");

        let vertex_input_state = LineVertex::per_vertex()
            .definition(&vs.info().input_interface)
            .expect("vertex layout does not match the shader");

        let stages = [
            PipelineShaderStageCreateInfo::new(vs),
            PipelineShaderStageCreateInfo::new(fs),
        ];

        let layout = PipelineLayout::new(
            self.device.clone(),
            PipelineDescriptorSetLayoutCreateInfo::from_stages(&stages)
                .into_pipeline_layout_create_info(self.device.clone())
                .expect("failed to derive pipeline layout"),
        )
        .expect("failed to create pipeline layout");

        let subpass = Subpass::from(render_pass, 0).expect("render pass has no subpass 0");

        let pipeline = GraphicsPipeline::new(
            self.device.clone(),
            None,
            GraphicsPipelineCreateInfo {
                stages: stages.into_iter().collect(),
                vertex_input_state: Some(vertex_input_state),
                input_assembly_state: Some(InputAssemblyState {
                    topology: PrimitiveTopology::LineList,
                    ..Default::default()
                }),
                viewport_state: Some(ViewportState {
                    viewports: [viewport].into_iter().collect(),
                    ..Default::default()
                }),
                rasterization_state: Some(RasterizationState::default()),
                multisample_state: Some(MultisampleState::default()),
                color_blend_state: Some(ColorBlendState::with_attachment_states(
                    subpass.num_color_attachments(),
                    ColorBlendAttachmentState::default(),
                )),
                subpass: Some(subpass.into()),
                ..GraphicsPipelineCreateInfo::layout(layout)
            },
        )
        .expect("failed to create line pipeline");

        self.pipeline = Some(pipeline);
        self
    }

    pub fn draw<A>(&self, builder : &mut AutoCommandBufferBuilder<PrimaryAutoCommandBuffer<A>, A>)
    where
        A: CommandBufferAllocator,
    {
        let (Some(pipeline), Some(vertex_buffer)) = (self.pipeline.clone(), self.vertex_buffer.clone()) else {
            return;
        };
        let vertex_count = vertex_buffer.len() as u32;

        builder
            .bind_pipeline_graphics(pipeline)
            .expect("failed to bind line pipeline")
            .bind_vertex_buffers(0, vertex_buffer)
            .expect("failed to bind vertex buffer")
            .draw(vertex_count, 1, 0, 0)
            .expect("failed to record draw");
    }
}
