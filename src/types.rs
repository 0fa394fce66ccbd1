use glam::{DVec2, UVec2};
use vulkano::buffer::BufferContents;
use vulkano::pipeline::graphics::vertex_input::Vertex;

use vecplane::{Color, LineCommand};

#[derive(BufferContents, Vertex, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct LineVertex {
    #[format(R32G32_SFLOAT)]
    pub position: [f32; 2],
    #[format(R32G32B32A32_SFLOAT)]
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(pixel : DVec2, window_size : UVec2, color : Color) -> Self {
        Self {
            position : to_ndc(pixel, window_size).as_vec2().to_array(),
            color : color.to_array_f32(),
        }
    }

    /// Both ends of a scene line, ready for a line list.
    pub fn segment(line : &LineCommand, window_size : UVec2) -> [Self; 2] {
        [
            Self::new(line.from, window_size, line.color),
            Self::new(line.to, window_size, line.color),
        ]
    }
}

// pixels ((0, w), (0, h)) from the bottom-left --> vulkan ((-1, 1), (1, -1)), y down
pub fn to_ndc(pixel : DVec2, window_size : UVec2) -> DVec2 {
    let ndc = pixel / window_size.as_dvec2() * 2.0 - 1.0;
    DVec2::new(ndc.x, -ndc.y)
}
