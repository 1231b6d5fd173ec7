//! Graphics context abstraction.
//!
//! The narrow set of one-shot calls the cube needs: upload static buffers,
//! compile one program, set its matrix uniforms, draw indexed triangles.
//! `WgpuContext` drives a real surface; tests use a recording context.

mod surface;

#[cfg(test)]
pub(crate) mod recording;

pub use surface::{WgpuContext, WgpuProgram};

use crate::device::SurfaceErrorAction;
use crate::transform::TransformUniform;

/// What a buffer is bound as.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    Vertex,
    /// 16-bit unsigned indices.
    Index,
}

/// Static buffer contents, uploaded once.
#[derive(Debug, Copy, Clone)]
pub struct BufferDesc<'a> {
    pub label: &'a str,
    pub usage: BufferUsage,
    pub contents: &'a [u8],
}

/// A float vertex input. Attribute `n` of a program reads from vertex buffer slot `n`.
///
/// Built with [`VertexAttribute::new`]; a component count outside 1..=4 is a
/// programming error and is rejected there.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    location: u32,
    components: u32,
}

impl VertexAttribute {
    /// Shader `@location` and tightly packed `f32` components per vertex (1 to 4).
    ///
    /// Panics on other component counts, at compile time when used in a `const`.
    pub const fn new(location: u32, components: u32) -> Self {
        assert!(
            components >= 1 && components <= 4,
            "vertex attributes carry 1 to 4 floats"
        );
        Self {
            location,
            components,
        }
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn components(&self) -> u32 {
        self.components
    }
}

/// Shader program description.
#[derive(Debug, Copy, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    /// WGSL source with `vs_main` / `fs_main` entry points and the transform
    /// uniform at `@group(0) @binding(0)`.
    pub source: &'a str,
    pub attributes: &'a [VertexAttribute],
    pub depth_test: bool,
}

/// One indexed triangle-list draw, preceded by a color + depth clear.
pub struct DrawCall<'a, C: GraphicsContext + ?Sized> {
    pub program: &'a C::Program,
    /// Bound in slot order, one per program attribute.
    pub vertex_buffers: &'a [&'a C::Buffer],
    pub index_buffer: &'a C::Buffer,
    pub index_count: u32,
    /// Straight RGBA clear color.
    pub clear: [f32; 4],
}

/// A drawing surface plus the device that renders into it.
pub trait GraphicsContext {
    type Buffer;
    type Program;

    /// Drawing-surface size in physical pixels.
    fn surface_size(&self) -> (u32, u32);

    fn create_buffer(&mut self, desc: &BufferDesc<'_>) -> Self::Buffer;

    /// Compiles and links a program. Compilation errors are not reported here.
    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> Self::Program;

    fn upload_transforms(&mut self, program: &Self::Program, transforms: &TransformUniform);

    /// Clears the surface and issues the draw. `Err` means the frame was not presented.
    fn draw_indexed(&mut self, call: &DrawCall<'_, Self>) -> Result<(), SurfaceErrorAction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_keeps_location_and_components() {
        let attr = VertexAttribute::new(1, 4);
        assert_eq!(attr.location(), 1);
        assert_eq!(attr.components(), 4);
    }

    #[test]
    #[should_panic(expected = "1 to 4 floats")]
    fn attribute_rejects_zero_components() {
        VertexAttribute::new(0, 0);
    }

    #[test]
    #[should_panic(expected = "1 to 4 floats")]
    fn attribute_rejects_five_components() {
        VertexAttribute::new(0, 5);
    }
}
