use crate::context::{BufferDesc, BufferUsage, DrawCall, GraphicsContext, ProgramDesc, VertexAttribute};
use crate::device::{GraphicsError, SurfaceErrorAction};
use crate::geometry::{self, COLORS, COLOR_COMPONENTS, INDICES, POSITIONS, POSITION_COMPONENTS};
use crate::transform::Transforms;

/// Vertex stage applies `projection * view * model`; fragment stage outputs the
/// interpolated vertex color.
pub const SHADER_SOURCE: &str = include_str!("shaders/cube.wgsl");

/// Opaque black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Position reads from vertex buffer slot 0, color from slot 1.
pub const ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute::new(0, POSITION_COMPONENTS as u32),
    VertexAttribute::new(1, COLOR_COMPONENTS as u32),
];

/// GPU resources for the cube and the transforms last uploaded to them.
pub struct CubeRenderer<C: GraphicsContext> {
    positions: C::Buffer,
    colors: C::Buffer,
    indices: C::Buffer,
    program: C::Program,
    transforms: Transforms,
}

impl<C: GraphicsContext> CubeRenderer<C> {
    /// Uploads geometry, builds the program and sets its uniforms.
    ///
    /// The projection aspect ratio comes from the context's current surface size.
    pub fn setup(ctx: &mut C) -> Self {
        let positions = ctx.create_buffer(&BufferDesc {
            label: "cube positions",
            usage: BufferUsage::Vertex,
            contents: bytemuck::cast_slice(&POSITIONS),
        });

        let colors = ctx.create_buffer(&BufferDesc {
            label: "cube colors",
            usage: BufferUsage::Vertex,
            contents: bytemuck::cast_slice(&COLORS),
        });

        let indices = ctx.create_buffer(&BufferDesc {
            label: "cube indices",
            usage: BufferUsage::Index,
            contents: bytemuck::cast_slice(&INDICES),
        });

        let program = ctx.create_program(&ProgramDesc {
            label: "cube program",
            source: SHADER_SOURCE,
            attributes: &ATTRIBUTES,
            depth_test: true,
        });

        let (width, height) = ctx.surface_size();
        let transforms = Transforms::for_surface(width, height);
        ctx.upload_transforms(&program, &transforms.uniform());

        log::debug!(
            "cube uploaded: {} vertices, {} indices, surface {width}x{height}",
            geometry::vertex_count(),
            geometry::index_count()
        );

        Self {
            positions,
            colors,
            indices,
            program,
            transforms,
        }
    }

    /// Clears color + depth and draws the cube with a single indexed call.
    ///
    /// A surface with a zero dimension (minimized window) has nothing to present;
    /// the frame is skipped without touching the context.
    pub fn draw(&self, ctx: &mut C) -> Result<(), SurfaceErrorAction> {
        let (width, height) = ctx.surface_size();
        if width == 0 || height == 0 {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        ctx.draw_indexed(&DrawCall {
            program: &self.program,
            vertex_buffers: &[&self.positions, &self.colors],
            index_buffer: &self.indices,
            index_count: geometry::index_count(),
            clear: CLEAR_COLOR,
        })
    }

    /// Re-uploads the transforms with the projection fitted to a new surface size.
    pub fn resize(&mut self, ctx: &mut C, width: u32, height: u32) {
        self.transforms.resize(width, height);
        ctx.upload_transforms(&self.program, &self.transforms.uniform());
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }
}

/// Acquires a context, then sets up the cube on it.
///
/// Acquisition failure is returned before any resource is created.
pub fn launch<C, F>(acquire: F) -> Result<(C, CubeRenderer<C>), GraphicsError>
where
    C: GraphicsContext,
    F: FnOnce() -> Result<C, GraphicsError>,
{
    let mut ctx = acquire()?;
    let renderer = CubeRenderer::setup(&mut ctx);
    Ok((ctx, renderer))
}
