//! Cube rendering.
//!
//! The renderer is written against `context::GraphicsContext` so the same setup
//! and draw sequence runs on wgpu and in tests.

mod cube;

pub use cube::{launch, CubeRenderer, ATTRIBUTES, CLEAR_COLOR, SHADER_SOURCE};
