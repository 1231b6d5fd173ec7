//! Model / view / projection transforms for the cube.
//!
//! Matrices are column-major `glam::Mat4`. The projection follows the OpenGL
//! clip convention (z in `[-w, w]`); the vertex shader remaps depth for wgpu.

mod camera;

pub use camera::{Perspective, TransformUniform, Transforms, EYE_OFFSET, MODEL_PITCH, MODEL_YAW};
