//! cubecast engine crate.
//!
//! Renders one static, per-vertex colored cube: fixed geometry, one shader
//! program, fixed model/view/projection matrices, one depth-tested indexed draw.

pub mod context;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod transform;
pub mod window;
