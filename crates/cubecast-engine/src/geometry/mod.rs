//! Fixed cube geometry.
//!
//! Data is stored as flat attribute arrays, one per GPU buffer, rather than an
//! interleaved vertex struct: positions and colors are uploaded separately.

mod cube;

pub use cube::{
    bounding_box, faces, index_count, triangles, vertex_count, Aabb, Quad, Triangle, COLORS,
    COLOR_COMPONENTS, INDICES, POSITIONS, POSITION_COMPONENTS,
};
