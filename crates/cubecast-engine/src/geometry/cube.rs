/// Floats per position (x, y, z).
pub const POSITION_COMPONENTS: usize = 3;

/// Floats per color (r, g, b, a).
pub const COLOR_COMPONENTS: usize = 4;

/// Object-space corner positions of a cube with edge length 5 anchored at the origin.
#[rustfmt::skip]
pub const POSITIONS: [f32; 8 * POSITION_COMPONENTS] = [
    0.0, 0.0, 0.0,
    5.0, 0.0, 0.0,
    5.0, 5.0, 0.0,
    0.0, 5.0, 0.0,
    0.0, 0.0, 5.0,
    5.0, 0.0, 5.0,
    5.0, 5.0, 5.0,
    0.0, 5.0, 5.0,
];

/// Straight-alpha RGBA per vertex: red on even vertices, magenta on odd ones.
#[rustfmt::skip]
pub const COLORS: [f32; 8 * COLOR_COMPONENTS] = [
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 1.0, 1.0,
];

/// Two triangles per face. Winding is not consistent across faces, so the
/// pipeline must not cull.
#[rustfmt::skip]
pub const INDICES: [u16; 36] = [
    0, 1, 2,  0, 2, 3, // front  (z = 0)
    4, 5, 6,  4, 6, 7, // back   (z = 5)
    0, 1, 5,  0, 5, 4, // bottom (y = 0)
    3, 2, 6,  3, 6, 7, // top    (y = 5)
    1, 2, 6,  1, 6, 5, // right  (x = 5)
    0, 3, 7,  0, 7, 4, // left   (x = 0)
];

pub type Triangle = [u16; 3];

/// A cube face as the two triangles that cover it.
pub type Quad = [Triangle; 2];

/// Axis-aligned bounding box in object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

#[inline]
pub const fn vertex_count() -> usize {
    POSITIONS.len() / POSITION_COMPONENTS
}

#[inline]
pub const fn index_count() -> u32 {
    INDICES.len() as u32
}

pub fn triangles() -> impl Iterator<Item = Triangle> {
    INDICES.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
}

/// Faces in index-list order; each face is six consecutive indices.
pub fn faces() -> impl Iterator<Item = Quad> {
    INDICES
        .chunks_exact(6)
        .map(|q| [[q[0], q[1], q[2]], [q[3], q[4], q[5]]])
}

pub fn bounding_box() -> Aabb {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];

    for p in POSITIONS.chunks_exact(POSITION_COMPONENTS) {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    Aabb { min, max }
}
