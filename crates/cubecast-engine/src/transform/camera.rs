use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Rotation about +Y, applied to the cube after the pitch. Radians.
pub const MODEL_YAW: f32 = FRAC_PI_6;

/// Rotation about +X, applied to the cube first. Radians.
pub const MODEL_PITCH: f32 = FRAC_PI_6;

/// World-to-camera translation: centers the cube horizontally and backs off 15 units.
pub const EYE_OFFSET: Vec3 = Vec3::new(-2.5, -2.5, -15.0);

/// Perspective projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Perspective {
    /// Right-handed projection with OpenGL depth range (clip z in `[-w, w]`).
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far)
    }
}

/// The three matrices uploaded as uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    perspective: Perspective,
}

impl Transforms {
    pub fn new(aspect: f32) -> Self {
        Self::with_perspective(aspect, Perspective::default())
    }

    pub fn with_perspective(aspect: f32, perspective: Perspective) -> Self {
        Self {
            model: Mat4::from_rotation_y(MODEL_YAW) * Mat4::from_rotation_x(MODEL_PITCH),
            view: Mat4::from_translation(EYE_OFFSET),
            projection: perspective.matrix(aspect),
            perspective,
        }
    }

    /// Builds transforms for a drawing surface of `width` x `height` pixels.
    ///
    /// Zero dimensions are clamped to 1 so the projection stays finite.
    pub fn for_surface(width: u32, height: u32) -> Self {
        Self::new(aspect_ratio(width, height))
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Recomputes the projection for a new surface size. Model and view are fixed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection = self.perspective.matrix(aspect_ratio(width, height));
    }

    /// `projection * view * model`, the object-to-clip transform the shader applies.
    pub fn clip_from_object(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    pub fn uniform(&self) -> TransformUniform {
        TransformUniform {
            model: self.model.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// GPU layout of the transforms: three column-major `mat4x4<f32>`, in shader order.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    use crate::geometry::{POSITIONS, POSITION_COMPONENTS};

    const EPS: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() <= EPS * expected.abs().max(1.0),
            "{what}: {actual} != {expected}"
        );
    }

    // ── projection ────────────────────────────────────────────────────────

    fn check_standard_perspective(aspect: f32) {
        let p = Perspective::default();
        let m = p.matrix(aspect);
        let f = 1.0 / (p.fov_y / 2.0).tan();
        let nf = 1.0 / (p.near - p.far);

        // Column-major: cols[c][r].
        let cols = m.to_cols_array_2d();
        let mut expected = [[0.0f32; 4]; 4];
        expected[0][0] = f / aspect;
        expected[1][1] = f;
        expected[2][2] = (p.far + p.near) * nf;
        expected[2][3] = -1.0;
        expected[3][2] = 2.0 * p.far * p.near * nf;

        for c in 0..4 {
            for r in 0..4 {
                assert_close(cols[c][r], expected[c][r], &format!("aspect {aspect} m[{c}][{r}]"));
            }
        }
    }

    #[test]
    fn projection_matches_standard_perspective_formula() {
        for aspect in [800.0 / 600.0, 1.0, 16.0 / 9.0, 300.0 / 150.0, 0.5] {
            check_standard_perspective(aspect);
        }
    }

    #[test]
    fn default_perspective_constants() {
        let p = Perspective::default();
        assert_close(p.fov_y.to_degrees(), 45.0, "fov");
        assert_close(p.near, 0.1, "near");
        assert_close(p.far, 100.0, "far");
    }

    #[test]
    fn near_and_far_planes_map_to_gl_depth_range() {
        let m = Perspective::default().matrix(1.0);
        let near = m * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_close(near.z / near.w, -1.0, "near ndc z");
        assert_close(far.z / far.w, 1.0, "far ndc z");
    }

    #[test]
    fn zero_sized_surface_keeps_projection_finite() {
        for (w, h) in [(800, 0), (0, 600), (0, 0)] {
            let t = Transforms::for_surface(w, h);
            assert!(t.projection.is_finite(), "{w}x{h}");
        }
    }

    #[test]
    fn resize_only_changes_projection() {
        let mut t = Transforms::for_surface(800, 600);
        let before = t;
        t.resize(1920, 1080);

        assert_eq!(t.model, before.model);
        assert_eq!(t.view, before.view);
        assert!(t.projection.abs_diff_eq(Perspective::default().matrix(1920.0 / 1080.0), EPS));
        assert!(!t.projection.abs_diff_eq(before.projection, EPS));
    }

    // ── model / view ──────────────────────────────────────────────────────

    #[test]
    fn model_applies_pitch_then_yaw() {
        let t = Transforms::new(1.0);
        let z = t.model.transform_vector3(Vec3::Z);

        // Rx(30°) takes +Z to (0, -sin, cos); Ry(30°) then swings it toward +X.
        let (s, c) = FRAC_PI_6.sin_cos();
        assert!(z.abs_diff_eq(Vec3::new(c * s, -s, c * c), EPS), "{z:?}");
    }

    #[test]
    fn model_is_a_pure_rotation() {
        let t = Transforms::new(1.0);
        assert_close(t.model.determinant(), 1.0, "det");
        assert!(t.model.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn view_translates_world_origin() {
        let t = Transforms::new(1.0);
        let o = t.view.transform_point3(Vec3::ZERO);
        assert!(o.abs_diff_eq(Vec3::new(-2.5, -2.5, -15.0), EPS), "{o:?}");
    }

    #[test]
    fn every_corner_sits_between_near_and_far() {
        let t = Transforms::for_surface(800, 600);
        let p = t.perspective();
        let clip_from_object = t.clip_from_object();

        for corner in POSITIONS.chunks_exact(POSITION_COMPONENTS) {
            let obj = Vec4::new(corner[0], corner[1], corner[2], 1.0);
            let clip = clip_from_object * obj;

            assert!(clip.w > p.near && clip.w < p.far, "{corner:?} w={}", clip.w);
            let ndc_z = clip.z / clip.w;
            assert!((-1.0..=1.0).contains(&ndc_z), "{corner:?} ndc z={ndc_z}");
        }
    }

    // ── uniform ───────────────────────────────────────────────────────────

    #[test]
    fn uniform_is_three_column_major_mat4() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 3 * 64);

        let t = Transforms::for_surface(640, 480);
        let u = t.uniform();
        assert_eq!(u.model, t.model.to_cols_array_2d());
        assert_eq!(u.view, t.view.to_cols_array_2d());
        assert_eq!(u.projection, t.projection.to_cols_array_2d());

        // Translation lives in the last column.
        assert_eq!(u.view[3], [-2.5, -2.5, -15.0, 1.0]);

        let bytes: &[u8] = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 192);
    }
}
