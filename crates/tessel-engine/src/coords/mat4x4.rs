use core::ops::Mul;

use super::Mat3x2;

/// 4×4 matrix (row-vector convention, same as [`Mat3x2`]).
///
/// Uploaded to shaders as-is: a WGSL `mat4x4<f32>` reads the rows as columns,
/// so `u_matrix * vec4(pos, 0.0, 1.0)` yields `[pos 0 1] * M`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4x4 {
    pub rows: [[f32; 4]; 4],
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4x4 {
    pub const IDENTITY: Mat4x4 = Mat4x4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Off-center orthographic projection.
    ///
    /// `bottom`/`top` select the vertical direction: `(height, 0)` gives a
    /// top-left origin, `(0, height)` a bottom-left one. Depth maps
    /// `[near, far]` onto `[1, 0]`.
    pub fn ortho_offcenter(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0][0] = 2.0 / (right - left);
        m.rows[1][1] = 2.0 / (top - bottom);
        m.rows[2][2] = 1.0 / (near - far);
        m.rows[3][0] = (left + right) / (left - right);
        m.rows[3][1] = (top + bottom) / (bottom - top);
        m.rows[3][2] = near / (near - far);
        m
    }

    /// Embeds a 2D affine transform.
    pub fn from_mat3x2(m: Mat3x2) -> Self {
        Self {
            rows: [
                [m.m11, m.m12, 0.0, 0.0],
                [m.m21, m.m22, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [m.m31, m.m32, 0.0, 1.0],
            ],
        }
    }

    /// Transforms `(x, y, 0, 1)` and returns the resulting `(x, y, z, w)`.
    #[inline]
    pub fn transform_xy(&self, x: f32, y: f32) -> [f32; 4] {
        let r = &self.rows;
        let mut out = [0.0; 4];
        for (i, o) in out.iter_mut().enumerate() {
            *o = x * r[0][i] + y * r[1][i] + r[3][i];
        }
        out
    }

    /// Raw data in upload order.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.rows
    }
}

impl Mul for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Mat4x4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Mat4x4 { rows: out }
    }
}
