/// Frustum: six clipping planes for visibility tests.
///
/// Each plane is a Vec4 (A, B, C, D): (A, B, C) is the unit inward normal
/// and D the signed distance. A point P is inside when
/// `dot(plane, P_homogeneous) >= 0` for all six planes.

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six inward-facing frustum planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann extraction for zero-to-one clip depth (the
    /// convention of glam's `perspective_rh` / `orthographic_rh`).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row2,        // near (z >= 0)
            row3 - row2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to a plane (positive = inside).
    pub fn signed_distance(&self, plane: usize, point: Vec3) -> f32 {
        let p = self.planes[plane];
        p.truncate().dot(point) + p.w
    }

    /// Whether `point` lies inside all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|i| self.signed_distance(i, point) >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// "Positive vertex" test: for each plane, the corner furthest along
    /// the normal must be inside. Conservative: may report an intersection
    /// for a box near a frustum corner, never misses a visible box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let p_vertex = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            normal.dot(p_vertex) + plane.w >= 0.0
        })
    }

    /// Whether every plane matches `other` within `max_abs_diff` per component.
    pub fn abs_diff_eq(&self, other: &Frustum, max_abs_diff: f32) -> bool {
        self.planes
            .iter()
            .zip(other.planes.iter())
            .all(|(a, b)| a.abs_diff_eq(*b, max_abs_diff))
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
