//! World mapper - normalized hand position to a point on the z=0 plane
//!
//! The hand position is treated as a screen coordinate, unprojected at the
//! near and far clip planes and the resulting camera ray intersected with
//! the scene plane.

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::constants::{CAMERA_FAR, CAMERA_FOV, CAMERA_NEAR, CAMERA_POSITION};

/// Ray directions with |z| below this count as parallel to the plane
const PARALLEL_EPSILON: f32 = 1e-6;

/// Inverse view-projection of the active camera
#[derive(Clone, Debug, PartialEq)]
pub struct CameraProjection {
    inverse_view_projection: Matrix4<f32>,
}

impl CameraProjection {
    /// From the camera's combined projection * view matrix
    pub fn from_view_projection(view_projection: &Matrix4<f32>) -> Self {
        Self {
            inverse_view_projection: view_projection
                .try_inverse()
                .unwrap_or(Matrix4::identity()),
        }
    }

    /// From an already inverted matrix (what the renderer hands over)
    pub fn from_inverse(inverse_view_projection: Matrix4<f32>) -> Self {
        Self {
            inverse_view_projection,
        }
    }

    /// Column-major 16 floats, as WebGL / three.js store them
    pub fn from_inverse_slice(m: &[f32]) -> Option<Self> {
        if m.len() != 16 {
            return None;
        }
        Some(Self::from_inverse(Matrix4::from_column_slice(m)))
    }

    /// Perspective camera at `eye` looking at `target`, +Y up
    pub fn look_at(
        eye: [f32; 3],
        target: [f32; 3],
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let view = Isometry3::look_at_rh(
            &Point3::from(eye),
            &Point3::from(target),
            &Vector3::y(),
        );
        let projection = Perspective3::new(aspect, fov_degrees.to_radians(), near, far);
        Self::from_view_projection(&(projection.as_matrix() * view.to_homogeneous()))
    }

    /// Default scene camera with the given aspect ratio
    pub fn scene(aspect: f32) -> Self {
        Self::look_at(
            CAMERA_POSITION,
            [0.0, 0.0, 0.0],
            CAMERA_FOV,
            aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    /// NDC point back into world space
    pub fn unproject(&self, ndc: Point3<f32>) -> Point3<f32> {
        self.inverse_view_projection.transform_point(&ndc)
    }
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self::scene(1.0)
    }
}

/// Map a normalized (0-1) image position to the z=0 world plane.
///
/// X is mirrored (selfie camera) and Y flipped (image rows grow downward).
/// A ray parallel to the plane maps to the origin.
pub fn hand_to_world(nx: f32, ny: f32, camera: &CameraProjection) -> Vector3<f32> {
    let ndc_x = -(nx * 2.0 - 1.0);
    let ndc_y = -(ny * 2.0 - 1.0);

    let near = camera.unproject(Point3::new(ndc_x, ndc_y, -1.0));
    let far = camera.unproject(Point3::new(ndc_x, ndc_y, 1.0));
    let dir = far - near;

    if dir.z.abs() < PARALLEL_EPSILON {
        return Vector3::zeros();
    }

    let t = -near.z / dir.z;
    let hit = near + dir * t;
    if hit.coords.iter().all(|v| v.is_finite()) {
        hit.coords
    } else {
        Vector3::zeros()
    }
}
