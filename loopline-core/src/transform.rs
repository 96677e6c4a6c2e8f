/// Object poses and model-matrix helpers
use nalgebra::{Matrix4, Point3, Vector3};

/// Position plus yaw. Every object in the diorama stays upright, so a single
/// rotation axis is enough.
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub position: Point3<f32>,
    pub yaw: f32,
}

impl Pose {
    pub fn new(position: Point3<f32>, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            yaw: 0.0,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.position) * Transform::yaw_matrix(self.yaw)
    }
}

/// Transform builder for model matrices
pub struct Transform;

impl Transform {
    /// Rotation about the world Y axis.
    pub fn yaw_matrix(yaw: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, yaw, 0.0))
    }

    pub fn translation_matrix(position: Point3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(&position.coords)
    }
}
