/// Static scene description: the office block, the track, and the actors
use nalgebra::{Point3, Vector3};

use crate::geometry::Mesh;
use crate::transform::Pose;

/// Linear RGB color in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// One box-shaped node in the diorama.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: &'static str,
    /// Box dimensions: width, height, depth.
    pub dims: Vector3<f32>,
    pub color: Color,
    pub pose: Pose,
}

impl SceneNode {
    pub fn mesh(&self) -> Mesh {
        Mesh::cuboid(self.dims.x, self.dims.y, self.dims.z)
    }
}

/// Track geometry shared by the blueprint and the motion session.
#[derive(Debug, Clone, Copy)]
pub struct TrackLayout {
    /// Center of the circular track; its height is the orbiter's ride height.
    pub center: Point3<f32>,
    pub radius: f32,
    /// Where the follower enters the scene.
    pub bird_start: Point3<f32>,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            center: Point3::new(0.0, 0.5, 0.0),
            radius: 8.0,
            bird_start: Point3::new(0.0, 8.0, 0.0),
        }
    }
}

/// Everything static about the diorama, plus initial actor placement.
///
/// Render hosts turn this into whatever their scene-graph collaborator
/// needs; the core itself never talks to a renderer.
#[derive(Debug, Clone)]
pub struct SceneBlueprint {
    pub background: Color,
    /// Unit vector pointing toward the light source.
    pub light_direction: Vector3<f32>,
    pub track: TrackLayout,
    /// Immobile geometry: the office walls and roof.
    pub statics: Vec<SceneNode>,
    pub train: SceneNode,
    pub bird: SceneNode,
}

impl SceneBlueprint {
    /// The office diorama: white walls under a red roof slab, a blue train
    /// car on the surrounding track, a bird overhead.
    pub fn office_diorama() -> Self {
        let layout = TrackLayout::default();

        let walls = SceneNode {
            name: "walls",
            dims: Vector3::new(10.0, 5.0, 10.0),
            color: Color::from_hex(0xffffff),
            pose: Pose::at(0.0, 2.5, 0.0),
        };
        let roof = SceneNode {
            name: "roof",
            dims: Vector3::new(10.2, 0.5, 10.2),
            color: Color::from_hex(0xff0000),
            pose: Pose::at(0.0, 5.25, 0.0),
        };
        let train = SceneNode {
            name: "train",
            dims: Vector3::new(1.0, 1.0, 2.0),
            color: Color::from_hex(0x3333ff),
            pose: Pose::new(
                Point3::new(layout.center.x + layout.radius, layout.center.y, layout.center.z),
                std::f32::consts::FRAC_PI_2,
            ),
        };
        let bird = SceneNode {
            name: "bird",
            dims: Vector3::new(0.6, 0.4, 0.8),
            color: Color::from_hex(0xffcc00),
            pose: Pose::new(layout.bird_start, 0.0),
        };

        Self {
            background: Color::from_hex(0xaee2ff),
            light_direction: Vector3::new(10.0, 20.0, 10.0).normalize(),
            track: layout,
            statics: vec![walls, roof],
            train,
            bird,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let sky = Color::from_hex(0xaee2ff);
        assert!((sky.r - 174.0 / 255.0).abs() < 1e-6);
        assert!((sky.g - 226.0 / 255.0).abs() < 1e-6);
        assert!((sky.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_train_starts_on_the_track() {
        let blueprint = SceneBlueprint::office_diorama();
        let layout = blueprint.track;
        let start = blueprint.train.pose.position;
        let dx = start.x - layout.center.x;
        let dz = start.z - layout.center.z;
        assert!(((dx * dx + dz * dz).sqrt() - layout.radius).abs() < 1e-6);
    }

    #[test]
    fn test_light_direction_is_normalized() {
        let blueprint = SceneBlueprint::office_diorama();
        assert!((blueprint.light_direction.norm() - 1.0).abs() < 1e-6);
    }
}
