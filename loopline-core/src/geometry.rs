/// Geometry primitives for the diorama meshes
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned box centered on the origin. Everything in the diorama
    /// (walls, roof slab, train car, bird) is one of these.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;
        let mut mesh = Self::with_capacity(12);

        // Front face (+Z)
        mesh.add_quad(
            Vertex::new(-hw, -hh, hd, 0.0, 0.0, 1.0),
            Vertex::new(hw, -hh, hd, 0.0, 0.0, 1.0),
            Vertex::new(hw, hh, hd, 0.0, 0.0, 1.0),
            Vertex::new(-hw, hh, hd, 0.0, 0.0, 1.0),
        );

        // Back face (-Z)
        mesh.add_quad(
            Vertex::new(-hw, -hh, -hd, 0.0, 0.0, -1.0),
            Vertex::new(-hw, hh, -hd, 0.0, 0.0, -1.0),
            Vertex::new(hw, hh, -hd, 0.0, 0.0, -1.0),
            Vertex::new(hw, -hh, -hd, 0.0, 0.0, -1.0),
        );

        // Top face (+Y)
        mesh.add_quad(
            Vertex::new(-hw, hh, -hd, 0.0, 1.0, 0.0),
            Vertex::new(-hw, hh, hd, 0.0, 1.0, 0.0),
            Vertex::new(hw, hh, hd, 0.0, 1.0, 0.0),
            Vertex::new(hw, hh, -hd, 0.0, 1.0, 0.0),
        );

        // Bottom face (-Y)
        mesh.add_quad(
            Vertex::new(-hw, -hh, -hd, 0.0, -1.0, 0.0),
            Vertex::new(hw, -hh, -hd, 0.0, -1.0, 0.0),
            Vertex::new(hw, -hh, hd, 0.0, -1.0, 0.0),
            Vertex::new(-hw, -hh, hd, 0.0, -1.0, 0.0),
        );

        // Right face (+X)
        mesh.add_quad(
            Vertex::new(hw, -hh, -hd, 1.0, 0.0, 0.0),
            Vertex::new(hw, hh, -hd, 1.0, 0.0, 0.0),
            Vertex::new(hw, hh, hd, 1.0, 0.0, 0.0),
            Vertex::new(hw, -hh, hd, 1.0, 0.0, 0.0),
        );

        // Left face (-X)
        mesh.add_quad(
            Vertex::new(-hw, -hh, -hd, -1.0, 0.0, 0.0),
            Vertex::new(-hw, -hh, hd, -1.0, 0.0, 0.0),
            Vertex::new(-hw, hh, hd, -1.0, 0.0, 0.0),
            Vertex::new(-hw, hh, -hd, -1.0, 0.0, 0.0),
        );

        mesh
    }

    fn add_quad(&mut self, v0: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) {
        self.add_triangle(Triangle::new(v0, v1, v2));
        self.add_triangle(Triangle::new(v0, v2, v3));
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_has_twelve_triangles() {
        let mesh = Mesh::cuboid(1.0, 1.0, 2.0);
        assert_eq!(mesh.triangles.len(), 12);
    }

    #[test]
    fn test_cuboid_extents() {
        let mesh = Mesh::cuboid(10.0, 5.0, 10.0);
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                assert!(vertex.position.x.abs() <= 5.0 + 1e-6);
                assert!(vertex.position.y.abs() <= 2.5 + 1e-6);
                assert!(vertex.position.z.abs() <= 5.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = Mesh::cuboid(2.0, 2.0, 2.0);
        for triangle in &mesh.triangles {
            let normal = triangle.calculate_normal();
            let stored = triangle.vertices[0].normal;
            assert!((normal - stored).norm() < 1e-6);
        }
    }
}
