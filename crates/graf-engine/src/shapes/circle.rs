use crate::error::{GrafError, Result};
use crate::mesh::{MeshData, Vertex, assign_texture_coordinates};

/// Unit circle in the z = 0 plane, fanned from the first rim vertex.
#[derive(Debug, Clone, Copy)]
pub struct CircleFactory {
    angle_step: u32,
}

impl CircleFactory {
    /// `angle_step` is in degrees and must divide 360.
    pub fn new(angle_step: u32) -> Result<Self> {
        if angle_step == 0 || 360 % angle_step != 0 {
            return Err(GrafError::config(format!(
                "circle angle step {angle_step} does not divide 360 degrees"
            )));
        }
        Ok(Self { angle_step })
    }

    pub fn angle_step(&self) -> u32 {
        self.angle_step
    }

    pub fn vertex_count(&self) -> u32 {
        360 / self.angle_step
    }

    pub fn build_mesh(&self) -> Result<MeshData> {
        let vertex_count = self.vertex_count();

        let (mut vertices, coords): (Vec<Vertex>, Vec<[f32; 2]>) = (0..vertex_count)
            .map(|i| {
                let (sin, cos) = ((i * self.angle_step) as f32).to_radians().sin_cos();
                (
                    Vertex::new([cos, sin, 0.0], [0.0, 0.0]),
                    [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
                )
            })
            .unzip();
        assign_texture_coordinates(&mut vertices, 0, &coords)?;

        let face_count = vertex_count.saturating_sub(2);
        let indices = (0..face_count).flat_map(|i| [0, i + 2, i + 1]).collect();

        Ok(MeshData::new(vertices, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::{assert_well_formed, normal};

    #[test]
    fn ten_degree_step() {
        let mesh = CircleFactory::new(10).unwrap().build_mesh().unwrap();
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 34);
    }

    #[test]
    fn right_angle_step() {
        let mesh = CircleFactory::new(90).unwrap().build_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 2, 1, 0, 3, 2]);
    }

    #[test]
    fn rim_and_uvs_stay_on_the_unit_circle() {
        let mesh = CircleFactory::new(30).unwrap().build_mesh().unwrap();
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert!((x * x + y * y - 1.0).abs() < 1e-5);
            assert_eq!(z, 0.0);
            assert!((v.tex_coord[0] - (0.5 + 0.5 * x)).abs() < 1e-6);
            assert!((v.tex_coord[1] - (0.5 + 0.5 * y)).abs() < 1e-6);
        }
    }

    #[test]
    fn fan_winds_consistently() {
        let mesh = CircleFactory::new(45).unwrap().build_mesh().unwrap();
        assert!(mesh.triangles().all(|tri| normal(tri)[2] < 0.0));
    }

    #[test]
    fn step_must_divide_full_turn() {
        assert!(CircleFactory::new(0).unwrap_err().is_config());
        assert!(CircleFactory::new(7).unwrap_err().is_config());
        assert!(CircleFactory::new(361).unwrap_err().is_config());
    }

    #[test]
    fn half_turn_step_has_no_faces() {
        let mesh = CircleFactory::new(180).unwrap().build_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 2);
        assert!(mesh.indices.is_empty());
        assert!(mesh.validate().unwrap_err().is_buffer());
    }
}
