//! Face authoring helpers shared by the shape factories.

use crate::error::{GrafError, Result};

use super::vertex::Vertex;

/// Quad corners: top-left, top-right, bottom-right, bottom-left.
pub const QUAD_TEXTURE_COORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Triangle corners: apex, bottom-left, bottom-right.
pub const TRIANGLE_TEXTURE_COORDS: [[f32; 2]; 3] = [[0.5, 1.0], [0.0, 0.0], [1.0, 0.0]];

#[inline]
pub fn set_texture_coordinate(vertex: &mut Vertex, s: f32, t: f32) {
    vertex.tex_coord = [s, t];
}

/// Writes `coords[i]` into `vertices[offset + i]`.
pub fn assign_texture_coordinates(
    vertices: &mut [Vertex],
    offset: usize,
    coords: &[[f32; 2]],
) -> Result<()> {
    let slots = slot_range(vertices.len(), offset, coords.len(), "texture coordinates")?;

    for (vertex, &[s, t]) in vertices[slots].iter_mut().zip(coords) {
        set_texture_coordinate(vertex, s, t);
    }
    Ok(())
}

/// Fills `vertex_indices.len()` vertices starting at `offset` with
/// `positions[vertex_indices[i]]`, then assigns `texture_coords` to the same slots.
pub fn define_face(
    vertices: &mut [Vertex],
    offset: usize,
    positions: &[[f32; 3]],
    vertex_indices: &[usize],
    texture_coords: &[[f32; 2]],
) -> Result<()> {
    let slots = slot_range(vertices.len(), offset, vertex_indices.len(), "face")?;

    let resolved = vertex_indices
        .iter()
        .map(|&index| {
            positions.get(index).copied().ok_or_else(|| {
                GrafError::domain(format!(
                    "face references position {index} of {}",
                    positions.len()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for (vertex, position) in vertices[slots].iter_mut().zip(resolved) {
        vertex.position = position;
    }

    assign_texture_coordinates(vertices, offset, texture_coords)
}

/// Appends two triangles per quad face, covering vertex blocks of four
/// starting at `offset`: `(0, 2, 1)` and `(0, 3, 2)` relative to each block.
pub fn generate_face_indices(indices: &mut Vec<u32>, face_count: u32, offset: u32) {
    indices.reserve(face_count as usize * 6);
    for face in 0..face_count {
        let base = offset + face * 4;
        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }
}

fn slot_range(len: usize, offset: usize, count: usize, what: &str) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(GrafError::domain(format!(
            "{what} of {count} vertices at offset {offset} exceeds {len} allocated vertices"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── texture coordinates ───────────────────────────────────────────────

    #[test]
    fn assign_writes_each_slot() {
        let mut v = vec![Vertex::default(); 6];
        assign_texture_coordinates(&mut v, 2, &QUAD_TEXTURE_COORDS).unwrap();

        for (i, coord) in QUAD_TEXTURE_COORDS.iter().enumerate() {
            assert_eq!(v[2 + i].tex_coord, *coord);
        }
        assert_eq!(v[0].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn assign_past_end_is_domain_error() {
        let mut v = vec![Vertex::default(); 4];
        let err = assign_texture_coordinates(&mut v, 1, &QUAD_TEXTURE_COORDS).unwrap_err();
        assert!(err.is_domain());
        assert_eq!(v, vec![Vertex::default(); 4]);
    }

    // ── faces ─────────────────────────────────────────────────────────────

    #[test]
    fn define_face_copies_positions_and_uvs() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mut v = vec![Vertex::default(); 3];
        define_face(&mut v, 0, &positions, &[2, 0, 1], &TRIANGLE_TEXTURE_COORDS).unwrap();

        assert_eq!(v[0], Vertex::new([0.0, 1.0, 0.0], [0.5, 1.0]));
        assert_eq!(v[1], Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]));
        assert_eq!(v[2], Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]));
    }

    #[test]
    fn define_face_checks_both_ranges() {
        let positions = [[0.0; 3]; 4];
        let mut v = vec![Vertex::default(); 4];

        assert!(define_face(&mut v, 1, &positions, &[0, 1, 2, 3], &QUAD_TEXTURE_COORDS)
            .unwrap_err()
            .is_domain());
        assert!(define_face(&mut v, 0, &positions, &[0, 1, 2, 4], &QUAD_TEXTURE_COORDS)
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn bad_position_leaves_vertices_untouched() {
        let positions = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let mut v = vec![Vertex::default(); 3];

        let err = define_face(&mut v, 0, &positions, &[0, 1, 9], &TRIANGLE_TEXTURE_COORDS);
        assert!(err.unwrap_err().is_domain());
        assert_eq!(v, vec![Vertex::default(); 3]);
    }

    // ── indices ───────────────────────────────────────────────────────────

    #[test]
    fn face_indices_split_each_quad() {
        let mut indices = Vec::new();
        generate_face_indices(&mut indices, 2, 0);
        assert_eq!(indices, vec![0, 2, 1, 0, 3, 2, 4, 6, 5, 4, 7, 6]);
    }

    #[test]
    fn face_indices_respect_offset() {
        let mut indices = vec![0, 1, 2];
        generate_face_indices(&mut indices, 1, 12);
        assert_eq!(indices, vec![0, 1, 2, 12, 14, 13, 12, 15, 14]);
    }
}
