use crate::rendering::common::types::{Mesh, VertexBuffers};
use glam::Vec3;
use log::warn;

pub enum MeshMerger {}

impl MeshMerger {
    /// Merge multiple meshes by combining the vertex buffers and counting up the index buffers.
    /// The intended use-case is to merge the per-brush meshes of an entity into one collision mesh.
    pub fn merge_meshes_vertices_only(input_meshes: &[Mesh]) -> Mesh {
        let mut merged_mesh = Mesh {
            vertex_buffers: VertexBuffers::default(),
            index_buffer: Vec::with_capacity(input_meshes.iter().map(|m| m.index_buffer.len()).sum()),
        };

        if input_meshes.is_empty() {
            warn!("Merging 0 meshes");
            return merged_mesh;
        }

        for mesh in input_meshes {
            // Offsetting by the vertex count rather than the highest index keeps unreferenced trailing vertices valid.
            let current_index = merged_mesh.vertex_count() as u32;

            merged_mesh
                .vertex_buffers
                .position_buffer
                .extend_from_slice(&mesh.vertex_buffers.position_buffer);
            merged_mesh
                .vertex_buffers
                .normals_buffer
                .extend_from_slice(&mesh.vertex_buffers.normals_buffer);
            merged_mesh
                .vertex_buffers
                .texcoord_buffer_0
                .extend_from_slice(&mesh.vertex_buffers.texcoord_buffer_0);

            merged_mesh
                .index_buffer
                .extend(mesh.index_buffer.iter().map(|&index| index + current_index));
        }

        merged_mesh
    }

    pub fn mesh_scale_position(mesh: &mut Mesh, scale: Vec3) {
        for pos in &mut mesh.vertex_buffers.position_buffer {
            *pos *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rendering::common::mesh_merger::MeshMerger;
    use crate::rendering::common::types::{Mesh, VertexBuffers};
    use glam::{Vec2, Vec3};

    fn triangle(offset: f32) -> Mesh {
        Mesh {
            vertex_buffers: VertexBuffers {
                position_buffer: vec![
                    Vec3::new(offset, 0.0, 0.0),
                    Vec3::new(offset + 1.0, 0.0, 0.0),
                    Vec3::new(offset, 1.0, 0.0),
                ],
                normals_buffer: vec![],
                texcoord_buffer_0: vec![Vec2::ZERO; 3],
            },
            index_buffer: vec![0, 1, 2],
        }
    }

    #[test]
    pub fn merged_indices_are_offset_by_previous_vertices() {
        let merged = MeshMerger::merge_meshes_vertices_only(&[triangle(0.0), triangle(5.0)]);
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.index_buffer, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(merged.vertex_buffers.position_buffer[3], Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    pub fn merging_nothing_is_empty() {
        assert!(MeshMerger::merge_meshes_vertices_only(&[]).is_empty());
    }

    #[test]
    pub fn scale_position() {
        let mut mesh = triangle(1.0);
        MeshMerger::mesh_scale_position(&mut mesh, Vec3::splat(2.0));
        assert_eq!(mesh.vertex_buffers.position_buffer[1], Vec3::new(4.0, 0.0, 0.0));
    }
}
