use brushwork_files::common::types::C3Vector;
use brushwork_files::map::types::{Face, TextureAxis};
use glam::{Vec2, Vec3};

use crate::rendering::common::types::Mesh;

pub struct FaceTriangulator {}

impl FaceTriangulator {
    /// Appends the face as a triangle fan around its first vertex. Indices are relative to the vertex count of
    /// `mesh` at call time, so faces can be accumulated into one shared buffer.
    ///
    /// The face has to be convex and planar, nothing is validated: a concave or self-intersecting loop
    /// silently yields overlapping triangles. Loops with less than three vertices don't append anything.
    pub fn append_face(face: &Face, texture_size: Vec2, texture_scale: f32, mesh: &mut Mesh) {
        let vertex_count = face.vertices.len();
        if vertex_count < 3 {
            return;
        }

        let base = mesh.vertex_count() as u32;
        let buffers = &mut mesh.vertex_buffers;
        buffers.position_buffer.reserve(vertex_count);
        buffers.texcoord_buffer_0.reserve(vertex_count);

        for vertex in &face.vertices {
            let position = to_vec3(*vertex);
            buffers.position_buffer.push(position);
            buffers
                .texcoord_buffer_0
                .push(Self::project_uv(face, position, texture_size) * texture_scale);
        }

        mesh.index_buffer.reserve((vertex_count - 2) * 3);
        for i in 2..vertex_count as u32 {
            mesh.index_buffer
                .extend_from_slice(&[base, base + i - 1, base + i]);
        }
    }

    /// Planar projection onto the face's texture axes, normalized by the texture dimensions.
    pub fn project_uv(face: &Face, position: Vec3, texture_size: Vec2) -> Vec2 {
        Vec2::new(
            Self::project_axis(&face.u_axis, position, texture_size.x),
            Self::project_axis(&face.v_axis, position, texture_size.y),
        )
    }

    fn project_axis(axis: &TextureAxis, position: Vec3, texture_extent: f32) -> f32 {
        // Editors write a scale of 0 for "unscaled"
        let scale = if axis.scale == 0.0 { 1.0 } else { axis.scale };
        let extent = texture_extent.max(1.0);

        // `%` keeps the sign of the shift (like C's fmod), which is what the content was aligned against.
        // rem_euclid would move negative shifts by a whole texture.
        (position.dot(to_vec3(axis.axis) / scale) + axis.shift % extent) / extent
    }
}

fn to_vec3(v: C3Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
