use glam::{UVec2, Vec2, Vec3};
use itertools::Itertools;
use std::fmt::{Debug, Formatter};

#[derive(Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertex_buffers: VertexBuffers,
    /// Triangle list, every three indices form one triangle
    pub index_buffer: Vec<u32>,
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ vertex_buffers: {:?}, ", self.vertex_buffers)?;
        write!(f, "index_buffer: [{}] }}", self.index_buffer.len())
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct VertexBuffers {
    pub position_buffer: Vec<Vec3>,
    /// Empty until [`Mesh::recalculate_normals`] ran
    pub normals_buffer: Vec<Vec3>,
    pub texcoord_buffer_0: Vec<Vec2>,
}

impl Debug for VertexBuffers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ position_buffer: [{}], ", self.position_buffer.len())?;
        write!(f, "normals_buffer: [{}], ", self.normals_buffer.len())?;
        write!(f, "texcoord_buffer_0: [{}] }}", self.texcoord_buffer_0.len())
    }
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.vertex_buffers.position_buffer.is_empty() || self.index_buffer.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_buffers.position_buffer.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.index_buffer.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.index_buffer
            .iter()
            .copied()
            .tuples()
            .map(|(a, b, c)| [a, b, c])
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertex_buffers.position_buffer.iter().copied())
    }

    /// Flat shading: every vertex gets the normal of the triangles it belongs to, following the winding order.
    /// Faces never share vertices, so this is the face normal for every vertex of a face.
    pub fn recalculate_normals(&mut self) {
        let positions = &self.vertex_buffers.position_buffer;
        let mut normals = vec![Vec3::ZERO; positions.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let p0 = positions[a];
            let normal = (positions[b] - p0).cross(positions[c] - p0);
            normals[a] += normal;
            normals[b] += normal;
            normals[c] += normal;
        }

        self.vertex_buffers.normals_buffer = normals.into_iter().map(Vec3::normalize_or_zero).collect();
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Aabb> {
        points.into_iter().fold(None, |aabb, point| match aabb {
            None => Some(Aabb {
                min: point,
                max: point,
            }),
            Some(Aabb { min, max }) => Some(Aabb {
                min: min.min(point),
                max: max.max(point),
            }),
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// A decoded archive image, RGBA8 and row-major with row 0 being the visual top.
#[derive(Clone, PartialEq)]
pub struct DecodedTexture {
    /// `{archive}.{entry}`
    pub name: String,
    /// The lowercase entry name, which is what faces refer to
    pub entry_name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Debug for DecodedTexture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ name: {}, size: {}x{}, data: [{}] }}",
            self.name,
            self.width,
            self.height,
            self.data.len()
        )
    }
}

impl DecodedTexture {
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let start = ((y * self.width + x) * 4) as usize;
        self.data
            .get(start..start + 4)
            .map(|rgba| [rgba[0], rgba[1], rgba[2], rgba[3]])
    }
}
