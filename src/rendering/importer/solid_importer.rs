use std::collections::HashSet;

use brushwork_files::map::types::Solid;
use glam::Vec3;
use log::trace;

use crate::rendering::common::mesh_merger::MeshMerger;
use crate::rendering::common::special_types::TextureSizes;
use crate::rendering::common::types::Mesh;
use crate::rendering::importer::face_triangulator::FaceTriangulator;
use crate::settings::ImportSettings;

/// Identifies a face by its position inside an entity: the n-th direct brush and the m-th face of that brush.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceKey {
    pub solid_index: usize,
    pub face_index: usize,
}

/// The faces of one entity that are not rendered because of their texture (sky, clip, triggers, ...).
/// This is derived from the parsed level and the settings, the level itself is never touched, so the same
/// level can be imported with different settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedFaces {
    faces: HashSet<FaceKey>,
}

impl ExcludedFaces {
    pub fn collect<'a>(settings: &ImportSettings, solids: impl IntoIterator<Item = &'a Solid>) -> Self {
        let mut excluded = Self::default();
        excluded.mark(settings, solids);
        excluded
    }

    /// Adds every face with an excluded texture. Faces are only ever added, never removed, so marking the
    /// same brushes again doesn't change anything.
    pub fn mark<'a>(&mut self, settings: &ImportSettings, solids: impl IntoIterator<Item = &'a Solid>) {
        for (solid_index, solid) in solids.into_iter().enumerate() {
            for (face_index, face) in solid.faces.iter().enumerate() {
                if settings.is_excluded_texture(&face.texture) {
                    self.faces.insert(FaceKey {
                        solid_index,
                        face_index,
                    });
                }
            }
        }
    }

    pub fn contains(&self, solid_index: usize, face_index: usize) -> bool {
        self.faces.contains(&FaceKey {
            solid_index,
            face_index,
        })
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[derive(Debug, Copy, Clone)]
pub enum FaceFilter<'a> {
    /// Rendering: skip the faces of the set
    Exclude(&'a ExcludedFaces),
    /// Collision: a clip brush still has to block
    IncludeDiscarded,
}

impl FaceFilter<'_> {
    fn skips(&self, solid_index: usize, face_index: usize) -> bool {
        match self {
            FaceFilter::Exclude(excluded) => excluded.contains(solid_index, face_index),
            FaceFilter::IncludeDiscarded => false,
        }
    }
}

pub struct SolidMeshBuilder<'a> {
    settings: &'a ImportSettings,
    texture_sizes: &'a TextureSizes,
}

impl<'a> SolidMeshBuilder<'a> {
    pub fn new(settings: &'a ImportSettings, texture_sizes: &'a TextureSizes) -> Self {
        Self {
            settings,
            texture_sizes,
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        self.settings
    }

    /// Appends every face of the brush that passes the filter. Returns whether anything was appended.
    pub fn append_solid(&self, solid: &Solid, solid_index: usize, filter: FaceFilter<'_>, mesh: &mut Mesh) -> bool {
        let vertices_before = mesh.vertex_count();

        for (face_index, face) in solid.faces.iter().enumerate() {
            if face.vertices.is_empty() || filter.skips(solid_index, face_index) {
                continue;
            }

            let texture_size = self.texture_sizes.lookup(&face.texture).as_vec2();
            FaceTriangulator::append_face(face, texture_size, self.settings.texture_scale, mesh);
        }

        mesh.vertex_count() > vertices_before
    }

    /// A mesh of just this brush, finalized.
    pub fn build_solid(&self, solid: &Solid, solid_index: usize, filter: FaceFilter<'_>) -> Option<Mesh> {
        let mut mesh = Mesh::default();
        self.append_solid(solid, solid_index, filter, &mut mesh);
        self.finalize(mesh)
    }

    /// Applies the global scale and recomputes the normals. Empty meshes are dropped, the brushes may have only
    /// consisted of tool textures.
    pub fn finalize(&self, mut mesh: Mesh) -> Option<Mesh> {
        if mesh.is_empty() {
            trace!("Dropping empty mesh");
            return None;
        }

        MeshMerger::mesh_scale_position(&mut mesh, Vec3::splat(self.settings.scale));
        mesh.recalculate_normals();
        Some(mesh)
    }
}
