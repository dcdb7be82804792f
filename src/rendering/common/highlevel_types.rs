use crate::physics::collider_factory::ColliderProxy;
use crate::rendering::common::types::{Aabb, Mesh};

/// The merged, finalized mesh of one entity's brushes.
#[derive(Debug, Clone)]
pub struct NamedMesh {
    /// `{prefix}-{class_name}#{last_solid_id}`
    pub name: String,
    pub mesh: Mesh,
    pub bounds: Aabb,
}

/// Everything a level import produced, in entity tree order (an entity comes before its descendants).
#[derive(Debug, Clone, Default)]
pub struct ImportedLevel {
    pub meshes: Vec<NamedMesh>,
    pub colliders: Vec<ColliderProxy>,
}

impl ImportedLevel {
    pub fn mesh_by_name(&self, name: &str) -> Option<&NamedMesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }
}
