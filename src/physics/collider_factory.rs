use brushwork_files::map::types::{Entity, Solid};
use glam::Vec3;
use itertools::Itertools;
use log::trace;
use nalgebra::Point3;
use rapier3d::geometry::{Collider, ColliderBuilder, MeshConverter};
use thiserror::Error;

use crate::rendering::common::mesh_merger::MeshMerger;
use crate::rendering::common::types::{Aabb, Mesh};
use crate::rendering::importer::build_session::BuildSession;
use crate::rendering::importer::solid_importer::{FaceFilter, SolidMeshBuilder};
use crate::settings::{ColliderMode, ImportSettings};

/// How far a normal component may be off zero while still counting as axis aligned.
const ORTHOGONAL_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    Cuboid { center: Vec3, half_extents: Vec3 },
    /// The triangulated faces of one brush, to be treated as convex
    ConvexHull(Mesh),
    /// All brushes of an entity as one, potentially concave, triangle mesh
    TriMesh(Mesh),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderProxy {
    /// The name of the owning entity's mesh, so it is shared by all colliders of an entity
    pub name: String,
    /// `None` when the collider spans all brushes of the entity
    pub solid_id: Option<u32>,
    pub is_trigger: bool,
    pub shape: ColliderShape,
}

#[derive(Error, Debug)]
pub enum ColliderConversionError {
    #[error("Collider {name} has no vertices")]
    EmptyMesh { name: String },

    #[error("Failed to build the collider {name}: {reason}")]
    MeshConversion { name: String, reason: String },
}

pub enum ColliderFactory {}

impl ColliderFactory {
    /// Creates the colliders for the direct brushes of `entity`. Nonsolid entities don't get any, neither do
    /// brushes that only consist of excluded textures.
    pub fn create_colliders(
        entity: &Entity,
        entity_name: &str,
        builder: &SolidMeshBuilder<'_>,
        session: &mut BuildSession,
    ) -> Vec<ColliderProxy> {
        let settings = builder.settings();
        if settings.is_nonsolid_entity(&entity.class_name) {
            trace!("Skipping colliders for nonsolid {}", entity_name);
            return vec![];
        }

        let is_trigger = settings.is_trigger_entity(&entity.class_name);
        let solids = entity
            .solids()
            .filter(|solid| !Self::is_fully_excluded(solid, settings))
            .collect_vec();

        if settings.collider_mode == ColliderMode::ConcaveAll {
            return Self::create_entity_trimesh(&solids, entity_name, is_trigger, builder, session)
                .into_iter()
                .collect();
        }

        solids
            .into_iter()
            .enumerate()
            .filter_map(|(solid_index, solid)| {
                let shape = match settings.collider_mode {
                    ColliderMode::BoxOnly => Self::bounding_box(solid, settings.scale),
                    ColliderMode::HullOnly => Self::convex_hull(solid, solid_index, builder),
                    ColliderMode::BoxAndHull | ColliderMode::ConcaveAll => {
                        if Self::is_box_eligible(solid) {
                            Self::bounding_box(solid, settings.scale)
                        } else {
                            trace!("Brush {} of {} is not axis aligned", solid.id, entity_name);
                            Self::convex_hull(solid, solid_index, builder)
                        }
                    }
                }?;

                session.note_collider_created();
                Some(ColliderProxy {
                    name: entity_name.to_string(),
                    solid_id: Some(solid.id),
                    is_trigger,
                    shape,
                })
            })
            .collect()
    }

    /// A brush without faces, or where every face is excluded from rendering, doesn't collide.
    pub fn is_fully_excluded(solid: &Solid, settings: &ImportSettings) -> bool {
        solid
            .faces
            .iter()
            .all(|face| settings.is_excluded_texture(&face.texture))
    }

    /// A brush is exactly its bounding box if every face plane is perpendicular to one of the axes.
    pub fn is_box_eligible(solid: &Solid) -> bool {
        !solid.faces.is_empty()
            && solid.faces.iter().all(|face| {
                let normal = Vec3::new(face.plane.normal.x, face.plane.normal.y, face.plane.normal.z).normalize_or_zero();
                normal
                    .to_array()
                    .iter()
                    .filter(|component| component.abs() > ORTHOGONAL_EPSILON)
                    .count()
                    == 1
            })
    }

    fn bounding_box(solid: &Solid, scale: f32) -> Option<ColliderShape> {
        let points = solid
            .faces
            .iter()
            .flat_map(|face| face.vertices.iter())
            .map(|v| Vec3::new(v.x, v.y, v.z) * scale);

        Aabb::from_points(points).map(|aabb| ColliderShape::Cuboid {
            center: aabb.center(),
            half_extents: aabb.half_extents(),
        })
    }

    fn convex_hull(solid: &Solid, solid_index: usize, builder: &SolidMeshBuilder<'_>) -> Option<ColliderShape> {
        builder
            .build_solid(solid, solid_index, FaceFilter::IncludeDiscarded)
            .map(ColliderShape::ConvexHull)
    }

    fn create_entity_trimesh(
        solids: &[&Solid],
        entity_name: &str,
        is_trigger: bool,
        builder: &SolidMeshBuilder<'_>,
        session: &mut BuildSession,
    ) -> Option<ColliderProxy> {
        let meshes = solids
            .iter()
            .enumerate()
            .filter_map(|(solid_index, solid)| builder.build_solid(solid, solid_index, FaceFilter::IncludeDiscarded))
            .collect_vec();

        if meshes.is_empty() {
            return None;
        }

        session.note_collider_created();
        Some(ColliderProxy {
            name: entity_name.to_string(),
            solid_id: None,
            is_trigger,
            shape: ColliderShape::TriMesh(MeshMerger::merge_meshes_vertices_only(&meshes)),
        })
    }
}

impl TryFrom<&ColliderProxy> for Collider {
    type Error = ColliderConversionError;

    fn try_from(value: &ColliderProxy) -> Result<Self, Self::Error> {
        let builder = match &value.shape {
            ColliderShape::Cuboid { center, half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).translation((*center).into())
            }
            ColliderShape::ConvexHull(mesh) => mesh_collider_builder(&value.name, mesh, MeshConverter::ConvexHull)?,
            ColliderShape::TriMesh(mesh) => mesh_collider_builder(&value.name, mesh, MeshConverter::TriMesh)?,
        };

        Ok(builder.sensor(value.is_trigger).build())
    }
}

fn mesh_collider_builder(
    name: &str,
    mesh: &Mesh,
    converter: MeshConverter,
) -> Result<ColliderBuilder, ColliderConversionError> {
    if mesh.is_empty() {
        return Err(ColliderConversionError::EmptyMesh { name: name.to_string() });
    }

    let vertices: Vec<Point3<f32>> = mesh
        .vertex_buffers
        .position_buffer
        .iter()
        .map(|&vert| vert.into())
        .collect();

    ColliderBuilder::converted_trimesh(vertices, mesh.triangles().collect(), converter).map_err(|err| {
        ColliderConversionError::MeshConversion {
            name: name.to_string(),
            reason: format!("{:?}", err),
        }
    })
}
