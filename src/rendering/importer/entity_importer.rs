use brushwork_files::map::types::Entity;
use itertools::Itertools;
use log::{debug, trace};

use crate::physics::collider_factory::ColliderFactory;
use crate::rendering::common::highlevel_types::{ImportedLevel, NamedMesh};
use crate::rendering::common::special_types::TextureSizes;
use crate::rendering::common::types::Mesh;
use crate::rendering::importer::build_session::BuildSession;
use crate::rendering::importer::solid_importer::{ExcludedFaces, FaceFilter, SolidMeshBuilder};
use crate::settings::ImportSettings;

pub struct EntityMeshAggregator<'a> {
    builder: SolidMeshBuilder<'a>,
}

impl<'a> EntityMeshAggregator<'a> {
    pub fn new(settings: &'a ImportSettings, texture_sizes: &'a TextureSizes) -> Self {
        Self {
            builder: SolidMeshBuilder::new(settings, texture_sizes),
        }
    }

    /// Walks the entity tree depth first and builds one mesh per entity plus the colliders of its brushes.
    /// Every call is its own build session.
    pub fn import(&self, root: &Entity) -> ImportedLevel {
        let mut session = BuildSession::new();
        let mut level = ImportedLevel::default();
        self.import_entity(root, &mut session, &mut level);

        debug!(
            "Imported {} meshes and {} colliders",
            level.meshes.len(),
            session.colliders_created()
        );
        level
    }

    fn import_entity(&self, entity: &Entity, session: &mut BuildSession, level: &mut ImportedLevel) {
        let solids = entity.solids().collect_vec();
        trace!(
            "Importing {} with {} brushes",
            entity.class_name,
            solids.len()
        );

        // Exclusion has to be decided for the whole entity before the first brush is built.
        let excluded = ExcludedFaces::collect(self.builder.settings(), solids.iter().copied());

        let mut mesh = Mesh::default();
        let mut last_solid_id = None;
        for (solid_index, solid) in solids.iter().enumerate() {
            if self
                .builder
                .append_solid(solid, solid_index, FaceFilter::Exclude(&excluded), &mut mesh)
            {
                last_solid_id = Some(solid.id);
            }
        }

        // Without any brush there is nothing to name the colliders after either.
        if let Some(last_solid_id) = last_solid_id.or_else(|| solids.last().map(|solid| solid.id)) {
            let name = self.entity_name(entity, last_solid_id);

            match self.builder.finalize(mesh) {
                Some(mesh) => {
                    if let Some(bounds) = mesh.bounds() {
                        level.meshes.push(NamedMesh {
                            name: name.clone(),
                            mesh,
                            bounds,
                        });
                    }
                }
                None => debug!("{} has no visible geometry", name),
            }

            level
                .colliders
                .extend(ColliderFactory::create_colliders(
                    entity,
                    &name,
                    &self.builder,
                    session,
                ));
        }

        for child in entity.entities() {
            self.import_entity(child, session, level);
        }
    }

    fn entity_name(&self, entity: &Entity, last_solid_id: u32) -> String {
        format!(
            "{}-{}#{}",
            self.builder.settings().entity_name_prefix,
            entity.class_name,
            last_solid_id
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rendering::common::special_types::TextureSizes;
    use crate::rendering::importer::entity_importer::EntityMeshAggregator;
    use crate::settings::ImportSettings;
    use brushwork_files::common::types::C3Vector;
    use brushwork_files::map::types::{Entity, NodeChild, Solid};
    use glam::UVec2;

    fn cube(id: u32, offset: f32, texture: &str) -> NodeChild {
        NodeChild::Solid(Solid::cuboid(
            id,
            C3Vector::new(offset, 0.0, 0.0),
            C3Vector::new(offset + 1.0, 1.0, 1.0),
            texture,
        ))
    }

    #[test]
    pub fn one_mesh_per_entity_in_tree_order() {
        let settings = ImportSettings::default();
        let sizes = TextureSizes::new(UVec2::ONE);

        let door = Entity::new("func_door").with_child(cube(3, 4.0, "door"));
        let wall = Entity::new("func_wall")
            .with_child(cube(4, 6.0, "metal"))
            .with_child(NodeChild::Entity(Entity::new("func_button").with_child(cube(5, 8.0, "button"))));
        let root = Entity::new("worldspawn")
            .with_child(cube(1, 0.0, "stone"))
            .with_child(NodeChild::Entity(door))
            .with_child(cube(2, 2.0, "stone"))
            .with_child(NodeChild::Entity(wall));

        let level = EntityMeshAggregator::new(&settings, &sizes).import(&root);
        let names = level.meshes.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "entity-worldspawn#2",
                "entity-func_door#3",
                "entity-func_wall#4",
                "entity-func_button#5"
            ]
        );

        // worldspawn merges its two direct brushes, but not the ones of its children
        assert_eq!(level.meshes[0].mesh.vertex_count(), 48);
        assert_eq!(level.meshes[0].mesh.triangle_count(), 24);
    }

    #[test]
    pub fn empty_entities_are_skipped_but_their_children_are_not() {
        let settings = ImportSettings::default();
        let sizes = TextureSizes::new(UVec2::ONE);

        let trigger = Entity::new("trigger_once")
            .with_child(cube(2, 0.0, "trigger"))
            .with_child(NodeChild::Entity(Entity::new("func_wall").with_child(cube(3, 0.0, "stone"))));
        let root = Entity::new("worldspawn").with_child(NodeChild::Entity(trigger));

        let level = EntityMeshAggregator::new(&settings, &sizes).import(&root);
        assert_eq!(level.meshes.len(), 1);
        assert_eq!(level.meshes[0].name, "entity-func_wall#3");
    }

    #[test]
    pub fn imports_are_reproducible() {
        let settings = ImportSettings::default();
        let sizes = TextureSizes::new(UVec2::new(64, 64));
        let root = Entity::new("worldspawn")
            .with_child(cube(1, 0.0, "stone"))
            .with_child(cube(2, 3.0, "clip"));

        let aggregator = EntityMeshAggregator::new(&settings, &sizes);
        let first = aggregator.import(&root);
        let second = aggregator.import(&root);

        assert_eq!(first.meshes.len(), second.meshes.len());
        assert_eq!(first.meshes[0].mesh, second.meshes[0].mesh);
        assert_eq!(first.colliders, second.colliders);
    }
}
