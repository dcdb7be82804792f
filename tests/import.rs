use std::io::Write;

use brushwork::physics::collider_factory::ColliderShape;
use brushwork::rendering::common::special_types::TextureSizes;
use brushwork::rendering::importer::entity_importer::EntityMeshAggregator;
use brushwork::rendering::loader::level_loader::{LevelLoadError, LevelLoader};
use brushwork::settings::ImportSettings;
use brushwork_files::common::types::C3Vector;
use brushwork_files::map::types::{Entity, NodeChild, Solid};
use glam::{UVec2, Vec3};
use rapier3d::geometry::Collider;

fn cube(id: u32, min: f32, max: f32, texture: &str) -> Solid {
    Solid::cuboid(id, C3Vector::new(min, min, min), C3Vector::new(max, max, max), texture)
}

#[test_log::test]
fn stone_and_sky_give_one_mesh_and_one_box() {
    let settings = ImportSettings::default();
    let sizes = TextureSizes::new(settings.default_texture_size);
    let root = Entity::new("worldspawn")
        .with_child(NodeChild::Solid(cube(7, 0.0, 64.0, "stone")))
        .with_child(NodeChild::Solid(cube(8, 128.0, 192.0, "sky")));

    let level = EntityMeshAggregator::new(&settings, &sizes).import(&root);

    assert_eq!(level.meshes.len(), 1);
    let mesh = &level.meshes[0];
    assert_eq!(mesh.name, "entity-worldspawn#7");
    assert_eq!(mesh.mesh.vertex_count(), 24);
    assert_eq!(mesh.mesh.triangle_count(), 12);
    assert_eq!(mesh.bounds.min, Vec3::ZERO);
    assert_eq!(mesh.bounds.max, Vec3::splat(64.0));

    assert_eq!(level.colliders.len(), 1);
    let collider = &level.colliders[0];
    assert_eq!(collider.name, "entity-worldspawn#7");
    assert_eq!(collider.solid_id, Some(7));
    assert_eq!(
        collider.shape,
        ColliderShape::Cuboid {
            center: Vec3::splat(32.0),
            half_extents: Vec3::splat(32.0)
        }
    );
    assert!(Collider::try_from(collider).is_ok());
}

#[test_log::test]
fn empty_solid_gives_nothing() {
    let settings = ImportSettings::default();
    let sizes = TextureSizes::new(UVec2::ONE);
    let root = Entity::new("worldspawn").with_child(NodeChild::Solid(Solid { id: 1, faces: vec![] }));

    let level = EntityMeshAggregator::new(&settings, &sizes).import(&root);
    assert!(level.meshes.is_empty());
    assert!(level.colliders.is_empty());
}

#[test_log::test]
fn loads_a_level_from_disk() -> Result<(), anyhow::Error> {
    let root = Entity::new("worldspawn")
        .with_child(NodeChild::Solid(cube(1, 0.0, 32.0, "stone")))
        .with_child(NodeChild::Entity(
            Entity::new("func_door").with_child(NodeChild::Solid(cube(2, 40.0, 48.0, "door"))),
        ));

    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(serde_json::to_string(&root)?.as_bytes())?;
    file.flush()?;

    let loaded = LevelLoader::load(file.path())?;
    assert_eq!(loaded, root);

    let settings = ImportSettings {
        scale: 0.5,
        entity_name_prefix: "level".to_string(),
        ..Default::default()
    };
    let sizes = TextureSizes::new(UVec2::new(64, 64));
    let level = EntityMeshAggregator::new(&settings, &sizes).import(&loaded);

    assert_eq!(level.meshes.len(), 2);
    assert!(level.mesh_by_name("level-func_door#2").is_some());
    assert_eq!(level.meshes[0].bounds.max, Vec3::splat(16.0));
    Ok(())
}

#[test_log::test]
fn unsupported_extension_has_no_importer() -> Result<(), anyhow::Error> {
    let file = tempfile::Builder::new().suffix(".bsp").tempfile()?;
    let result = LevelLoader::load(file.path());
    assert!(matches!(result, Err(LevelLoadError::NoImporter { .. })));
    Ok(())
}

#[test_log::test]
fn missing_level_names_the_path() {
    let path = std::env::temp_dir().join("brushwork-missing-level.json");
    match LevelLoader::load(&path) {
        Err(err @ LevelLoadError::Io { .. }) => {
            assert!(err.to_string().contains("brushwork-missing-level.json"))
        }
        other => panic!("Expected an IO error, got {:?}", other),
    }
}

#[test_log::test]
fn malformed_level_is_a_parse_error() -> Result<(), anyhow::Error> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(b"{ \"class_name\": ")?;
    file.flush()?;

    assert!(matches!(
        LevelLoader::load(file.path()),
        Err(LevelLoadError::Parse { .. })
    ));
    Ok(())
}
