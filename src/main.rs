use anyhow::Context;
use brushwork::physics::collider_factory::{ColliderProxy, ColliderShape};
use brushwork::rendering::importer::entity_importer::EntityMeshAggregator;
use brushwork::rendering::loader::level_loader::LevelLoader;
use brushwork::rendering::loader::wad_loader::WadLoader;
use brushwork::settings::ImportSettings;
use brushwork::settings::cli::{CliArgs, OperationMode};
use clap::Parser;
use log::{info, trace};
use rapier3d::geometry::Collider;
use std::path::{Path, PathBuf};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    trace!("Starting with args: {:?}", args);

    let settings = args.import_settings()?;
    match &args.operation_mode {
        OperationMode::Mesh { level, wads } => import_level(&settings, level, wads),
        OperationMode::Wad { archive } => list_textures(archive),
    }
}

fn import_level(settings: &ImportSettings, level: &Path, wads: &[PathBuf]) -> Result<(), anyhow::Error> {
    let texture_sizes = WadLoader::collect_texture_sizes(wads, settings.default_texture_size);
    info!("Known texture sizes: {}", texture_sizes.len());

    let root = LevelLoader::load(level)?;
    let imported = EntityMeshAggregator::new(settings, &texture_sizes).import(&root);

    // Building the actual rapier colliders catches degenerate hulls before anyone else has to
    for proxy in &imported.colliders {
        Collider::try_from(proxy).with_context(|| format!("Invalid collider for {}", proxy.name))?;
    }

    for mesh in &imported.meshes {
        println!(
            "{}: {} vertices, {} triangles, bounds {} .. {}",
            mesh.name,
            mesh.mesh.vertex_count(),
            mesh.mesh.triangle_count(),
            mesh.bounds.min,
            mesh.bounds.max
        );
    }

    for proxy in &imported.colliders {
        println!("{}", describe_collider(proxy));
    }

    Ok(())
}

fn describe_collider(proxy: &ColliderProxy) -> String {
    let shape = match &proxy.shape {
        ColliderShape::Cuboid { center, half_extents } => format!("box at {} with half extents {}", center, half_extents),
        ColliderShape::ConvexHull(mesh) => format!("convex hull of {} vertices", mesh.vertex_count()),
        ColliderShape::TriMesh(mesh) => format!("triangle mesh of {} triangles", mesh.triangle_count()),
    };

    let solid = proxy
        .solid_id
        .map(|id| format!(" (brush {})", id))
        .unwrap_or_default();
    let sensor = if proxy.is_trigger { ", sensor" } else { "" };
    format!("{}{}: {}{}", proxy.name, solid, shape, sensor)
}

fn list_textures(archive: &Path) -> Result<(), anyhow::Error> {
    let textures = WadLoader::load(archive)?;
    for texture in &textures {
        println!("{}: {}x{}", texture.name, texture.width, texture.height);
    }

    info!("{} textures in {}", textures.len(), archive.display());
    Ok(())
}
