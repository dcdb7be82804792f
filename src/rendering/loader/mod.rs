/// Contrasting to the importers, that convert already parsed files into meshes and colliders,
/// loaders are a lot more high level. They open the files, call the parsers and report which path failed.
pub mod level_loader;
pub mod wad_loader;
