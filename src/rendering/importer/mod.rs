pub mod build_session;
/// This module handles converting the types from brushwork-files into render meshes and collider proxies.
/// The parsed level is never modified, so the same level can be imported with different settings.
pub mod entity_importer;
pub mod face_triangulator;
pub mod solid_importer;
